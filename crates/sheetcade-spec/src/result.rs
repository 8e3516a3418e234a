//! Analysis result types.

use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameSize};

/// Frame size suggested when no frames were detected.
pub const DEFAULT_FRAME_SIZE: FrameSize = FrameSize::new(32, 32);

/// Inferred arrangement of frames on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// A single row.
    Horizontal,
    /// A single column.
    Vertical,
    /// Multiple rows and columns.
    Grid,
}

impl Layout {
    /// Returns the serialized name of this layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
            Layout::Grid => "grid",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one analysis invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Frames in reading order.
    pub frames: Vec<Frame>,
    /// Most common frame size.
    pub suggested_frame_size: FrameSize,
    /// Inferred layout.
    pub layout: Layout,
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub columns: u32,
}

impl AnalysisResult {
    /// Result used when no frames were found.
    pub fn empty() -> Self {
        Self {
            frames: Vec::new(),
            suggested_frame_size: DEFAULT_FRAME_SIZE,
            layout: Layout::Horizontal,
            rows: 1,
            columns: 0,
        }
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Strategy that produced the frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Fixed-size cell scan over the whole sheet.
    Grid,
    /// 4-connected component labeling.
    FloodFill,
    /// Uniform frames synthesized from the options.
    Manual,
}

impl DetectionStrategy {
    /// Returns the serialized name of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionStrategy::Grid => "grid",
            DetectionStrategy::FloodFill => "flood_fill",
            DetectionStrategy::Manual => "manual",
        }
    }
}

impl std::fmt::Display for DetectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal conditions reported next to a best-effort result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionIssue {
    /// Grid scan accepted a different number of cells than expected, or
    /// fewer manual frames fit the sheet than requested. For grid scans
    /// `found` is the count before truncation.
    DetectionMismatch {
        /// Expected frame count from the options.
        expected: u32,
        /// Accepted cells across the whole sheet.
        found: u32,
    },
    /// No frames were detected.
    NoContentFound,
}

impl std::fmt::Display for DetectionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionIssue::DetectionMismatch { expected, found } => write!(
                f,
                "expected {} frames, grid scan accepted {}",
                expected, found
            ),
            DetectionIssue::NoContentFound => write!(f, "no content found"),
        }
    }
}

/// A best-effort result plus the non-fatal issues raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Strategy that ran.
    pub strategy: DetectionStrategy,
    /// The analysis result.
    pub result: AnalysisResult,
    /// Non-fatal issues.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DetectionIssue>,
}

impl AnalysisReport {
    /// Returns true if a frame-count mismatch was reported.
    pub fn has_mismatch(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i, DetectionIssue::DetectionMismatch { .. }))
    }
}
