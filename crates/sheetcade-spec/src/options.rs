//! Detection options for sprite-sheet frame extraction.
//!
//! Options are supplied per analysis invocation and may change interactively
//! (mode toggles, frame size fields, manual offsets). Which detection strategy
//! runs is derived from the options:
//!
//! - `mode = manual` synthesizes uniform frames without reading any pixels
//! - all three `expected_frame_*` values present selects grid scanning
//! - otherwise connected-component flood fill is used

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How content pixels are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Content is any pixel with alpha above the alpha threshold.
    #[default]
    Alpha,
    /// Sprites on a black background separated by black borders. Content is
    /// opaque and not black.
    BlackBorder,
    /// No pixel inspection; frames are synthesized from the expected size.
    Manual,
}

impl DetectionMode {
    /// Returns the serialized name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::Alpha => "alpha",
            DetectionMode::BlackBorder => "black_border",
            DetectionMode::Manual => "manual",
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DetectionMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(DetectionMode::Alpha),
            "black_border" | "black-border" => Ok(DetectionMode::BlackBorder),
            "manual" => Ok(DetectionMode::Manual),
            other => Err(OptionsError::UnknownMode(other.to_string())),
        }
    }
}

/// What grid scanning does with a cell that holds no content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCellPolicy {
    /// Emit the full, untrimmed cell rectangle.
    #[default]
    FullCell,
    /// Drop the cell.
    Drop,
}

impl std::str::FromStr for EmptyCellPolicy {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_cell" | "full-cell" => Ok(EmptyCellPolicy::FullCell),
            "drop" => Ok(EmptyCellPolicy::Drop),
            other => Err(OptionsError::UnknownEmptyCellPolicy(other.to_string())),
        }
    }
}

/// Errors produced when detection options violate their invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A minimum frame dimension was zero.
    #[error("Minimum frame {0} must be at least 1")]
    ZeroMinimum(&'static str),

    /// An expected frame dimension or count was zero.
    #[error("Expected frame {0} must be at least 1")]
    ZeroExpected(&'static str),

    /// Manual mode was requested without a full frame size and count.
    #[error("Manual mode requires expected_frame_width, expected_frame_height and expected_frame_count")]
    ManualWithoutFrameSize,

    /// Unrecognised detection mode name.
    #[error("Unknown detection mode '{0}' (expected alpha, black_border or manual)")]
    UnknownMode(String),

    /// Unrecognised empty cell policy name.
    #[error("Unknown empty cell policy '{0}' (expected full_cell or drop)")]
    UnknownEmptyCellPolicy(String),
}

/// Expected grid geometry, present when all three hints are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHint {
    /// Cell width in pixels.
    pub frame_width: u32,
    /// Cell height in pixels.
    pub frame_height: u32,
    /// Number of frames the sheet is expected to hold.
    pub frame_count: u32,
}

/// Per-invocation detection options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionOptions {
    /// How content pixels are recognised.
    #[serde(default)]
    pub mode: DetectionMode,

    /// Expected frame width (grid scan and manual mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_frame_width: Option<u32>,

    /// Expected frame height (grid scan and manual mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_frame_height: Option<u32>,

    /// Expected number of frames (grid scan and manual mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_frame_count: Option<u32>,

    /// Smallest accepted detected frame width.
    #[serde(default = "default_min_size")]
    pub min_width: u32,

    /// Smallest accepted detected frame height.
    #[serde(default = "default_min_size")]
    pub min_height: u32,

    /// Alpha values strictly above this count as opaque.
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,

    /// Channels strictly below this count as black (black-border mode).
    #[serde(default = "default_black_threshold")]
    pub black_threshold: u8,

    /// Horizontal offset of the first manual frame.
    #[serde(default)]
    pub manual_offset_x: u32,

    /// Vertical offset of the manual frame row.
    #[serde(default)]
    pub manual_offset_y: u32,

    /// Handling of grid cells without content.
    #[serde(default)]
    pub empty_cell_policy: EmptyCellPolicy,
}

fn default_min_size() -> u32 {
    8
}

fn default_alpha_threshold() -> u8 {
    10
}

fn default_black_threshold() -> u8 {
    15
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            mode: DetectionMode::default(),
            expected_frame_width: None,
            expected_frame_height: None,
            expected_frame_count: None,
            min_width: default_min_size(),
            min_height: default_min_size(),
            alpha_threshold: default_alpha_threshold(),
            black_threshold: default_black_threshold(),
            manual_offset_x: 0,
            manual_offset_y: 0,
            empty_cell_policy: EmptyCellPolicy::default(),
        }
    }
}

impl DetectionOptions {
    /// Alpha-mode options with defaults.
    pub fn alpha() -> Self {
        Self::default()
    }

    /// Black-border mode options with defaults.
    pub fn black_border() -> Self {
        Self {
            mode: DetectionMode::BlackBorder,
            ..Self::default()
        }
    }

    /// Manual mode producing `count` frames of `width` x `height`.
    pub fn manual(width: u32, height: u32, count: u32) -> Self {
        Self {
            mode: DetectionMode::Manual,
            ..Self::default()
        }
        .with_grid(width, height, count)
    }

    /// Sets the expected frame width, height and count.
    pub fn with_grid(mut self, width: u32, height: u32, count: u32) -> Self {
        self.expected_frame_width = Some(width);
        self.expected_frame_height = Some(height);
        self.expected_frame_count = Some(count);
        self
    }

    /// Sets the minimum accepted frame size.
    pub fn with_min_size(mut self, width: u32, height: u32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Sets the alpha threshold.
    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    /// Sets the black threshold.
    pub fn with_black_threshold(mut self, threshold: u8) -> Self {
        self.black_threshold = threshold;
        self
    }

    /// Sets the manual frame offset.
    pub fn with_offset(mut self, x: u32, y: u32) -> Self {
        self.manual_offset_x = x;
        self.manual_offset_y = y;
        self
    }

    /// Sets the empty cell policy.
    pub fn with_empty_cell_policy(mut self, policy: EmptyCellPolicy) -> Self {
        self.empty_cell_policy = policy;
        self
    }

    /// Returns the grid geometry if all three expected values are present.
    pub fn grid_hint(&self) -> Option<GridHint> {
        match (
            self.expected_frame_width,
            self.expected_frame_height,
            self.expected_frame_count,
        ) {
            (Some(frame_width), Some(frame_height), Some(frame_count)) => Some(GridHint {
                frame_width,
                frame_height,
                frame_count,
            }),
            _ => None,
        }
    }

    /// Checks the option invariants.
    ///
    /// Thresholds are bytes and therefore always in range; minimum sizes and
    /// any expected dimensions must be non-zero. Manual mode needs the full
    /// grid hint. An expected count of zero is allowed (it asks for no frames).
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.min_width == 0 {
            return Err(OptionsError::ZeroMinimum("width"));
        }
        if self.min_height == 0 {
            return Err(OptionsError::ZeroMinimum("height"));
        }
        if self.expected_frame_width == Some(0) {
            return Err(OptionsError::ZeroExpected("width"));
        }
        if self.expected_frame_height == Some(0) {
            return Err(OptionsError::ZeroExpected("height"));
        }
        if self.mode == DetectionMode::Manual && self.grid_hint().is_none() {
            return Err(OptionsError::ManualWithoutFrameSize);
        }
        Ok(())
    }
}
