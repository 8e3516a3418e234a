//! Detection option flags shared by the `analyze` and `animations` commands.
//!
//! Options start from `--options <file.json>` (or the defaults) and are
//! then overridden by individual flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use sheetcade_analysis::{AnalyzerConfig, DEFAULT_MAX_PIXELS};
use sheetcade_spec::{DetectionMode, DetectionOptions, EmptyCellPolicy};

/// Flags controlling frame detection.
#[derive(Debug, Clone, Default, Args)]
pub struct DetectionArgs {
    /// JSON file with detection options (flags below override it)
    #[arg(long)]
    pub options: Option<String>,

    /// Detection mode (alpha, black-border, manual)
    #[arg(long)]
    pub mode: Option<DetectionMode>,

    /// Expected frame width in pixels
    #[arg(long)]
    pub frame_width: Option<u32>,

    /// Expected frame height in pixels
    #[arg(long)]
    pub frame_height: Option<u32>,

    /// Expected number of frames
    #[arg(long)]
    pub frame_count: Option<u32>,

    /// Smallest accepted frame width
    #[arg(long)]
    pub min_width: Option<u32>,

    /// Smallest accepted frame height
    #[arg(long)]
    pub min_height: Option<u32>,

    /// Pixels with alpha at or below this are background
    #[arg(long)]
    pub alpha_threshold: Option<u8>,

    /// Channels below this count as black
    #[arg(long)]
    pub black_threshold: Option<u8>,

    /// Manual mode x offset of the first frame
    #[arg(long)]
    pub offset_x: Option<u32>,

    /// Manual mode y offset of the first frame
    #[arg(long)]
    pub offset_y: Option<u32>,

    /// What grid scanning does with empty cells (full-cell, drop)
    #[arg(long)]
    pub empty_cell: Option<EmptyCellPolicy>,

    /// Largest accepted image size in pixels
    #[arg(long)]
    pub max_pixels: Option<u64>,
}

impl DetectionArgs {
    /// Resolves the options file and flag overrides.
    pub fn resolve(&self) -> Result<(DetectionOptions, AnalyzerConfig)> {
        let mut options = match &self.options {
            Some(path) => load_options(Path::new(path))?,
            None => DetectionOptions::default(),
        };

        if let Some(mode) = self.mode {
            options.mode = mode;
        }
        if self.frame_width.is_some() {
            options.expected_frame_width = self.frame_width;
        }
        if self.frame_height.is_some() {
            options.expected_frame_height = self.frame_height;
        }
        if self.frame_count.is_some() {
            options.expected_frame_count = self.frame_count;
        }
        if let Some(v) = self.min_width {
            options.min_width = v;
        }
        if let Some(v) = self.min_height {
            options.min_height = v;
        }
        if let Some(v) = self.alpha_threshold {
            options.alpha_threshold = v;
        }
        if let Some(v) = self.black_threshold {
            options.black_threshold = v;
        }
        if let Some(v) = self.offset_x {
            options.manual_offset_x = v;
        }
        if let Some(v) = self.offset_y {
            options.manual_offset_y = v;
        }
        if let Some(policy) = self.empty_cell {
            options.empty_cell_policy = policy;
        }

        let config = AnalyzerConfig {
            max_pixels: self.max_pixels.unwrap_or(DEFAULT_MAX_PIXELS),
        };
        Ok((options, config))
    }
}

/// Reads detection options from a JSON file.
pub fn load_options(path: &Path) -> Result<DetectionOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse options file: {}", path.display()))
}
