//! Frame detection strategies.
//!
//! The strategy is chosen from the options:
//!
//! | Options | Strategy |
//! |---------|----------|
//! | `mode = manual` | [`manual`]: uniform frames, no pixel reads |
//! | width, height and count all set | [`grid`]: whole-sheet cell scan |
//! | otherwise | [`flood`]: 4-connected component labeling |
//!
//! Every strategy returns frames already in reading order together with the
//! row tolerance the layout analyzer should use.

pub mod flood;
pub mod grid;
pub mod manual;

use sheetcade_spec::{
    DetectionIssue, DetectionMode, DetectionOptions, DetectionStrategy, Frame, OptionsError,
};

use crate::buffer::PixelBuffer;
use crate::cancel::CancelToken;
use crate::error::AnalysisError;
use crate::order::FLOOD_FILL_ROW_TOLERANCE;
use crate::sampler::PixelSampler;

/// Output of a detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Strategy that ran.
    pub strategy: DetectionStrategy,
    /// Frames in reading order.
    pub frames: Vec<Frame>,
    /// Row tolerance used for ordering; reused for layout inference.
    pub row_tolerance: u32,
    /// Non-fatal issues raised by the strategy.
    pub issues: Vec<DetectionIssue>,
}

/// Runs the detection strategy selected by the options.
#[derive(Debug, Clone, Copy)]
pub struct FrameDetector<'a> {
    buffer: &'a PixelBuffer,
    options: &'a DetectionOptions,
}

impl<'a> FrameDetector<'a> {
    /// Creates a detector over `buffer`.
    pub fn new(buffer: &'a PixelBuffer, options: &'a DetectionOptions) -> Self {
        Self { buffer, options }
    }

    /// Strategy these options select.
    pub fn strategy(&self) -> DetectionStrategy {
        if self.options.mode == DetectionMode::Manual {
            DetectionStrategy::Manual
        } else if self.options.grid_hint().is_some() {
            DetectionStrategy::Grid
        } else {
            DetectionStrategy::FloodFill
        }
    }

    /// Detects frames, checking `cancel` between scan rows.
    pub fn detect(&self, cancel: &CancelToken) -> Result<Detection, AnalysisError> {
        let strategy = self.strategy();
        log::debug!(
            "Detecting frames in {}x{} sheet using {} strategy",
            self.buffer.width(),
            self.buffer.height(),
            strategy
        );

        // Manual mode has no sampler.
        let Some(sampler) = PixelSampler::for_options(self.buffer, self.options) else {
            let hint = self
                .options
                .grid_hint()
                .ok_or(OptionsError::ManualWithoutFrameSize)?;
            return Ok(manual::synthesize(
                hint,
                self.options.manual_offset_x,
                self.options.manual_offset_y,
                self.buffer.size(),
            ));
        };

        match self.options.grid_hint() {
            Some(hint) => grid::scan(&sampler, self.options, hint, cancel),
            None => {
                let frames = flood::label(&sampler, self.options, cancel)?;
                Ok(Detection {
                    strategy: DetectionStrategy::FloodFill,
                    frames,
                    row_tolerance: FLOOD_FILL_ROW_TOLERANCE,
                    issues: Vec::new(),
                })
            }
        }
    }
}

/// Tight bounding box accumulator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Bounds {
    pub(crate) fn new(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub(crate) fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub(crate) fn x(&self) -> u32 {
        self.min_x
    }

    pub(crate) fn y(&self) -> u32 {
        self.min_y
    }

    pub(crate) fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub(crate) fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}
