//! Analysis entry points.
//!
//! `PixelBuffer + DetectionOptions -> FrameDetector -> ordered frames ->
//! LayoutAnalyzer -> AnalysisResult`. Analysis is synchronous and stateless;
//! see [`crate::worker`] for running it off the interactive thread.

use serde::{Deserialize, Serialize};
use sheetcade_spec::{AnalysisReport, AnalysisResult, DetectionIssue, DetectionOptions};

use crate::buffer::PixelBuffer;
use crate::cancel::CancelToken;
use crate::detect::FrameDetector;
use crate::error::AnalysisError;
use crate::layout::LayoutAnalyzer;
use crate::order::ROW_KEY_STRIDE;

/// Default pixel budget (4096 x 4096).
pub const DEFAULT_MAX_PIXELS: u64 = 4096 * 4096;

/// Analyzer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Largest accepted `width * height`.
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

fn default_max_pixels() -> u64 {
    DEFAULT_MAX_PIXELS
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Runs detection and layout inference under a configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes `buffer`, returning the result and any non-fatal issues.
    ///
    /// Fails fast on oversized buffers and invalid options; `cancel` is
    /// checked between scan rows.
    pub fn run(
        &self,
        buffer: &PixelBuffer,
        options: &DetectionOptions,
        cancel: &CancelToken,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.check_size(buffer)?;
        options.validate()?;

        let detection = FrameDetector::new(buffer, options).detect(cancel)?;
        let mut issues = detection.issues;
        if detection.frames.is_empty() {
            log::debug!("No frames detected");
            issues.push(DetectionIssue::NoContentFound);
        }

        let result = LayoutAnalyzer::new(detection.row_tolerance).analyze(detection.frames);
        log::debug!(
            "Detected {} frames, layout {} ({} rows x {} columns)",
            result.frames.len(),
            result.layout,
            result.rows,
            result.columns
        );

        Ok(AnalysisReport {
            strategy: detection.strategy,
            result,
            issues,
        })
    }

    fn check_size(&self, buffer: &PixelBuffer) -> Result<(), AnalysisError> {
        let pixels = buffer.pixel_count();
        if pixels > self.config.max_pixels {
            return Err(AnalysisError::SizeExceeded {
                pixels,
                max: self.config.max_pixels,
            });
        }
        if buffer.width() as u64 >= ROW_KEY_STRIDE {
            return Err(AnalysisError::InvalidBuffer(format!(
                "width {} exceeds the supported maximum of {}",
                buffer.width(),
                ROW_KEY_STRIDE - 1
            )));
        }
        Ok(())
    }
}

/// Analyzes a buffer with the default configuration.
///
/// Non-fatal issues are dropped; use [`Analyzer::run`] to inspect them.
pub fn analyze(
    buffer: &PixelBuffer,
    options: &DetectionOptions,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::default()
        .run(buffer, options, &CancelToken::new())
        .map(|report| report.result)
}
