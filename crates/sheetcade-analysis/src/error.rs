//! Error types for sprite-sheet analysis.

use sheetcade_spec::OptionsError;
use thiserror::Error;

/// Fatal analysis errors.
///
/// Everything else (frame-count mismatches, empty sheets) is reported as a
/// [`sheetcade_spec::DetectionIssue`] next to a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Zero-sized buffer or pixel data of the wrong length.
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    /// Buffer exceeds the configured pixel budget.
    #[error("Image has {pixels} pixels, exceeding the limit of {max}")]
    SizeExceeded {
        /// Pixel count of the rejected buffer.
        pixels: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Detection options violate their invariants.
    #[error("Invalid detection options: {0}")]
    InvalidOptions(#[from] OptionsError),

    /// The invocation was cancelled before it finished.
    #[error("Analysis cancelled")]
    Cancelled,
}
