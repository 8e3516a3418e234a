//! JSON output types for machine-readable CLI output.
//!
//! Every command taking `--json` prints one envelope with `success`,
//! `errors` and (on success) `result`, so tools can parse CLI output
//! programmatically.

use serde::{Deserialize, Serialize};
use sheetcade_spec::{AnalysisReport, SpriteSheetRecord};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Image could not be decoded
    pub const IMAGE_DECODE: &str = "CLI_002";
    /// Options file could not be parsed
    pub const JSON_PARSE: &str = "CLI_003";
    /// Decoded image is not a valid pixel buffer
    pub const INVALID_BUFFER: &str = "CLI_004";
    /// Analysis failed (size guard, invalid options)
    pub const ANALYSIS: &str = "CLI_005";
    /// Output could not be written
    pub const FILE_WRITE: &str = "CLI_006";
    /// Invalid animation group
    pub const ANIMATION: &str = "CLI_007";
    /// Invalid command-line argument
    pub const INVALID_ARGUMENT: &str = "CLI_008";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// JSON envelope shared by all commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result of analysing one sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResult {
    /// Input file path
    pub input: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Strategy, frames, layout and issues
    pub report: AnalysisReport,
}

/// JSON output for the `analyze` command.
pub type AnalyzeOutput = CommandOutput<AnalyzeResult>;

/// Result for a single file in batch mode (either success or error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalyzeItem {
    /// Input file path
    pub input: String,
    /// Whether analysis succeeded
    pub success: bool,
    /// Analysis result (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalyzeResult>,
    /// Error information (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl BatchAnalyzeItem {
    /// Creates a successful batch item.
    pub fn success(result: AnalyzeResult) -> Self {
        Self {
            input: result.input.clone(),
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Creates a failed batch item.
    pub fn failure(input: String, error: JsonError) -> Self {
        Self {
            input,
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Summary statistics for batch analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchAnalyzeSummary {
    /// Total number of files processed
    pub total: usize,
    /// Number of successfully analyzed files
    pub succeeded: usize,
    /// Number of failed files
    pub failed: usize,
}

/// JSON output for batch analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalyzeOutput {
    /// True when every file was analyzed
    pub success: bool,
    /// Per-file results, sorted by path
    pub results: Vec<BatchAnalyzeItem>,
    /// Summary statistics
    pub summary: BatchAnalyzeSummary,
}

impl BatchAnalyzeOutput {
    /// Builds the output and summary from per-file results.
    pub fn from_items(results: Vec<BatchAnalyzeItem>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let summary = BatchAnalyzeSummary {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        };
        Self {
            success: summary.failed == 0,
            results,
            summary,
        }
    }
}

/// Result of the `strip-background` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripBackgroundResult {
    /// Input file path
    pub input: String,
    /// Output file path
    pub output: String,
    /// Key color as `#rrggbb`
    pub color: String,
    /// RGB distance treated as background
    pub tolerance: f64,
    /// BLAKE3 hash of the written PNG
    pub output_hash: String,
}

/// JSON output for the `strip-background` command.
pub type StripBackgroundOutput = CommandOutput<StripBackgroundResult>;

/// JSON output for the `animations` command.
pub type AnimationsOutput = CommandOutput<SpriteSheetRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_result() {
        let output: AnalyzeOutput =
            CommandOutput::failure(vec![JsonError::new(error_codes::FILE_READ, "missing")
                .with_file("sheet.png")]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("result").is_none());
        assert_eq!(json["errors"][0]["code"], "CLI_001");
        assert_eq!(json["errors"][0]["file"], "sheet.png");
    }

    #[test]
    fn test_batch_summary() {
        let items = vec![
            BatchAnalyzeItem::failure("a.png".into(), JsonError::new(error_codes::IMAGE_DECODE, "bad")),
            BatchAnalyzeItem::failure("b.png".into(), JsonError::new(error_codes::FILE_READ, "gone")),
        ];
        let output = BatchAnalyzeOutput::from_items(items);
        assert!(!output.success);
        assert_eq!(
            output.summary,
            BatchAnalyzeSummary {
                total: 2,
                succeeded: 0,
                failed: 2
            }
        );
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let output = BatchAnalyzeOutput::from_items(Vec::new());
        assert!(output.success);
        assert_eq!(output.summary.total, 0);
    }
}
