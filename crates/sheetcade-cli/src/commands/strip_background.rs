//! Strip-background command implementation
//!
//! Makes a solid background color transparent and writes the sheet back out
//! as a deterministic PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use sheetcade_analysis::background::{
    dominant_corner_color, parse_hex_color, remove_background, DEFAULT_TOLERANCE,
};
use sheetcade_analysis::png::{write_rgba_to_vec_with_hash, PngConfig};
use sheetcade_analysis::DEFAULT_MAX_PIXELS;

use super::json_output::{error_codes, JsonError, StripBackgroundOutput, StripBackgroundResult};
use crate::input::load_sheet;

/// Run the strip-background command
///
/// `color` is `RRGGBB`; when absent the dominant corner color is used.
pub fn run(
    input_path: &str,
    output_path: &str,
    color: Option<&str>,
    tolerance: Option<f64>,
    json_output: bool,
) -> Result<ExitCode> {
    match strip(input_path, output_path, color, tolerance) {
        Ok(result) => {
            if json_output {
                let output = StripBackgroundOutput::success(result);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{} {}", "Input:".dimmed(), result.input);
                println!("{} {}", "Key color:".dimmed(), result.color);
                println!("{} {}", "Tolerance:".dimmed(), result.tolerance);
                println!("{} {}", "Hash:".dimmed(), &result.output_hash[..16]);
                println!("{} {}", "Output written to:".green().bold(), result.output);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if json_output {
                let output = StripBackgroundOutput::failure(vec![error]);
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(ExitCode::from(1))
            } else {
                anyhow::bail!(error.message)
            }
        }
    }
}

fn strip(
    input_path: &str,
    output_path: &str,
    color: Option<&str>,
    tolerance: Option<f64>,
) -> Result<StripBackgroundResult, JsonError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(JsonError::new(
            error_codes::INVALID_ARGUMENT,
            format!("Tolerance must be a non-negative number, got {}", tolerance),
        ));
    }

    let sheet = load_sheet(Path::new(input_path), DEFAULT_MAX_PIXELS)
        .map_err(|e| JsonError::new(e.code(), e.to_string()).with_file(input_path))?;

    let key = match color {
        Some(hex) => parse_hex_color(hex).ok_or_else(|| {
            JsonError::new(
                error_codes::INVALID_ARGUMENT,
                format!("Invalid color '{}', expected RRGGBB", hex),
            )
        })?,
        None => dominant_corner_color(&sheet.buffer),
    };

    let cleared = remove_background(&sheet.buffer, key, tolerance);
    let (data, output_hash) = write_rgba_to_vec_with_hash(&cleared, &PngConfig::default())
        .map_err(|e| JsonError::new(error_codes::FILE_WRITE, e.to_string()))?;
    fs::write(output_path, &data)
        .with_context(|| format!("Failed to write to: {}", output_path))
        .map_err(|e| {
            JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)).with_file(output_path)
        })?;

    Ok(StripBackgroundResult {
        input: input_path.to_string(),
        output: output_path.to_string(),
        color: format!("#{:02x}{:02x}{:02x}", key[0], key[1], key[2]),
        tolerance,
        output_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::decode_sheet;
    use sheetcade_analysis::png::write_rgba;
    use sheetcade_analysis::PixelBuffer;
    use sheetcade_spec::Frame;

    fn write_magenta_sheet(path: &Path) {
        let buffer = PixelBuffer::filled(16, 16, [255, 0, 255, 255])
            .unwrap()
            .with_rect(Frame::new(4, 4, 8, 8), [10, 200, 10, 255]);
        write_rgba(&buffer, path, &PngConfig::default()).unwrap();
    }

    #[test]
    fn test_strip_detected_color() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.png");
        let output = tmp.path().join("out.png");
        write_magenta_sheet(&input);

        let result = strip(input.to_str().unwrap(), output.to_str().unwrap(), None, None).unwrap();
        assert_eq!(result.color, "#ff00ff");

        let cleared = decode_sheet(&fs::read(&output).unwrap(), DEFAULT_MAX_PIXELS).unwrap();
        assert_eq!(cleared.pixel(0, 0), Some([255, 0, 255, 0]));
        assert_eq!(cleared.pixel(6, 6), Some([10, 200, 10, 255]));
    }

    #[test]
    fn test_invalid_color() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.png");
        write_magenta_sheet(&input);

        let err = strip(
            input.to_str().unwrap(),
            tmp.path().join("out.png").to_str().unwrap(),
            Some("purple"),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, error_codes::INVALID_ARGUMENT);
    }

    #[test]
    fn test_negative_tolerance() {
        let err = strip("in.png", "out.png", None, Some(-1.0)).unwrap_err();
        assert_eq!(err.code, error_codes::INVALID_ARGUMENT);
    }
}
