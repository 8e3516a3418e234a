//! Analyze command implementation
//!
//! Detects the frames of one sprite sheet (`--input`) or of every PNG under a
//! directory (`--input-dir`) and reports the inferred layout.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

use sheetcade_analysis::{Analyzer, CancelToken};
use sheetcade_spec::{DetectionIssue, DetectionOptions};

use super::json_output::{
    error_codes, AnalyzeOutput, AnalyzeResult, BatchAnalyzeItem, BatchAnalyzeOutput, JsonError,
};
use super::options::DetectionArgs;
use crate::input::{is_png, load_sheet};

/// Run the analyze command
///
/// # Arguments
/// * `input_path` - Sprite sheet to analyze
/// * `input_dir` - Directory to scan for `.png` sheets (batch mode)
/// * `output_path` - Optional output file path (default: stdout)
/// * `json_output` - Whether to output machine-readable JSON
/// * `detection` - Detection option flags
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input_path: Option<&str>,
    input_dir: Option<&str>,
    output_path: Option<&str>,
    json_output: bool,
    detection: &DetectionArgs,
) -> Result<ExitCode> {
    let (options, config) = match detection.resolve() {
        Ok(resolved) => resolved,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::JSON_PARSE, format!("{:#}", e));
            print_json(&AnalyzeOutput::failure(vec![error]), output_path)?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };
    let analyzer = Analyzer::new(config);

    match (input_path, input_dir) {
        (Some(input), None) => run_single(input, output_path, json_output, &analyzer, &options),
        (None, Some(dir)) => run_batch(dir, output_path, json_output, &analyzer, &options),
        _ => {
            let message = "Exactly one of --input or --input-dir is required";
            if json_output {
                let error = JsonError::new(error_codes::INVALID_ARGUMENT, message);
                print_json(&AnalyzeOutput::failure(vec![error]), output_path)?;
                Ok(ExitCode::from(1))
            } else {
                anyhow::bail!(message)
            }
        }
    }
}

/// Analyze one sheet into a result or a structured error.
pub fn analyze_file(
    path: &Path,
    analyzer: &Analyzer,
    options: &DetectionOptions,
) -> Result<AnalyzeResult, JsonError> {
    let input = path.display().to_string();
    let sheet = load_sheet(path, analyzer.config().max_pixels)
        .map_err(|e| JsonError::new(e.code(), e.to_string()).with_file(&input))?;
    let report = analyzer
        .run(&sheet.buffer, options, &CancelToken::new())
        .map_err(|e| {
            JsonError::new(error_codes::ANALYSIS, format!("Analysis failed: {}", e))
                .with_file(&input)
        })?;

    Ok(AnalyzeResult {
        input,
        input_hash: sheet.hash,
        image_width: sheet.buffer.width(),
        image_height: sheet.buffer.height(),
        report,
    })
}

fn run_single(
    input: &str,
    output_path: Option<&str>,
    json_output: bool,
    analyzer: &Analyzer,
    options: &DetectionOptions,
) -> Result<ExitCode> {
    let result = analyze_file(Path::new(input), analyzer, options);

    if json_output {
        let (output, code) = match result {
            Ok(result) => (AnalyzeOutput::success(result), ExitCode::SUCCESS),
            Err(error) => (AnalyzeOutput::failure(vec![error]), ExitCode::from(1)),
        };
        print_json(&output, output_path)?;
        return Ok(code);
    }

    let result = result.map_err(|e| anyhow::anyhow!(e.message))?;
    print_human(&result);

    if let Some(out_path) = output_path {
        let json = serde_json::to_string_pretty(&AnalyzeOutput::success(result))?;
        fs::write(out_path, &json).with_context(|| format!("Failed to write to: {}", out_path))?;
        println!("\n{} {}", "Output written to:".green().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_batch(
    dir: &str,
    output_path: Option<&str>,
    json_output: bool,
    analyzer: &Analyzer,
    options: &DetectionOptions,
) -> Result<ExitCode> {
    let root = Path::new(dir);
    if !root.is_dir() {
        let message = format!("Input path is not a directory: {}", dir);
        if json_output {
            let error = JsonError::new(error_codes::FILE_READ, message);
            print_json(&AnalyzeOutput::failure(vec![error]), output_path)?;
            return Ok(ExitCode::from(1));
        }
        anyhow::bail!(message);
    }

    let sheets = find_sheets(root);
    log::debug!("Found {} sheets under {}", sheets.len(), dir);

    let items: Vec<BatchAnalyzeItem> = sheets
        .iter()
        .map(|path| match analyze_file(path, analyzer, options) {
            Ok(result) => BatchAnalyzeItem::success(result),
            Err(error) => BatchAnalyzeItem::failure(path.display().to_string(), error),
        })
        .collect();
    let output = BatchAnalyzeOutput::from_items(items);

    if json_output {
        print_json(&output, output_path)?;
    } else {
        for item in &output.results {
            match (&item.result, &item.error) {
                (Some(result), _) => println!(
                    "{} {} ({} frames, {})",
                    "OK".green().bold(),
                    item.input,
                    result.report.result.frames.len(),
                    result.report.result.layout
                ),
                (None, Some(error)) => {
                    println!("{} {}: {}", "FAIL".red().bold(), item.input, error.message)
                }
                (None, None) => {}
            }
        }
        println!(
            "\n{} {} total, {} succeeded, {} failed",
            "Summary:".cyan().bold(),
            output.summary.total,
            output.summary.succeeded,
            output.summary.failed
        );
        if let Some(out_path) = output_path {
            let json = serde_json::to_string_pretty(&output)?;
            fs::write(out_path, &json)
                .with_context(|| format!("Failed to write to: {}", out_path))?;
        }
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// All `.png` files under `root`, sorted for deterministic output.
fn find_sheets(root: &Path) -> Vec<PathBuf> {
    let mut sheets: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_png(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    sheets.sort();
    sheets
}

fn print_human(result: &AnalyzeResult) {
    let report = &result.report;
    let analysis = &report.result;

    println!("{} {}", "Analyzing:".cyan().bold(), result.input);
    println!(
        "{} {}x{}",
        "Size:".dimmed(),
        result.image_width,
        result.image_height
    );
    println!("{} {}", "Hash:".dimmed(), &result.input_hash[..16]);
    println!("{} {}", "Strategy:".dimmed(), report.strategy);
    println!(
        "{} {} ({} rows x {} columns)",
        "Layout:".dimmed(),
        analysis.layout,
        analysis.rows,
        analysis.columns
    );
    println!(
        "{} {}x{}",
        "Frame size:".dimmed(),
        analysis.suggested_frame_size.width,
        analysis.suggested_frame_size.height
    );

    println!("\n{} {}", "Frames:".cyan().bold(), analysis.frames.len());
    for (i, frame) in analysis.frames.iter().enumerate() {
        println!(
            "  {:>3}  x={:<5} y={:<5} {}x{}",
            i, frame.x, frame.y, frame.width, frame.height
        );
    }

    for issue in &report.issues {
        let label = match issue {
            DetectionIssue::DetectionMismatch { .. } => "warning:".yellow().bold(),
            DetectionIssue::NoContentFound => "note:".dimmed(),
        };
        println!("{} {}", label, issue);
    }
}

fn print_json<T: serde::Serialize>(output: &T, output_path: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    match output_path {
        Some(out_path) => {
            fs::write(out_path, &json).with_context(|| format!("Failed to write to: {}", out_path))
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcade_analysis::png::{write_rgba, PngConfig};
    use sheetcade_analysis::PixelBuffer;
    use sheetcade_spec::{Frame, Layout};

    fn write_sheet(path: &Path) {
        let buffer = PixelBuffer::transparent(64, 32)
            .unwrap()
            .with_rect(Frame::new(4, 4, 24, 24), [255, 0, 0, 255])
            .with_rect(Frame::new(36, 4, 24, 24), [0, 255, 0, 255]);
        write_rgba(&buffer, path, &PngConfig::default()).unwrap();
    }

    #[test]
    fn test_analyze_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sheet.png");
        write_sheet(&path);

        let result = analyze_file(&path, &Analyzer::default(), &DetectionOptions::alpha()).unwrap();
        assert_eq!((result.image_width, result.image_height), (64, 32));
        assert_eq!(result.input_hash.len(), 64);
        assert_eq!(result.report.result.frames.len(), 2);
        assert_eq!(result.report.result.layout, Layout::Horizontal);
    }

    #[test]
    fn test_analyze_file_not_found() {
        let code = run(
            Some("/nonexistent/sheet.png"),
            None,
            None,
            true,
            &DetectionArgs::default(),
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_requires_one_input() {
        let code = run(None, None, None, true, &DetectionArgs::default()).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(run(None, None, None, false, &DetectionArgs::default()).is_err());
    }

    #[test]
    fn test_analyze_with_output_file() {
        let tmp = tempfile::tempdir().unwrap();
        let sheet = tmp.path().join("sheet.png");
        let out = tmp.path().join("report.json");
        write_sheet(&sheet);

        let code = run(
            Some(sheet.to_str().unwrap()),
            None,
            Some(out.to_str().unwrap()),
            true,
            &DetectionArgs::default(),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let parsed: AnalyzeOutput =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.result.unwrap().report.result.frames.len(), 2);
    }

    #[test]
    fn test_find_sheets_sorted_png_only() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        write_sheet(&tmp.path().join("b.png"));
        write_sheet(&tmp.path().join("nested").join("a.png"));
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let sheets = find_sheets(tmp.path());
        assert_eq!(
            sheets,
            vec![tmp.path().join("b.png"), tmp.path().join("nested").join("a.png")]
        );
    }
}
