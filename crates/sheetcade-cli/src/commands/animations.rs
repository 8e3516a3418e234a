//! Animations command implementation
//!
//! Analyzes a sheet and prints the sprite-sheet record (frame size, layout
//! and animation list) a persistence backend would store next to the image.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use sheetcade_analysis::animation::sprite_sheet_record;
use sheetcade_analysis::Analyzer;
use sheetcade_spec::{AnimationGroup, DetectionOptions, SpriteSheetRecord};

use super::analyze::analyze_file;
use super::json_output::{error_codes, AnimationsOutput, JsonError};
use super::options::DetectionArgs;

/// Parses a `name:start:count` animation group.
pub fn parse_group(s: &str) -> Result<AnimationGroup, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(count), Some(start), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected NAME:START:COUNT, got '{}'", s));
    };
    if name.is_empty() {
        return Err(format!("animation name is empty in '{}'", s));
    }
    let start = start
        .parse::<u32>()
        .map_err(|e| format!("invalid start '{}': {}", start, e))?;
    let count = count
        .parse::<u32>()
        .map_err(|e| format!("invalid count '{}': {}", count, e))?;
    Ok(AnimationGroup::new(name, start, count))
}

/// Run the animations command
///
/// # Arguments
/// * `input_path` - Sprite sheet to analyze
/// * `name` - Record name (default: file stem)
/// * `groups` - Animation groups; empty means one animation over all frames
/// * `output_path` - Optional output file path (default: stdout)
/// * `json_output` - Whether to output machine-readable JSON
/// * `detection` - Detection option flags
pub fn run(
    input_path: &str,
    name: Option<&str>,
    groups: &[AnimationGroup],
    output_path: Option<&str>,
    json_output: bool,
    detection: &DetectionArgs,
) -> Result<ExitCode> {
    let (options, config) = match detection.resolve() {
        Ok(resolved) => resolved,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::JSON_PARSE, format!("{:#}", e));
            println!(
                "{}",
                serde_json::to_string_pretty(&AnimationsOutput::failure(vec![error]))?
            );
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let path = Path::new(input_path);
    let name = name.map(str::to_string).unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet")
            .to_string()
    });

    let record = build_record(path, &name, groups, &Analyzer::new(config), &options);

    if json_output {
        let (output, code) = match record {
            Ok(record) => (AnimationsOutput::success(record), ExitCode::SUCCESS),
            Err(error) => (AnimationsOutput::failure(vec![error]), ExitCode::from(1)),
        };
        let json = serde_json::to_string_pretty(&output)?;
        match output_path {
            Some(out_path) => fs::write(out_path, &json)
                .with_context(|| format!("Failed to write to: {}", out_path))?,
            None => println!("{}", json),
        }
        return Ok(code);
    }

    let record = record.map_err(|e| anyhow::anyhow!(e.message))?;
    println!(
        "{} {} ({} frames of {}x{}, {})",
        "Sheet:".cyan().bold(),
        record.name,
        record.frame_count,
        record.frame_width,
        record.frame_height,
        record.layout
    );
    for animation in &record.animations {
        println!(
            "  {:<12} frames {}..{} from ({}, {})",
            animation.name,
            animation.frame_start,
            animation.frame_start + animation.frame_count,
            animation.start_x,
            animation.start_y
        );
    }

    let json = serde_json::to_string_pretty(&record)?;
    match output_path {
        Some(out_path) => {
            fs::write(out_path, &json).with_context(|| format!("Failed to write to: {}", out_path))?;
            println!("\n{} {}", "Output written to:".green().bold(), out_path);
        }
        None => println!("\n{}", json),
    }
    Ok(ExitCode::SUCCESS)
}

fn build_record(
    path: &Path,
    name: &str,
    groups: &[AnimationGroup],
    analyzer: &Analyzer,
    options: &DetectionOptions,
) -> Result<SpriteSheetRecord, JsonError> {
    let analyzed = analyze_file(path, analyzer, options)?;
    let image = sheetcade_spec::FrameSize::new(analyzed.image_width, analyzed.image_height);
    sprite_sheet_record(name, image, &analyzed.report.result, groups).map_err(|e| {
        JsonError::new(error_codes::ANIMATION, e.to_string()).with_file(analyzed.input)
    })
}
