//! SheetCade CLI - Command-line interface for sprite-sheet analysis
//!
//! This binary detects frames in sprite sheets, infers their layout and
//! builds the animation records stored alongside the image.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

use sheetcade_cli::commands;
use sheetcade_cli::commands::animations::parse_group;
use sheetcade_cli::commands::options::DetectionArgs;
use sheetcade_cli::logging;
use sheetcade_spec::AnimationGroup;

/// SheetCade - Sprite-Sheet Frame Extraction and Layout Inference
#[derive(Parser)]
#[command(name = "sheetcade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect frames in a sprite sheet and report the inferred layout
    Analyze {
        /// Path to the sprite sheet (PNG)
        #[arg(short, long)]
        input: Option<String>,

        /// Directory to recursively scan for .png sheets (batch mode)
        #[arg(long)]
        input_dir: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        detection: DetectionArgs,
    },

    /// Make a solid background color transparent
    StripBackground {
        /// Path to the sprite sheet (PNG)
        #[arg(short, long)]
        input: String,

        /// Output PNG path
        #[arg(short, long)]
        output: String,

        /// Background color as RRGGBB (default: dominant corner color)
        #[arg(long)]
        color: Option<String>,

        /// RGB distance treated as background
        #[arg(long)]
        tolerance: Option<f64>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Build the sprite-sheet record with its animation list
    Animations {
        /// Path to the sprite sheet (PNG)
        #[arg(short, long)]
        input: String,

        /// Record name (default: file stem)
        #[arg(long)]
        name: Option<String>,

        /// Animation group as NAME:START:COUNT (repeatable)
        #[arg(long = "group", value_parser = parse_group)]
        groups: Vec<AnimationGroup>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        detection: DetectionArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            input,
            input_dir,
            output,
            json,
            detection,
        } => commands::analyze::run(
            input.as_deref(),
            input_dir.as_deref(),
            output.as_deref(),
            json,
            &detection,
        ),
        Commands::StripBackground {
            input,
            output,
            color,
            tolerance,
            json,
        } => commands::strip_background::run(&input, &output, color.as_deref(), tolerance, json),
        Commands::Animations {
            input,
            name,
            groups,
            output,
            json,
            detection,
        } => commands::animations::run(
            &input,
            name.as_deref(),
            &groups,
            output.as_deref(),
            json,
            &detection,
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}
