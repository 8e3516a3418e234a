//! Logger setup for the CLI.
//!
//! Library crates log through the `log` facade; the binary installs
//! `env_logger` here. `RUST_LOG` overrides the level chosen by `--verbose`.

use std::io::Write;

use colored::Colorize;
use log::LevelFilter;

/// Initialize the logger: `warn` by default, `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => "ERROR".bright_red(),
                log::Level::Warn => "WARN ".yellow(),
                log::Level::Info => "INFO ".green(),
                log::Level::Debug => "DEBUG".blue(),
                log::Level::Trace => "TRACE".magenta(),
            };
            writeln!(buf, "{} {}", level, record.args())
        })
        .filter(None, level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A second init (tests) is harmless.
    let _ = builder.try_init();

    log::debug!("Logger initialized with level: {}", level);
}
