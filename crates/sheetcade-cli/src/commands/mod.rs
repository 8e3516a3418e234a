//! CLI command implementations.

pub mod analyze;
pub mod animations;
pub mod json_output;
pub mod options;
pub mod strip_background;
