//! SheetCade CLI library.
//!
//! This crate provides the core functionality for the SheetCade CLI,
//! including sheet loading, logger setup and the command implementations.

pub mod commands;
pub mod input;
pub mod logging;
