//! Library exports for lodge-cli.
//!
//! This module exports the CLI structure for use by the build script
//! and integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
