//! Library exports for hacfg-cli.
//!
//! The CLI structure is exported so that completion generation can build
//! the clap command.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
