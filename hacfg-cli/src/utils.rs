//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including settings loading, file access and report output.

use crate::error::CliError;
use hacfg::reports::{has_errors, ReportItem};
use hacfg::{Settings, SettingsBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Settings file overriding the user settings file.
    pub settings_file: Option<PathBuf>,
}

/// Load settings.
///
/// Settings are merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. Settings file (`--settings` or `~/.hacfg/settings.yaml`)
/// 3. Built-in defaults (lowest priority)
pub fn load_settings(global: &GlobalOptions) -> Result<Settings, CliError> {
    let mut builder = SettingsBuilder::new();
    if let Some(ref path) = global.settings_file {
        builder = builder.with_settings_file(path);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Read a whole file, reporting a missing file as an argument error.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CliError::InvalidArguments(format!("File not found: {}", path.display()))
        } else {
            CliError::Io(e)
        }
    })
}

/// Write a whole file.
pub fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    fs::write(path, content)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Print reports to stderr.
///
/// Returns `ReportedErrors` if any report is an error.
pub fn print_reports(reports: &[ReportItem]) -> Result<(), CliError> {
    for report in reports {
        eprintln!("{report}");
    }
    if has_errors(reports) {
        Err(CliError::ReportedErrors)
    } else {
        Ok(())
    }
}

/// Parse a `KEY=VALUE` argument.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
