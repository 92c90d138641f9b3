//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BoothCommand, CompletionsCommand, CorosyncCommand, KnownHostsCommand, PermissionsCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for cluster configuration files.
#[derive(Parser)]
#[command(name = "hacfg")]
#[command(version, about = "Inspect and edit Pacemaker/Corosync/Booth configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of ~/.hacfg/settings.yaml
    #[arg(long, value_name = "PATH", global = true, env = "HACFG_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Inspect and edit corosync.conf
    Corosync(CorosyncCommand),

    /// Inspect and edit booth configuration
    Booth(BoothCommand),

    /// Inspect the permissions file and check access
    Permissions(PermissionsCommand),

    /// Inspect the known-hosts file
    KnownHosts(KnownHostsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
