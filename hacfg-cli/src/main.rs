//! Main entry point for the hacfg CLI.
//!
//! This is the command-line interface for inspecting, validating and
//! editing cluster configuration files offline:
//! - `corosync`: corosync.conf nodes and normalization
//! - `booth`: booth configs and tickets
//! - `permissions`: permissions file and access checks
//! - `known-hosts`: known-hosts file
//! - `completions`: shell completion scripts

use clap::Parser;
use hacfg_cli::cli::{Cli, Command};
use hacfg_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = hacfg::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        settings_file: cli.settings,
    };

    let result = match cli.command {
        Command::Corosync(cmd) => cmd.execute(&global),
        Command::Booth(cmd) => cmd.execute(&global),
        Command::Permissions(cmd) => cmd.execute(&global),
        Command::KnownHosts(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
