//! Known-hosts commands.

use crate::error::CliError;
use crate::utils::{load_settings, print_reports, read_file, GlobalOptions};
use clap::{Args, Subcommand};
use hacfg::json_file;
use hacfg::known_hosts::KnownHostsFacade;
use hacfg::reports::FileType;
use std::path::PathBuf;

/// Inspect the known-hosts file.
#[derive(Args)]
pub struct KnownHostsCommand {
    /// Known-hosts file to use instead of the configured one
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: KnownHostsAction,
}

/// Known-hosts actions.
#[derive(Subcommand)]
pub enum KnownHostsAction {
    /// List known hosts and their addresses
    List,
}

impl KnownHostsCommand {
    /// Execute the known-hosts command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = match self.file {
            Some(path) => path,
            None => load_settings(global)?.known_hosts_path().to_path_buf(),
        };
        let text = read_file(&path)?;
        let facade = match KnownHostsFacade::parse(&text) {
            Ok(facade) => facade,
            Err(e) => {
                let display = path.display().to_string();
                print_reports(&json_file::error_to_report_list(
                    &e,
                    FileType::KnownHosts,
                    Some(&display),
                ))?;
                return Err(CliError::ReportedErrors);
            }
        };

        match self.action {
            KnownHostsAction::List => {
                for host in facade.known_hosts().values() {
                    let dests: Vec<String> = host
                        .dest_list
                        .iter()
                        .map(|dest| format!("{}:{}", dest.addr, dest.port))
                        .collect();
                    println!("{} {}", host.name, dests.join(","));
                }
            }
        }
        Ok(())
    }
}
