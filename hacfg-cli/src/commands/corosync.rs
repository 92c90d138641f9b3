//! corosync.conf commands.

use crate::error::CliError;
use crate::utils::{load_settings, print_reports, read_file, write_file, GlobalOptions};
use clap::{Args, Subcommand};
use hacfg::corosync::{self, validators, CorosyncConfFacade, NodeSpec, SystemResolver};
use std::path::{Path, PathBuf};

/// Inspect and edit corosync.conf.
#[derive(Args)]
pub struct CorosyncCommand {
    /// corosync.conf to use instead of the configured one
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: CorosyncAction,
}

/// corosync.conf actions.
#[derive(Subcommand)]
pub enum CorosyncAction {
    /// Print the configuration in canonical form
    Normalize,

    /// List the nodes with their ids and addresses
    Nodes,

    /// Validate and add a node
    AddNode {
        /// Name of the new node
        name: String,

        /// Addresses of the node, one per link
        #[arg(required = true, value_name = "ADDR")]
        addrs: Vec<String>,

        /// Accept addresses which cannot be resolved
        #[arg(long)]
        force: bool,
    },

    /// Check whether nodes can be removed from the cluster
    CheckRemove {
        /// Names of the nodes to remove
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

fn load(path: &Path) -> Result<CorosyncConfFacade, CliError> {
    let text = read_file(path)?;
    match CorosyncConfFacade::from_string(&text) {
        Ok(facade) => Ok(facade),
        Err(e) => {
            print_reports(&corosync::parser::error_to_report_list(e))?;
            Err(CliError::ReportedErrors)
        }
    }
}

impl CorosyncCommand {
    /// Execute the corosync command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = match self.file {
            Some(path) => path,
            None => load_settings(global)?.corosync_conf_path().to_path_buf(),
        };
        let mut facade = load(&path)?;

        match self.action {
            CorosyncAction::Normalize => {
                print!("{}", facade.config_text());
            }
            CorosyncAction::Nodes => {
                for node in facade.get_nodes()? {
                    let mut line = format!(
                        "{} nodeid={}",
                        node.name().unwrap_or("<unnamed>"),
                        node.nodeid().unwrap_or("-")
                    );
                    for addr in node.addrs() {
                        line.push_str(&format!(" link{}={}", addr.link(), addr.addr()));
                    }
                    println!("{line}");
                }
            }
            CorosyncAction::AddNode { name, addrs, force } => {
                let spec = NodeSpec {
                    name: Some(name.clone()),
                    addrs,
                };
                let reports = validators::add_nodes(
                    std::slice::from_ref(&spec),
                    &facade.get_nodes()?,
                    &[],
                    force,
                    &SystemResolver,
                );
                print_reports(&reports)?;
                facade.add_nodes(&[spec]);
                write_file(&path, &facade.config_text())?;
                if !global.quiet {
                    println!("Node '{name}' added");
                }
            }
            CorosyncAction::CheckRemove { names } => {
                let reports = validators::remove_nodes(
                    &names,
                    &facade.get_nodes()?,
                    &facade.get_quorum_device_settings(),
                );
                print_reports(&reports)?;
                if !global.quiet {
                    println!("Nodes can be removed");
                }
            }
        }
        Ok(())
    }
}
