//! Permissions commands.

use crate::error::CliError;
use crate::utils::{load_settings, print_reports, read_file, GlobalOptions};
use clap::{Args, Subcommand};
use hacfg::json_file;
use hacfg::permissions::{parser, AccessType, AuthUser, PermissionsChecker, PermissionsFacade};
use hacfg::reports::FileType;
use std::path::PathBuf;

/// Inspect the permissions file and check access.
#[derive(Args)]
pub struct PermissionsCommand {
    /// Permissions file to use instead of the configured one
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: PermissionsAction,
}

/// Permissions actions.
#[derive(Subcommand)]
pub enum PermissionsAction {
    /// Show clusters and permission entries
    Show,

    /// Check whether a user has an access level
    Check {
        /// User name
        #[arg(long)]
        user: String,

        /// Groups of the user
        #[arg(long = "group", value_name = "GROUP")]
        groups: Vec<String>,

        /// Access level: read, write, grant, full or superuser
        #[arg(value_parser = parse_access)]
        access: AccessType,
    },
}

fn parse_access(s: &str) -> Result<AccessType, String> {
    s.parse().map_err(|e: hacfg::Error| e.to_string())
}

impl PermissionsCommand {
    /// Execute the permissions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings(global)?;
        let path = self
            .file
            .unwrap_or_else(|| settings.permissions_path().to_path_buf());

        match self.action {
            PermissionsAction::Show => {
                let text = read_file(&path)?;
                let config = match parser::parse(&text) {
                    Ok(config) => config,
                    Err(e) => {
                        let display = path.display().to_string();
                        print_reports(&json_file::error_to_report_list(
                            &e,
                            FileType::PermissionsConfig,
                            Some(&display),
                        ))?;
                        return Err(CliError::ReportedErrors);
                    }
                };
                let facade = PermissionsFacade::new(config);
                println!("data_version: {}", facade.data_version());
                for cluster in facade.clusters() {
                    println!("cluster {}: {}", cluster.name, cluster.nodes.join(","));
                }
                for entry in facade.entries() {
                    let allow: Vec<&str> = entry.allow.iter().map(|a| a.as_str()).collect();
                    println!("{} {}: {}", entry.target_type, entry.name, allow.join(","));
                }
                Ok(())
            }
            PermissionsAction::Check {
                user,
                groups,
                access,
            } => {
                let checker =
                    PermissionsChecker::new(path, settings.superuser(), settings.admin_group());
                let user = AuthUser::new(user, groups);
                if checker.is_authorized(&user, access) {
                    if !global.quiet {
                        println!("allowed");
                    }
                    Ok(())
                } else {
                    Err(CliError::SemanticFailure(format!(
                        "User '{}' does not have '{access}' access",
                        user.username
                    )))
                }
            }
        }
    }
}
