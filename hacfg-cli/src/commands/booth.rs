//! Booth configuration commands.

use crate::error::CliError;
use crate::utils::{
    load_settings, parse_key_value, print_reports, read_file, write_file, GlobalOptions,
};
use clap::{Args, Subcommand};
use hacfg::booth::{
    self, from_exchange_format, read_configs, to_exchange_format, validators, BoothConfigFacade,
    ConfigItem,
};
use hacfg::Settings;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the booth config used when no file is given.
const DEFAULT_CONFIG_NAME: &str = "booth.conf";

/// Inspect and edit booth configuration.
#[derive(Args)]
pub struct BoothCommand {
    /// Booth config to use instead of booth.conf in the configured directory
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: BoothAction,
}

/// Booth actions.
#[derive(Subcommand)]
pub enum BoothAction {
    /// Check the config syntax and its sites and arbitrators
    Validate,

    /// List the configs in the booth config directory
    List,

    /// Validate and add a ticket
    AddTicket {
        /// Ticket name
        name: String,

        /// Ticket options
        #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value)]
        options: Vec<(String, String)>,

        /// Accept unknown ticket options
        #[arg(long)]
        force: bool,
    },

    /// Remove a ticket
    RemoveTicket {
        /// Ticket name
        name: String,
    },

    /// Set the authfile path
    SetAuthfile {
        /// Path to the authfile
        path: String,
    },

    /// Remove the authfile
    UnsetAuthfile,

    /// Print the config in the JSON exchange format
    ToExchange,

    /// Print the booth config built from a JSON exchange format file
    FromExchange {
        /// JSON file in the exchange format
        #[arg(value_name = "JSON_FILE")]
        json_file: PathBuf,
    },
}

fn load(path: &Path) -> Result<Vec<ConfigItem>, CliError> {
    let text = read_file(path)?;
    match booth::parser::parse(&text) {
        Ok(items) => Ok(items),
        Err(e) => {
            let path = path.display().to_string();
            print_reports(&booth::parser::error_to_report_list(
                &e,
                None,
                false,
                Some(&path),
            ))?;
            Err(CliError::ReportedErrors)
        }
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(String::from).collect()
}

impl BoothCommand {
    /// Execute the booth command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if let BoothAction::FromExchange { json_file } = &self.action {
            let text = read_file(json_file)?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| CliError::InvalidArguments(format!("{}: {e}", json_file.display())))?;
            let items = from_exchange_format(&value).map_err(hacfg::Error::from)?;
            print!("{}", booth::parser::build(&items));
            return Ok(());
        }

        let settings = load_settings(global)?;
        if let BoothAction::List = self.action {
            return list(&settings);
        }

        let path = self
            .file
            .unwrap_or_else(|| settings.booth_config_dir().join(DEFAULT_CONFIG_NAME));
        let mut facade = BoothConfigFacade::new(load(&path)?, settings.booth_features());

        match self.action {
            BoothAction::Validate => {
                let reports = validators::create(
                    &owned(facade.get_sites()),
                    &owned(facade.get_arbitrators()),
                );
                print_reports(&reports)?;
                if !global.quiet {
                    println!("Booth configuration is valid");
                }
                return Ok(());
            }
            BoothAction::AddTicket {
                name,
                options,
                force,
            } => {
                let options: BTreeMap<String, String> = options.into_iter().collect();
                print_reports(&validators::add_ticket(&facade, &name, &options, force))?;
                facade.add_ticket(&name, options);
            }
            BoothAction::RemoveTicket { name } => {
                print_reports(&validators::remove_ticket(&facade, &name))?;
                facade.remove_ticket(&name);
            }
            BoothAction::SetAuthfile { path } => facade.set_authfile(&path),
            BoothAction::UnsetAuthfile => facade.unset_authfile(),
            BoothAction::ToExchange => {
                let exchange = to_exchange_format(facade.config());
                let json = serde_json::to_string_pretty(&exchange).map_err(hacfg::Error::from)?;
                println!("{json}");
                return Ok(());
            }
            BoothAction::List | BoothAction::FromExchange { .. } => return Ok(()),
        }

        write_file(&path, &booth::parser::build(facade.config()))
    }
}

fn list(settings: &Settings) -> Result<(), CliError> {
    let (configs, reports) = read_configs(settings.booth_config_dir())?;
    print_reports(&reports)?;
    for (name, content) in &configs {
        match booth::parser::parse(content) {
            Ok(items) => {
                let facade = BoothConfigFacade::new(items, settings.booth_features());
                println!(
                    "{name}: sites={} arbitrators={} tickets={}",
                    facade.get_sites().join(","),
                    facade.get_arbitrators().join(","),
                    facade.get_ticket_names().join(",")
                );
            }
            Err(e) => log::warn!("Unable to parse booth config '{name}': {e}"),
        }
    }
    Ok(())
}
