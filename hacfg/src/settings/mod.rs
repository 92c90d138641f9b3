//! Settings for hacfg.
//!
//! Settings name the managed files and the identities used by the
//! permission checker. They are merged from several sources, from the
//! lowest precedence:
//!
//! 1. Built-in defaults
//! 2. User settings file (`~/.hacfg/settings.yaml`, or an explicit path)
//! 3. Environment variables (`HACFG_*`)
//! 4. Programmatic overrides (via `SettingsBuilder::with_settings`)
//!
//! # Examples
//!
//! ```no_run
//! use hacfg::settings::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new().build().unwrap();
//! println!("corosync.conf: {}", settings.corosync_conf_path().display());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::SettingsBuilder;
pub use environment::EnvironmentSettings;
pub use loader::SettingsLoader;
pub use merger::SettingsMerger;
pub use schema::Settings;
pub use validator::SettingsValidator;
