//! Environment variable handling for settings overrides.
//!
//! This module provides support for HACFG_* environment variables that
//! override settings file values.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Handles environment variable overrides for settings.
///
/// # Examples
///
/// ```no_run
/// use hacfg::settings::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_overrides(&mut settings).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply environment variable overrides to settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an invalid value.
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        Self::apply_path("HACFG_COROSYNC_CONF_PATH", &mut settings.corosync_conf_path);
        Self::apply_path("HACFG_BOOTH_CONFIG_DIR", &mut settings.booth_config_dir);
        Self::apply_path("HACFG_PERMISSIONS_PATH", &mut settings.permissions_path);
        Self::apply_path("HACFG_KNOWN_HOSTS_PATH", &mut settings.known_hosts_path);

        if let Ok(superuser) = env::var("HACFG_SUPERUSER") {
            settings.superuser = Some(superuser);
        }

        if let Ok(admin_group) = env::var("HACFG_ADMIN_GROUP") {
            settings.admin_group = Some(admin_group);
        }

        if let Ok(val) = env::var("HACFG_BOOTH_ENABLE_AUTHFILE_SET") {
            settings.booth_enable_authfile_set =
                Some(Self::parse_bool("HACFG_BOOTH_ENABLE_AUTHFILE_SET", &val)?);
        }

        if let Ok(val) = env::var("HACFG_BOOTH_ENABLE_AUTHFILE_UNSET") {
            settings.booth_enable_authfile_unset =
                Some(Self::parse_bool("HACFG_BOOTH_ENABLE_AUTHFILE_UNSET", &val)?);
        }

        Ok(())
    }

    fn apply_path(var: &str, target: &mut Option<PathBuf>) {
        if let Some(value) = env::var_os(var) {
            *target = Some(PathBuf::from(value));
        }
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
