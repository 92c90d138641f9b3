//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Name of the user settings directory under the home directory.
pub const SETTINGS_DIR: &str = ".hacfg";
/// Name of the settings file.
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Loads settings files.
///
/// # Examples
///
/// ```no_run
/// use hacfg::settings::SettingsLoader;
///
/// if let Some(settings) = SettingsLoader::load_user_settings(None).unwrap() {
///     println!("superuser: {}", settings.superuser());
/// }
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load the user settings file.
    ///
    /// An explicit `path` must exist. Without it, `~/.hacfg/settings.yaml`
    /// is read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// explicit path does not exist.
    pub fn load_user_settings(path: Option<&Path>) -> Result<Option<Settings>> {
        if let Some(path) = path {
            return Self::load_file(path).map(Some);
        }

        let Some(path) = Self::user_settings_path() else {
            log::debug!("No home directory, skipping user settings");
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        log::debug!("Loading settings from {}", path.display());
        Self::load_file(&path).map(Some)
    }

    /// Load and parse a YAML settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read settings file: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Path of the user settings file, if the home directory is known.
    #[must_use]
    pub fn user_settings_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }
}
