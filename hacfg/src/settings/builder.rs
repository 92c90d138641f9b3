//! Settings builder.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::settings::environment::EnvironmentSettings;
use crate::settings::loader::SettingsLoader;
use crate::settings::merger::SettingsMerger;
use crate::settings::schema::Settings;
use crate::settings::validator::SettingsValidator;

/// Builds settings from all sources.
///
/// Precedence, from the lowest: user settings file, `HACFG_*` environment
/// variables, programmatic overrides.
///
/// # Examples
///
/// ```
/// use hacfg::settings::{Settings, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_settings(Settings {
///         admin_group: Some("wheel".to_string()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(settings.admin_group(), "wheel");
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Settings>,
}

impl SettingsBuilder {
    /// Creates a builder reading all sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from `path` instead of `~/.hacfg/settings.yaml`.
    #[must_use]
    pub fn with_settings_file(mut self, path: &Path) -> Self {
        self.settings_file = Some(path.to_path_buf());
        self
    }

    /// Do not read any settings file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not read environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Settings overriding every other source.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.overrides = Some(settings);
        self
    }

    /// Load, merge and validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be loaded, an environment
    /// variable is invalid, or the result does not validate.
    pub fn build(self) -> Result<Settings> {
        let mut settings = Settings::default();

        if !self.skip_files {
            if let Some(file) = SettingsLoader::load_user_settings(self.settings_file.as_deref())? {
                SettingsMerger::merge_into(&mut settings, &file);
            }
        }

        if !self.skip_env {
            EnvironmentSettings::apply_overrides(&mut settings)?;
        }

        if let Some(ref overrides) = self.overrides {
            SettingsMerger::merge_into(&mut settings, overrides);
        }

        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_only() {
        let settings = SettingsBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_then_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        fs::write(&path, "superuser: fileuser\nadmin_group: filegroup\n").unwrap();

        let settings = SettingsBuilder::new()
            .with_settings_file(&path)
            .skip_env()
            .with_settings(Settings {
                admin_group: Some("override".into()),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(settings.superuser(), "fileuser");
        assert_eq!(settings.admin_group(), "override");
    }

    #[test]
    fn test_invalid_result_rejected() {
        let result = SettingsBuilder::new()
            .skip_files()
            .skip_env()
            .with_settings(Settings {
                admin_group: Some("bad group".into()),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
