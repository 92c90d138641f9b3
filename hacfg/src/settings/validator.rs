//! Settings validation.

use std::path::Path;

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Validates settings.
///
/// # Examples
///
/// ```
/// use hacfg::settings::{Settings, SettingsValidator};
///
/// SettingsValidator::validate(&Settings::default()).unwrap();
///
/// let bad = Settings { superuser: Some("".to_string()), ..Default::default() };
/// assert!(SettingsValidator::validate(&bad).is_err());
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate all set fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty path or an invalid user or
    /// group name.
    pub fn validate(settings: &Settings) -> Result<()> {
        let paths = [
            ("corosync_conf_path", &settings.corosync_conf_path),
            ("booth_config_dir", &settings.booth_config_dir),
            ("permissions_path", &settings.permissions_path),
            ("known_hosts_path", &settings.known_hosts_path),
        ];
        for (field, path) in paths {
            if let Some(path) = path {
                Self::validate_path(field, path)?;
            }
        }

        if let Some(ref superuser) = settings.superuser {
            Self::validate_identity("superuser", superuser)?;
        }
        if let Some(ref admin_group) = settings.admin_group {
            Self::validate_identity("admin_group", admin_group)?;
        }

        Ok(())
    }

    fn validate_path(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Path cannot be empty".into(),
            });
        }
        Ok(())
    }

    /// Validate a user or group name.
    ///
    /// Names are non-empty and contain no whitespace, colons or null bytes,
    /// and are at most 32 characters long.
    fn validate_identity(field: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty".into(),
            });
        }

        if value
            .chars()
            .any(|c| c.is_whitespace() || c == ':' || c == '\0')
        {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain whitespace, ':' or null bytes".into(),
            });
        }

        if value.chars().count() > 32 {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot exceed 32 characters".into(),
            });
        }

        Ok(())
    }
}
