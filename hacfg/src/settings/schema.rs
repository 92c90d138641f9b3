//! Settings schema definitions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::booth::BoothFeatures;

/// Default location of corosync.conf.
pub const DEFAULT_COROSYNC_CONF_PATH: &str = "/etc/corosync/corosync.conf";
/// Default directory of booth configs.
pub const DEFAULT_BOOTH_CONFIG_DIR: &str = "/etc/booth";
/// Default location of the permissions file.
pub const DEFAULT_PERMISSIONS_PATH: &str = "/var/lib/hacfg/permissions.json";
/// Default location of the known-hosts file.
pub const DEFAULT_KNOWN_HOSTS_PATH: &str = "/var/lib/hacfg/known-hosts";
/// Default superuser, which bypasses permission checks.
pub const DEFAULT_SUPERUSER: &str = "hacluster";
/// Default admin group, granted access in a new permissions file.
pub const DEFAULT_ADMIN_GROUP: &str = "haclient";

/// Complete settings structure.
///
/// Every field is optional so that sources can be merged. The resolved
/// accessors fall back to the built-in defaults.
///
/// # Examples
///
/// ```
/// use hacfg::settings::Settings;
/// use std::path::Path;
///
/// let settings = Settings {
///     superuser: Some("root".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(settings.superuser(), "root");
/// assert_eq!(settings.booth_config_dir(), Path::new("/etc/booth"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Path to corosync.conf.
    pub corosync_conf_path: Option<PathBuf>,

    /// Directory holding booth configs.
    pub booth_config_dir: Option<PathBuf>,

    /// Path to the permissions file.
    pub permissions_path: Option<PathBuf>,

    /// Path to the known-hosts file.
    pub known_hosts_path: Option<PathBuf>,

    /// User which always has full access.
    pub superuser: Option<String>,

    /// Group granted access when no permissions file exists.
    pub admin_group: Option<String>,

    /// Set `enable-authfile` together with the booth authfile.
    pub booth_enable_authfile_set: Option<bool>,

    /// Remove `enable-authfile` together with the booth authfile.
    pub booth_enable_authfile_unset: Option<bool>,
}

impl Settings {
    /// Path to corosync.conf.
    #[must_use]
    pub fn corosync_conf_path(&self) -> &Path {
        self.corosync_conf_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_COROSYNC_CONF_PATH))
    }

    /// Directory holding booth configs.
    #[must_use]
    pub fn booth_config_dir(&self) -> &Path {
        self.booth_config_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_BOOTH_CONFIG_DIR))
    }

    /// Path to the permissions file.
    #[must_use]
    pub fn permissions_path(&self) -> &Path {
        self.permissions_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PERMISSIONS_PATH))
    }

    /// Path to the known-hosts file.
    #[must_use]
    pub fn known_hosts_path(&self) -> &Path {
        self.known_hosts_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_KNOWN_HOSTS_PATH))
    }

    /// The superuser.
    #[must_use]
    pub fn superuser(&self) -> &str {
        self.superuser.as_deref().unwrap_or(DEFAULT_SUPERUSER)
    }

    /// The admin group.
    #[must_use]
    pub fn admin_group(&self) -> &str {
        self.admin_group.as_deref().unwrap_or(DEFAULT_ADMIN_GROUP)
    }

    /// Booth editing switches.
    #[must_use]
    pub fn booth_features(&self) -> BoothFeatures {
        BoothFeatures {
            enable_authfile_set: self.booth_enable_authfile_set.unwrap_or(false),
            enable_authfile_unset: self.booth_enable_authfile_unset.unwrap_or(false),
        }
    }
}
