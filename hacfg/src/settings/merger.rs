//! Settings merging and precedence handling.

use crate::settings::schema::Settings;

/// Merges settings sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use hacfg::settings::{Settings, SettingsMerger};
///
/// let low = Settings { superuser: Some("low".to_string()), ..Default::default() };
/// let high = Settings { superuser: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// SettingsMerger::merge_into(&mut result, &high);
/// assert_eq!(result.superuser, Some("high".to_string()));
/// ```
pub struct SettingsMerger;

impl SettingsMerger {
    /// Merge sources given from the lowest to the highest precedence.
    #[must_use]
    pub fn merge(sources: &[Settings]) -> Settings {
        let mut result = Settings::default();
        for source in sources {
            Self::merge_into(&mut result, source);
        }
        result
    }

    /// Merge source settings into target. Fields set in `source` win.
    pub fn merge_into(target: &mut Settings, source: &Settings) {
        if source.corosync_conf_path.is_some() {
            target.corosync_conf_path.clone_from(&source.corosync_conf_path);
        }
        if source.booth_config_dir.is_some() {
            target.booth_config_dir.clone_from(&source.booth_config_dir);
        }
        if source.permissions_path.is_some() {
            target.permissions_path.clone_from(&source.permissions_path);
        }
        if source.known_hosts_path.is_some() {
            target.known_hosts_path.clone_from(&source.known_hosts_path);
        }
        if source.superuser.is_some() {
            target.superuser.clone_from(&source.superuser);
        }
        if source.admin_group.is_some() {
            target.admin_group.clone_from(&source.admin_group);
        }
        if source.booth_enable_authfile_set.is_some() {
            target.booth_enable_authfile_set = source.booth_enable_authfile_set;
        }
        if source.booth_enable_authfile_unset.is_some() {
            target.booth_enable_authfile_unset = source.booth_enable_authfile_unset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_merge_none_values_dont_overwrite() {
        let mut target = Settings {
            superuser: Some("root".into()),
            booth_enable_authfile_set: Some(true),
            ..Default::default()
        };
        SettingsMerger::merge_into(&mut target, &Settings::default());
        assert_eq!(target.superuser, Some("root".into()));
        assert_eq!(target.booth_enable_authfile_set, Some(true));
    }

    #[test]
    fn test_merge_multiple_sources() {
        let sources = [
            Settings {
                permissions_path: Some(PathBuf::from("/a")),
                admin_group: Some("wheel".into()),
                ..Default::default()
            },
            Settings {
                permissions_path: Some(PathBuf::from("/b")),
                booth_enable_authfile_unset: Some(false),
                ..Default::default()
            },
        ];
        let merged = SettingsMerger::merge(&sources);
        assert_eq!(merged.permissions_path, Some(PathBuf::from("/b")));
        assert_eq!(merged.admin_group, Some("wheel".into()));
        assert_eq!(merged.booth_enable_authfile_unset, Some(false));
        assert_eq!(merged.superuser, None);
    }
}
