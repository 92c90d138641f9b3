//! Permission checks for users.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::permissions::facade::PermissionsFacade;
use crate::permissions::parser;
use crate::permissions::types::{AccessType, PermissionTargetType};
use crate::settings::Settings;

/// Expands access levels with the levels they imply.
///
/// `Superuser` implies everything, `Full` implies `Read`, `Write` and
/// `Grant`, and `Write` implies `Read`. `Grant` implies nothing.
///
/// # Examples
///
/// ```
/// use hacfg::permissions::{complete_access_list, AccessType};
/// use std::collections::BTreeSet;
///
/// let completed = complete_access_list(&BTreeSet::from([AccessType::Write]));
/// assert_eq!(completed, BTreeSet::from([AccessType::Read, AccessType::Write]));
/// ```
#[must_use]
pub fn complete_access_list(access: &BTreeSet<AccessType>) -> BTreeSet<AccessType> {
    if access.contains(&AccessType::Superuser) {
        AccessType::ALL.into_iter().collect()
    } else if access.contains(&AccessType::Full) {
        BTreeSet::from([
            AccessType::Read,
            AccessType::Write,
            AccessType::Grant,
            AccessType::Full,
        ])
    } else if access.contains(&AccessType::Write) {
        let mut completed = access.clone();
        completed.insert(AccessType::Read);
        completed
    } else {
        access.clone()
    }
}

/// An authenticated user with its groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// User name.
    pub username: String,
    /// Names of the groups of the user.
    pub groups: Vec<String>,
}

impl AuthUser {
    /// Creates a user.
    pub fn new(username: impl Into<String>, groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            username: username.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }
}

/// Decides what users may do according to the permissions file.
///
/// A missing, unreadable or invalid file never denies the superuser and
/// falls back to a configuration granting the admin group default access.
#[derive(Debug, Clone)]
pub struct PermissionsChecker {
    path: PathBuf,
    superuser: String,
    admin_group: String,
}

impl PermissionsChecker {
    /// Creates a checker reading the permissions file at `path`.
    pub fn new(path: impl Into<PathBuf>, superuser: impl Into<String>, admin_group: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            superuser: superuser.into(),
            admin_group: admin_group.into(),
        }
    }

    /// Creates a checker from settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.permissions_path(),
            settings.superuser(),
            settings.admin_group(),
        )
    }

    /// The permissions file read by this checker.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_facade(&self) -> PermissionsFacade {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "Permissions file '{}' does not exist, using default permissions",
                    self.path.display()
                );
                return PermissionsFacade::create(&self.admin_group);
            }
            Err(e) => {
                log::error!(
                    "Unable to read permissions file '{}': {e}, using default permissions",
                    self.path.display()
                );
                return PermissionsFacade::create(&self.admin_group);
            }
        };
        match parser::parse(&text) {
            Ok(config) => PermissionsFacade::new(config),
            Err(e) => {
                log::error!(
                    "Unable to parse permissions file '{}': {e}, using default permissions",
                    self.path.display()
                );
                PermissionsFacade::create(&self.admin_group)
            }
        }
    }

    /// All access levels of the user, implied levels included.
    #[must_use]
    pub fn get_permissions(&self, user: &AuthUser) -> BTreeSet<AccessType> {
        if user.username == self.superuser {
            return complete_access_list(&BTreeSet::from([AccessType::Superuser]));
        }

        let facade = self.load_facade();
        let targets = std::iter::once((user.username.as_str(), PermissionTargetType::User)).chain(
            user.groups
                .iter()
                .map(|group| (group.as_str(), PermissionTargetType::Group)),
        );

        let mut permissions = BTreeSet::new();
        for (name, target_type) in targets {
            if let Some(entry) = facade.get_entry(name, target_type) {
                permissions.extend(complete_access_list(&entry.allow));
            }
        }
        permissions
    }

    /// Returns `true` if the user has the access level.
    #[must_use]
    pub fn is_authorized(&self, user: &AuthUser, access: AccessType) -> bool {
        let allowed = self.get_permissions(user).contains(&access);
        if !allowed {
            log::debug!("User '{}' is not allowed '{access}' access", user.username);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::types::PermissionEntry;
    use tempfile::TempDir;

    fn set(access: &[AccessType]) -> BTreeSet<AccessType> {
        access.iter().copied().collect()
    }

    #[test]
    fn test_complete_superuser() {
        assert_eq!(
            complete_access_list(&set(&[AccessType::Superuser])),
            set(&AccessType::ALL)
        );
    }

    #[test]
    fn test_complete_full() {
        assert_eq!(
            complete_access_list(&set(&[AccessType::Full])),
            set(&[
                AccessType::Read,
                AccessType::Write,
                AccessType::Grant,
                AccessType::Full
            ])
        );
    }

    #[test]
    fn test_complete_write() {
        assert_eq!(
            complete_access_list(&set(&[AccessType::Write])),
            set(&[AccessType::Read, AccessType::Write])
        );
        assert_eq!(
            complete_access_list(&set(&[AccessType::Write, AccessType::Grant])),
            set(&[AccessType::Read, AccessType::Write, AccessType::Grant])
        );
    }

    #[test]
    fn test_complete_unchanged() {
        for access in [set(&[]), set(&[AccessType::Read]), set(&[AccessType::Grant])] {
            assert_eq!(complete_access_list(&access), access);
        }
    }

    fn write_permissions(dir: &TempDir, entries: Vec<PermissionEntry>) -> PathBuf {
        let mut facade = PermissionsFacade::create("haclient");
        for entry in entries {
            facade.set_permission(entry);
        }
        let path = dir.path().join("permissions.json");
        fs::write(&path, parser::export(facade.config()).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_union_of_completed_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_permissions(
            &dir,
            vec![
                PermissionEntry::new("alice", PermissionTargetType::User, [AccessType::Write]),
                PermissionEntry::new("ops", PermissionTargetType::Group, [AccessType::Grant]),
            ],
        );
        let checker = PermissionsChecker::new(path, "hacluster", "haclient");
        let alice = AuthUser::new("alice", ["ops"]);

        assert_eq!(
            checker.get_permissions(&alice),
            set(&[AccessType::Read, AccessType::Write, AccessType::Grant])
        );
        assert!(checker.is_authorized(&alice, AccessType::Read));
        assert!(!checker.is_authorized(&alice, AccessType::Full));
    }

    #[test]
    fn test_user_entry_does_not_match_group_of_same_name() {
        let dir = TempDir::new().unwrap();
        let path = write_permissions(
            &dir,
            vec![PermissionEntry::new("ops", PermissionTargetType::User, [AccessType::Full])],
        );
        let checker = PermissionsChecker::new(path, "hacluster", "haclient");
        assert!(checker
            .get_permissions(&AuthUser::new("bob", ["ops"]))
            .is_empty());
    }

    #[test]
    fn test_superuser_bypasses_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("permissions.json");
        fs::write(&path, "not json").unwrap();
        let checker = PermissionsChecker::new(path, "hacluster", "haclient");
        assert_eq!(
            checker.get_permissions(&AuthUser::new("hacluster", Vec::<String>::new())),
            set(&AccessType::ALL)
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_admin_group() {
        let dir = TempDir::new().unwrap();
        let checker = PermissionsChecker::new(dir.path().join("missing.json"), "hacluster", "haclient");
        assert_eq!(
            checker.get_permissions(&AuthUser::new("carol", ["haclient"])),
            set(&[AccessType::Read, AccessType::Write, AccessType::Grant])
        );
        assert!(checker
            .get_permissions(&AuthUser::new("carol", ["users"]))
            .is_empty());
    }

    #[test]
    fn test_invalid_file_falls_back_to_admin_group() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("permissions.json");
        fs::write(&path, r#"{"format_version": 1}"#).unwrap();
        let checker = PermissionsChecker::new(path, "hacluster", "wheel");
        assert!(checker.is_authorized(&AuthUser::new("dave", ["wheel"]), AccessType::Grant));
    }

    #[test]
    fn test_unreadable_file_falls_back_to_admin_group() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file.
        let checker = PermissionsChecker::new(dir.path(), "hacluster", "haclient");
        assert!(checker.is_authorized(&AuthUser::new("erin", ["haclient"]), AccessType::Write));
    }
}
