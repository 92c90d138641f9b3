//! Editing of the permissions configuration.

use crate::error::{Error, Result};
use crate::permissions::types::{
    AccessType, ClusterEntry, ClusterPermissions, ConfigV2, PermissionEntry, PermissionTargetType,
};

/// Access granted to the admin group in a new configuration.
pub const DEFAULT_ADMIN_ACCESS: [AccessType; 3] =
    [AccessType::Read, AccessType::Write, AccessType::Grant];

/// Facade over the permissions configuration.
///
/// Each (name, type) pair has at most one entry.
///
/// # Examples
///
/// ```
/// use hacfg::permissions::{AccessType, PermissionEntry, PermissionTargetType, PermissionsFacade};
///
/// let mut facade = PermissionsFacade::create("haclient");
/// facade.set_permission(PermissionEntry::new("alice", PermissionTargetType::User, [AccessType::Read]));
///
/// let entry = facade.get_entry("alice", PermissionTargetType::User).unwrap();
/// assert!(entry.allow.contains(&AccessType::Read));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsFacade {
    config: ConfigV2,
}

impl PermissionsFacade {
    /// Wraps a configuration.
    #[must_use]
    pub fn new(config: ConfigV2) -> Self {
        Self { config }
    }

    /// A new configuration granting [`DEFAULT_ADMIN_ACCESS`] to `admin_group`.
    #[must_use]
    pub fn create(admin_group: &str) -> Self {
        Self::new(ConfigV2 {
            data_version: 1,
            clusters: Vec::new(),
            permissions: ClusterPermissions {
                local_cluster: vec![PermissionEntry::new(
                    admin_group,
                    PermissionTargetType::Group,
                    DEFAULT_ADMIN_ACCESS,
                )],
            },
        })
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ConfigV2 {
        &self.config
    }

    /// Consumes the facade, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> ConfigV2 {
        self.config
    }

    /// Version of the data, incremented on every saved change.
    #[must_use]
    pub fn data_version(&self) -> u64 {
        self.config.data_version
    }

    /// Sets the data version.
    pub fn set_data_version(&mut self, data_version: u64) {
        self.config.data_version = data_version;
    }

    /// Permission entries of the local cluster.
    #[must_use]
    pub fn entries(&self) -> &[PermissionEntry] {
        &self.config.permissions.local_cluster
    }

    /// The entry for a user or group.
    #[must_use]
    pub fn get_entry(&self, name: &str, target_type: PermissionTargetType) -> Option<&PermissionEntry> {
        self.entries()
            .iter()
            .find(|entry| entry.name == name && entry.target_type == target_type)
    }

    /// Sets the entry, replacing a previous one for the same user or group.
    pub fn set_permission(&mut self, entry: PermissionEntry) {
        let entries = &mut self.config.permissions.local_cluster;
        entries.retain(|existing| {
            existing.name != entry.name || existing.target_type != entry.target_type
        });
        entries.push(entry);
    }

    /// Removes exactly the given entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry equals `entry`.
    pub fn remove_permission(&mut self, entry: &PermissionEntry) -> Result<()> {
        let entries = &mut self.config.permissions.local_cluster;
        let Some(position) = entries.iter().position(|existing| existing == entry) else {
            return Err(Error::EntryNotFound {
                name: entry.name.clone(),
                target_type: entry.target_type,
            });
        };
        entries.remove(position);
        Ok(())
    }

    /// Known clusters.
    #[must_use]
    pub fn clusters(&self) -> &[ClusterEntry] {
        &self.config.clusters
    }

    /// Returns `true` if a cluster of the given name is known.
    #[must_use]
    pub fn is_cluster_name_in_use(&self, name: &str) -> bool {
        self.config.clusters.iter().any(|cluster| cluster.name == name)
    }

    /// Adds a cluster.
    pub fn add_cluster(&mut self, cluster: ClusterEntry) {
        self.config.clusters.push(cluster);
    }

    /// Removes clusters of the given names.
    pub fn remove_clusters(&mut self, names: &[String]) {
        self.config
            .clusters
            .retain(|cluster| !names.contains(&cluster.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, allow: &[AccessType]) -> PermissionEntry {
        PermissionEntry::new(name, PermissionTargetType::User, allow.iter().copied())
    }

    #[test]
    fn test_create() {
        let facade = PermissionsFacade::create("haclient");
        assert_eq!(facade.data_version(), 1);
        assert!(facade.clusters().is_empty());
        let entry = facade
            .get_entry("haclient", PermissionTargetType::Group)
            .unwrap();
        assert_eq!(
            entry.allow.iter().copied().collect::<Vec<_>>(),
            DEFAULT_ADMIN_ACCESS.to_vec()
        );
        assert!(facade.get_entry("haclient", PermissionTargetType::User).is_none());
    }

    #[test]
    fn test_set_permission_replaces() {
        let mut facade = PermissionsFacade::create("haclient");
        facade.set_permission(user("alice", &[AccessType::Read]));
        facade.set_permission(PermissionEntry::new(
            "alice",
            PermissionTargetType::Group,
            [AccessType::Grant],
        ));
        facade.set_permission(user("alice", &[AccessType::Write]));

        let alice: Vec<_> = facade
            .entries()
            .iter()
            .filter(|entry| entry.name == "alice")
            .collect();
        assert_eq!(alice.len(), 2);
        assert_eq!(
            facade.entries().last().unwrap(),
            &user("alice", &[AccessType::Write])
        );
    }

    #[test]
    fn test_remove_permission() {
        let mut facade = PermissionsFacade::create("haclient");
        facade.set_permission(user("alice", &[AccessType::Read]));

        let err = facade
            .remove_permission(&user("alice", &[AccessType::Write]))
            .unwrap_err();
        assert!(matches!(err, Error::EntryNotFound { ref name, .. } if name == "alice"));

        facade
            .remove_permission(&user("alice", &[AccessType::Read]))
            .unwrap();
        assert!(facade.get_entry("alice", PermissionTargetType::User).is_none());
    }

    #[test]
    fn test_clusters() {
        let mut facade = PermissionsFacade::create("haclient");
        facade.add_cluster(ClusterEntry {
            name: "c1".into(),
            nodes: vec!["n1".into()],
        });
        facade.add_cluster(ClusterEntry {
            name: "c2".into(),
            nodes: Vec::new(),
        });
        assert!(facade.is_cluster_name_in_use("c1"));
        assert!(!facade.is_cluster_name_in_use("c3"));

        facade.remove_clusters(&["c1".into(), "c3".into()]);
        assert!(!facade.is_cluster_name_in_use("c1"));
        assert_eq!(facade.clusters().len(), 1);
    }

    #[test]
    fn test_data_version() {
        let mut facade = PermissionsFacade::create("haclient");
        facade.set_data_version(42);
        assert_eq!(facade.into_config().data_version, 42);
    }
}
