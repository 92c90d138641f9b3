//! Permission data model, format version 2.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An access level.
///
/// Levels are ordered from the weakest: `Read`, `Write`, `Grant`, `Full`,
/// `Superuser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Read the configuration.
    Read,
    /// Change the configuration.
    Write,
    /// Change permissions.
    Grant,
    /// Read, write and grant.
    Full,
    /// Everything, including actions reserved for the superuser.
    Superuser,
}

impl AccessType {
    /// All access levels.
    pub const ALL: [AccessType; 5] = [
        Self::Read,
        Self::Write,
        Self::Grant,
        Self::Full,
        Self::Superuser,
    ];

    /// The lowercase name used in files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Grant => "grant",
            Self::Full => "full",
            Self::Superuser => "superuser",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|access| access.as_str() == s)
            .ok_or_else(|| Error::Validation {
                field: "access".into(),
                message: format!(
                    "'{s}' is not one of {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ),
            })
    }
}

/// Whether a permission entry applies to a user or to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionTargetType {
    /// A user name.
    User,
    /// A group name.
    Group,
}

impl fmt::Display for PermissionTargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Group => write!(f, "group"),
        }
    }
}

/// Access granted to one user or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionEntry {
    /// User or group name.
    pub name: String,
    /// Whether `name` is a user or a group.
    #[serde(rename = "type")]
    pub target_type: PermissionTargetType,
    /// Granted access levels.
    pub allow: BTreeSet<AccessType>,
}

impl PermissionEntry {
    /// Creates an entry.
    pub fn new(
        name: impl Into<String>,
        target_type: PermissionTargetType,
        allow: impl IntoIterator<Item = AccessType>,
    ) -> Self {
        Self {
            name: name.into(),
            target_type,
            allow: allow.into_iter().collect(),
        }
    }
}

/// A cluster known to this node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterEntry {
    /// Cluster name.
    pub name: String,
    /// Names of the cluster nodes.
    pub nodes: Vec<String>,
}

/// Permissions per cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterPermissions {
    /// Entries for the local cluster.
    pub local_cluster: Vec<PermissionEntry>,
}

/// Content of the permissions file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigV2 {
    /// Incremented on every change of the file.
    pub data_version: u64,
    /// Known clusters.
    pub clusters: Vec<ClusterEntry>,
    /// Granted permissions.
    pub permissions: ClusterPermissions,
}
