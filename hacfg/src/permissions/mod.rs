//! Permissions configuration and access checks.
//!
//! The permissions file (format version 2) lists the clusters known to the
//! node and the access levels granted to users and groups. A
//! [`PermissionsChecker`] answers what a user may do, expanding each
//! granted level with the levels it implies.
//!
//! # Examples
//!
//! ```
//! use hacfg::permissions::{parser, AccessType, PermissionEntry, PermissionTargetType, PermissionsFacade};
//!
//! let mut facade = PermissionsFacade::create("haclient");
//! facade.set_permission(PermissionEntry::new("alice", PermissionTargetType::User, [AccessType::Full]));
//!
//! let text = parser::export(facade.config()).unwrap();
//! assert_eq!(&parser::parse(&text).unwrap(), facade.config());
//! ```

pub mod checker;
pub mod facade;
pub mod parser;
pub mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use checker::{complete_access_list, AuthUser, PermissionsChecker};
pub use facade::{PermissionsFacade, DEFAULT_ADMIN_ACCESS};
pub use types::{
    AccessType, ClusterEntry, ClusterPermissions, ConfigV2, PermissionEntry, PermissionTargetType,
};
