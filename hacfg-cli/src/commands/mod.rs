//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `corosync`: normalize, list nodes, add a node, check node removal
//! - `booth`: validate, list configs, edit tickets and authfile, exchange format
//! - `permissions`: show entries, check access
//! - `known_hosts`: list known hosts
//! - `completions`: shell completion scripts

pub mod booth;
pub mod completions;
pub mod corosync;
pub mod known_hosts;
pub mod permissions;

pub use booth::BoothCommand;
pub use completions::CompletionsCommand;
pub use corosync::CorosyncCommand;
pub use known_hosts::KnownHostsCommand;
pub use permissions::PermissionsCommand;
