#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # hacfg
//!
//! Configuration model, parsers and validators for Pacemaker/Corosync/Booth
//! high-availability clusters.
//!
//! The library reads and writes the configuration artifacts of a cluster
//! node and checks user supplied changes against the rules of the cluster
//! stack before the resulting files are distributed.
//!
//! ## Modules
//!
//! - [`corosync`]: section tree parser for corosync.conf, node model,
//!   facade and node validators
//! - [`booth`]: booth config parser, facade, validators and exchange format
//! - [`permissions`]: permissions file (format version 2) and access checks
//! - [`known_hosts`]: known-hosts file
//! - [`reports`]: structured report items returned by validators
//! - [`settings`]: file locations and identities, from YAML and environment
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: stderr logger for the `log` facade
//!
//! ## Examples
//!
//! ```
//! use hacfg::corosync::CorosyncConfFacade;
//!
//! let text = "totem {\n    cluster_name: ha\n}\n\nnodelist {\n    node {\n        ring0_addr: 10.0.0.1\n        name: node1\n        nodeid: 1\n    }\n}\n";
//! let facade = CorosyncConfFacade::from_string(text).unwrap();
//! assert_eq!(facade.get_cluster_name(), Some("ha"));
//! assert_eq!(facade.get_nodes().unwrap().len(), 1);
//! ```

pub mod booth;
pub mod corosync;
pub mod error;
pub mod json_file;
pub mod known_hosts;
pub mod logging;
pub mod permissions;
pub mod reports;
pub mod settings;

pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use reports::{ForceCode, ReportItem, ReportItemMessage, ReportItemSeverity};
pub use settings::{Settings, SettingsBuilder};
