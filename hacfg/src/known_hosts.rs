//! Known-hosts file.
//!
//! The file maps host names to the token used to authenticate to the host
//! and the addresses it can be reached at:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "data_version": 1,
//!   "known_hosts": {
//!     "node1": {"token": "abcd", "dest_list": [{"addr": "10.0.0.1", "port": 2224}]}
//!   }
//! }
//! ```
//!
//! The host name is stored only as the key of the map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::json_file::{self, ParseError};

/// Format version of the known-hosts file.
pub const FORMAT_VERSION: u64 = 1;

/// Default port of the cluster daemon.
pub const DEFAULT_PORT: u16 = 2224;

/// An address a host can be reached at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Destination {
    /// Address or host name.
    pub addr: String,
    /// TCP port.
    pub port: u16,
}

/// A host known to this node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnownHost {
    /// Host name, the key in the file.
    #[serde(skip_serializing)]
    pub name: String,
    /// Authentication token.
    pub token: String,
    /// Addresses of the host, in order of preference.
    pub dest_list: Vec<Destination>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnownHostsFile {
    data_version: u64,
    known_hosts: BTreeMap<String, KnownHost>,
}

/// Facade over the known-hosts file.
///
/// # Examples
///
/// ```
/// use hacfg::known_hosts::{Destination, KnownHost, KnownHostsFacade};
///
/// let mut facade = KnownHostsFacade::create();
/// facade.update_known_hosts(vec![KnownHost {
///     name: "node1".to_string(),
///     token: "secret".to_string(),
///     dest_list: vec![Destination { addr: "10.0.0.1".to_string(), port: 2224 }],
/// }]);
///
/// let text = facade.export().unwrap();
/// let parsed = KnownHostsFacade::parse(&text).unwrap();
/// assert_eq!(parsed.get_host("node1").unwrap().token, "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHostsFacade {
    data_version: u64,
    known_hosts: BTreeMap<String, KnownHost>,
}

impl KnownHostsFacade {
    /// An empty file.
    #[must_use]
    pub fn create() -> Self {
        Self {
            data_version: 1,
            known_hosts: BTreeMap::new(),
        }
    }

    /// Parses the file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on invalid JSON, a wrong format version, or
    /// content not following the schema.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut root = json_file::parse_root(text, FORMAT_VERSION)?;
        if let Some(Value::Object(hosts)) = root.get_mut("known_hosts") {
            for (name, host) in hosts.iter_mut() {
                let Value::Object(host) = host else {
                    return Err(ParseError::InvalidStructure(format!(
                        "known host '{name}' is not an object"
                    )));
                };
                host.insert("name".to_string(), Value::String(name.clone()));
            }
        }
        let file: KnownHostsFile = json_file::decode(root)?;
        Ok(Self {
            data_version: file.data_version,
            known_hosts: file.known_hosts,
        })
    }

    /// Serializes the file.
    ///
    /// # Errors
    ///
    /// Returns a serialization error, which does not happen for valid data.
    pub fn export(&self) -> serde_json::Result<String> {
        json_file::export(
            &KnownHostsFile {
                data_version: self.data_version,
                known_hosts: self.known_hosts.clone(),
            },
            FORMAT_VERSION,
        )
    }

    /// Version of the data.
    #[must_use]
    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    /// Sets the data version.
    pub fn set_data_version(&mut self, data_version: u64) {
        self.data_version = data_version;
    }

    /// All known hosts by name.
    #[must_use]
    pub fn known_hosts(&self) -> &BTreeMap<String, KnownHost> {
        &self.known_hosts
    }

    /// A host by name.
    #[must_use]
    pub fn get_host(&self, name: &str) -> Option<&KnownHost> {
        self.known_hosts.get(name)
    }

    /// Adds hosts, replacing hosts of the same names.
    pub fn update_known_hosts(&mut self, hosts: impl IntoIterator<Item = KnownHost>) {
        for host in hosts {
            self.known_hosts.insert(host.name.clone(), host);
        }
    }

    /// Removes hosts of the given names.
    pub fn remove_known_hosts(&mut self, names: &[String]) {
        for name in names {
            self.known_hosts.remove(name);
        }
    }
}
