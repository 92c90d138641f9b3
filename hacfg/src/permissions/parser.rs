//! Permissions file parser and exporter.

use crate::json_file::{self, ParseError};
use crate::permissions::types::ConfigV2;

/// Format version of the permissions file.
pub const FORMAT_VERSION: u64 = 2;

/// Parses the permissions file.
///
/// # Errors
///
/// Returns [`ParseError`] on invalid JSON, a wrong format version, or
/// content not following the schema.
///
/// # Examples
///
/// ```
/// use hacfg::permissions::parser;
///
/// let text = r#"{
///     "format_version": 2,
///     "data_version": 3,
///     "clusters": [],
///     "permissions": {"local_cluster": [
///         {"name": "alice", "type": "user", "allow": ["read"]}
///     ]}
/// }"#;
/// let config = parser::parse(text).unwrap();
/// assert_eq!(config.data_version, 3);
/// assert_eq!(config.permissions.local_cluster[0].name, "alice");
/// ```
pub fn parse(text: &str) -> Result<ConfigV2, ParseError> {
    json_file::parse(text, FORMAT_VERSION)
}

/// Serializes the permissions file.
///
/// # Errors
///
/// Returns a serialization error, which does not happen for valid data.
pub fn export(config: &ConfigV2) -> serde_json::Result<String> {
    json_file::export(config, FORMAT_VERSION)
}
