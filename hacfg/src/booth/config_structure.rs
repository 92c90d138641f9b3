//! Booth configuration items and the key classification.

use serde::{Deserialize, Serialize};

/// Keys which always live at the top level of a booth configuration.
pub const GLOBAL_KEYS: &[&str] = &[
    "transport",
    "port",
    "name",
    "authfile",
    "maxtimeskew",
    "site",
    "arbitrator",
    "site-user",
    "site-group",
    "arbitrator-user",
    "arbitrator-group",
    "debug",
    "ticket",
];

/// Options allowed in the details of a ticket.
pub const TICKET_KEYS: &[&str] = &[
    "acquire-after",
    "attr-prereq",
    "before-acquire-handler",
    "expire",
    "renewal-freq",
    "retries",
    "timeout",
    "weights",
    "mode",
];

/// Option set to `yes` together with `authfile` on booth versions which
/// need it to honor the authfile.
pub const AUTHFILE_FIX_OPTION: &str = "enable-authfile";

/// Returns `true` if `key` is a global key.
#[must_use]
pub fn is_global_key(key: &str) -> bool {
    GLOBAL_KEYS.contains(&key)
}

/// One line of a booth configuration, with indented sub-items.
///
/// Items are immutable values: editing a configuration builds a new list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigItem {
    key: String,
    value: String,
    #[serde(default)]
    details: Vec<ConfigItem>,
}

impl ConfigItem {
    /// Creates an item without details.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_details(key, value, Vec::new())
    }

    /// Creates an item with details.
    pub fn with_details(
        key: impl Into<String>,
        value: impl Into<String>,
        details: Vec<ConfigItem>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            details,
        }
    }

    /// Item key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Item value, unquoted.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Nested items.
    #[must_use]
    pub fn details(&self) -> &[ConfigItem] {
        &self.details
    }

    /// Returns `true` for a `ticket` item named `name`.
    #[must_use]
    pub fn is_ticket(&self, name: &str) -> bool {
        self.key == "ticket" && self.value == name
    }
}
