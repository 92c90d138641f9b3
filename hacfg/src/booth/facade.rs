//! Editing of booth configurations.

use crate::booth::config_structure::{ConfigItem, AUTHFILE_FIX_OPTION};

/// Behavior switches for booth configuration editing.
///
/// Some booth versions ignore `authfile` unless `enable-authfile = yes` is
/// set as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoothFeatures {
    /// Set `enable-authfile = yes` together with `authfile`.
    pub enable_authfile_set: bool,
    /// Remove `enable-authfile` together with `authfile`.
    pub enable_authfile_unset: bool,
}

/// Facade over a list of booth configuration items.
///
/// # Examples
///
/// ```
/// use hacfg::booth::{BoothConfigFacade, BoothFeatures, ConfigItem};
///
/// let mut facade = BoothConfigFacade::new(Vec::new(), BoothFeatures::default());
/// facade.set_authfile("/path/to/auth.file");
/// assert_eq!(facade.config(), &[ConfigItem::new("authfile", "/path/to/auth.file")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoothConfigFacade {
    config: Vec<ConfigItem>,
    features: BoothFeatures,
}

impl BoothConfigFacade {
    /// Wraps configuration items.
    #[must_use]
    pub fn new(config: Vec<ConfigItem>, features: BoothFeatures) -> Self {
        Self { config, features }
    }

    /// The configuration items.
    #[must_use]
    pub fn config(&self) -> &[ConfigItem] {
        &self.config
    }

    /// Consumes the facade, returning the items.
    #[must_use]
    pub fn into_config(self) -> Vec<ConfigItem> {
        self.config
    }

    /// The feature switches in use.
    #[must_use]
    pub const fn features(&self) -> BoothFeatures {
        self.features
    }

    fn values_of(&self, key: &str) -> Vec<&str> {
        self.config
            .iter()
            .filter(|item| item.key() == key)
            .map(ConfigItem::value)
            .collect()
    }

    /// Addresses of the sites in configuration order.
    #[must_use]
    pub fn get_sites(&self) -> Vec<&str> {
        self.values_of("site")
    }

    /// Addresses of the arbitrators in configuration order.
    #[must_use]
    pub fn get_arbitrators(&self) -> Vec<&str> {
        self.values_of("arbitrator")
    }

    /// Names of the tickets in configuration order.
    #[must_use]
    pub fn get_ticket_names(&self) -> Vec<&str> {
        self.values_of("ticket")
    }

    /// Returns `true` if a ticket of the given name exists.
    #[must_use]
    pub fn has_ticket(&self, ticket_name: &str) -> bool {
        self.config.iter().any(|item| item.is_ticket(ticket_name))
    }

    /// Appends a ticket with options sorted by key.
    ///
    /// The name is not checked for duplicates, see
    /// [`validators::add_ticket`](crate::booth::validators::add_ticket).
    pub fn add_ticket<K, V>(&mut self, ticket_name: &str, options: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut options: Vec<(String, String)> = options
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        options.sort();
        let details = options
            .into_iter()
            .map(|(key, value)| ConfigItem::new(key, value))
            .collect();
        self.config
            .push(ConfigItem::with_details("ticket", ticket_name, details));
    }

    /// Removes every ticket of the given name.
    pub fn remove_ticket(&mut self, ticket_name: &str) {
        self.config.retain(|item| !item.is_ticket(ticket_name));
    }

    /// Replaces all top-level items of `key` with one item at the front.
    ///
    /// An empty value only removes the key.
    pub fn set_option(&mut self, key: &str, value: &str) {
        self.config.retain(|item| item.key() != key);
        if !value.is_empty() {
            self.config.insert(0, ConfigItem::new(key, value));
        }
    }

    /// Value of the last top-level item of `key`.
    #[must_use]
    pub fn get_option(&self, key: &str) -> Option<&str> {
        self.config
            .iter()
            .rev()
            .find(|item| item.key() == key)
            .map(ConfigItem::value)
    }

    /// Path of the authfile, if set.
    #[must_use]
    pub fn get_authfile(&self) -> Option<&str> {
        self.get_option("authfile")
    }

    /// Sets the authfile path.
    pub fn set_authfile(&mut self, path: &str) {
        if self.features.enable_authfile_set {
            self.set_option(AUTHFILE_FIX_OPTION, "yes");
        }
        self.set_option("authfile", path);
    }

    /// Removes the authfile.
    pub fn unset_authfile(&mut self) {
        if self.features.enable_authfile_unset {
            self.set_option(AUTHFILE_FIX_OPTION, "");
        }
        self.set_option("authfile", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoothConfigFacade {
        BoothConfigFacade::new(
            vec![
                ConfigItem::new("site", "1.1.1.1"),
                ConfigItem::new("arbitrator", "3.3.3.3"),
                ConfigItem::new("site", "2.2.2.2"),
                ConfigItem::with_details("ticket", "TA", vec![ConfigItem::new("expire", "10")]),
                ConfigItem::new("ticket", "TB"),
            ],
            BoothFeatures::default(),
        )
    }

    #[test]
    fn test_peers_and_tickets() {
        let facade = sample();
        assert_eq!(facade.get_sites(), vec!["1.1.1.1", "2.2.2.2"]);
        assert_eq!(facade.get_arbitrators(), vec!["3.3.3.3"]);
        assert_eq!(facade.get_ticket_names(), vec!["TA", "TB"]);
        assert!(facade.has_ticket("TA"));
        assert!(!facade.has_ticket("TC"));
    }

    #[test]
    fn test_add_ticket_sorts_options() {
        let mut facade = BoothConfigFacade::new(Vec::new(), BoothFeatures::default());
        facade.add_ticket("TC", [("timeout", "10"), ("expire", "100"), ("mode", "manual")]);
        assert_eq!(
            facade.config(),
            &[ConfigItem::with_details(
                "ticket",
                "TC",
                vec![
                    ConfigItem::new("expire", "100"),
                    ConfigItem::new("mode", "manual"),
                    ConfigItem::new("timeout", "10"),
                ]
            )]
        );
    }

    #[test]
    fn test_remove_ticket_removes_duplicates() {
        let mut facade = sample();
        facade.add_ticket("TA", Vec::<(String, String)>::new());
        facade.remove_ticket("TA");
        assert_eq!(facade.get_ticket_names(), vec!["TB"]);
        facade.remove_ticket("missing");
        assert_eq!(facade.get_ticket_names(), vec!["TB"]);
    }

    #[test]
    fn test_set_option_replaces_and_moves_to_front() {
        let mut facade = sample();
        facade.set_option("site", "9.9.9.9");
        assert_eq!(facade.config()[0], ConfigItem::new("site", "9.9.9.9"));
        assert_eq!(facade.get_sites(), vec!["9.9.9.9"]);

        facade.set_option("site", "");
        assert!(facade.get_sites().is_empty());
    }

    #[test]
    fn test_get_option_last_wins() {
        let facade = BoothConfigFacade::new(
            vec![ConfigItem::new("port", "1"), ConfigItem::new("port", "2")],
            BoothFeatures::default(),
        );
        assert_eq!(facade.get_option("port"), Some("2"));
        assert_eq!(facade.get_option("transport"), None);
    }

    #[test]
    fn test_set_authfile_on_empty_config() {
        let mut facade = BoothConfigFacade::new(Vec::new(), BoothFeatures::default());
        facade.set_authfile("/path/to/auth.file");
        assert_eq!(
            facade.config(),
            &[ConfigItem::new("authfile", "/path/to/auth.file")]
        );
        assert_eq!(facade.get_authfile(), Some("/path/to/auth.file"));
    }

    #[test]
    fn test_set_authfile_with_fix() {
        let features = BoothFeatures {
            enable_authfile_set: true,
            enable_authfile_unset: true,
        };
        let mut facade = BoothConfigFacade::new(vec![ConfigItem::new("site", "1.1.1.1")], features);
        facade.set_authfile("/path/to/auth.file");
        assert_eq!(
            facade.config(),
            &[
                ConfigItem::new("authfile", "/path/to/auth.file"),
                ConfigItem::new(AUTHFILE_FIX_OPTION, "yes"),
                ConfigItem::new("site", "1.1.1.1"),
            ]
        );

        facade.unset_authfile();
        assert_eq!(facade.config(), &[ConfigItem::new("site", "1.1.1.1")]);
    }

    #[test]
    fn test_unset_authfile_keeps_fix_option_by_default() {
        let mut facade = BoothConfigFacade::new(
            vec![
                ConfigItem::new(AUTHFILE_FIX_OPTION, "yes"),
                ConfigItem::new("authfile", "/a"),
            ],
            BoothFeatures::default(),
        );
        facade.unset_authfile();
        assert_eq!(facade.config(), &[ConfigItem::new(AUTHFILE_FIX_OPTION, "yes")]);
    }
}
