//! Read and edit corosync.conf through its section tree.

use std::collections::{BTreeMap, BTreeSet};

use crate::corosync::node::{CorosyncNode, CorosyncNodeAddress, NodeSpec};
use crate::corosync::parser::{parse, ParseError};
use crate::corosync::section::{SectionId, SectionTree};
use crate::error::Result;

/// Transport used when `totem.transport` is not set.
pub const DEFAULT_TRANSPORT: &str = "knet";

/// Quorum device configuration read from `quorum.device`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuorumDeviceSettings {
    /// The `model` attribute, e.g. `net`.
    pub model: Option<String>,
    /// Options of the subsection named after the model.
    pub model_options: BTreeMap<String, String>,
    /// Attributes of the `device` section other than `model`.
    pub generic_options: BTreeMap<String, String>,
    /// Options of the `heuristics` subsection.
    pub heuristics_options: BTreeMap<String, String>,
}

/// Facade over a parsed corosync.conf.
///
/// # Examples
///
/// ```
/// use hacfg::corosync::CorosyncConfFacade;
///
/// let text = "totem {\n    cluster_name: test\n}\n";
/// let facade = CorosyncConfFacade::from_string(text).unwrap();
/// assert_eq!(facade.get_cluster_name(), Some("test"));
/// assert_eq!(facade.config_text(), text);
/// ```
#[derive(Debug, Clone)]
pub struct CorosyncConfFacade {
    tree: SectionTree,
    root: SectionId,
}

fn link_of_attribute(name: &str) -> Option<&str> {
    name.strip_prefix("ring")
        .and_then(|rest| rest.strip_suffix("_addr"))
        .filter(|link| !link.is_empty() && link.chars().all(|c| c.is_ascii_digit()))
}

fn sort_links(links: &mut [String]) {
    links.sort_by_key(|link| (link.parse::<u32>().unwrap_or(u32::MAX), link.clone()));
}

impl CorosyncConfFacade {
    /// Wraps an existing tree.
    #[must_use]
    pub fn new(tree: SectionTree, root: SectionId) -> Self {
        Self { tree, root }
    }

    /// Parses corosync.conf text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the braces are not balanced.
    pub fn from_string(text: &str) -> std::result::Result<Self, ParseError> {
        let (tree, root) = parse(text)?;
        Ok(Self::new(tree, root))
    }

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &SectionTree {
        &self.tree
    }

    /// Root section of the tree.
    #[must_use]
    pub fn root(&self) -> SectionId {
        self.root
    }

    /// Serializes the configuration.
    #[must_use]
    pub fn config_text(&self) -> String {
        self.tree.export(self.root)
    }

    /// Last value of `attribute` across all top-level sections named `section`.
    fn get_section_attribute(&self, section: &str, attribute: &str) -> Option<&str> {
        self.tree
            .get_sections(self.root, Some(section))
            .into_iter()
            .filter_map(|id| self.tree.get_attribute_value(id, attribute))
            .last()
    }

    /// `totem.cluster_name`
    #[must_use]
    pub fn get_cluster_name(&self) -> Option<&str> {
        self.get_section_attribute("totem", "cluster_name")
    }

    /// `totem.transport`, defaulting to knet.
    #[must_use]
    pub fn get_transport(&self) -> &str {
        self.get_section_attribute("totem", "transport")
            .unwrap_or(DEFAULT_TRANSPORT)
    }

    /// `totem.ip_version`
    #[must_use]
    pub fn get_ip_version(&self) -> Option<&str> {
        self.get_section_attribute("totem", "ip_version")
    }

    fn node_sections(&self) -> Vec<SectionId> {
        self.tree
            .get_sections(self.root, Some("nodelist"))
            .into_iter()
            .flat_map(|nodelist| self.tree.get_sections(nodelist, Some("node")))
            .collect()
    }

    /// Nodes defined in `nodelist` sections.
    ///
    /// `ringX_addr` attributes become addresses on link `X`; when a link is
    /// repeated within a node the last value wins.
    ///
    /// # Errors
    ///
    /// Currently infallible for parsed input; returns an error only if a
    /// node could not be built.
    pub fn get_nodes(&self) -> Result<Vec<CorosyncNode>> {
        self.node_sections()
            .into_iter()
            .map(|section| {
                let mut addrs: Vec<CorosyncNodeAddress> = Vec::new();
                for (name, value) in self.tree.get_attributes(section, None) {
                    if let Some(link) = link_of_attribute(name) {
                        addrs.retain(|addr| addr.link() != link);
                        addrs.push(CorosyncNodeAddress::new(value, link));
                    }
                }
                CorosyncNode::new(
                    self.tree.get_attribute_value(section, "name").map(String::from),
                    addrs,
                    self.tree
                        .get_attribute_value(section, "nodeid")
                        .map(String::from),
                )
            })
            .collect()
    }

    /// Distinct links used by the nodes, numerically sorted.
    #[must_use]
    pub fn get_links(&self) -> Vec<String> {
        let links: BTreeSet<String> = self
            .node_sections()
            .into_iter()
            .flat_map(|section| {
                self.tree
                    .get_attributes(section, None)
                    .into_iter()
                    .filter_map(|(name, _)| link_of_attribute(name).map(String::from))
                    .collect::<Vec<_>>()
            })
            .collect();
        let mut links: Vec<String> = links.into_iter().collect();
        sort_links(&mut links);
        links
    }

    /// Number of distinct links used by the nodes.
    #[must_use]
    pub fn get_links_count(&self) -> usize {
        self.get_links().len()
    }

    /// Returns `true` if `quorum.device` is configured.
    #[must_use]
    pub fn has_quorum_device(&self) -> bool {
        self.tree
            .get_sections(self.root, Some("quorum"))
            .into_iter()
            .any(|quorum| !self.tree.get_sections(quorum, Some("device")).is_empty())
    }

    /// Quorum device settings from all `quorum.device` sections.
    #[must_use]
    pub fn get_quorum_device_settings(&self) -> QuorumDeviceSettings {
        let mut settings = QuorumDeviceSettings::default();
        let mut per_model: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for quorum in self.tree.get_sections(self.root, Some("quorum")) {
            for device in self.tree.get_sections(quorum, Some("device")) {
                for (name, value) in self.tree.get_attributes(device, None) {
                    if name == "model" {
                        settings.model = Some(value.to_string());
                    } else {
                        settings
                            .generic_options
                            .insert(name.to_string(), value.to_string());
                    }
                }
                for subsection in self.tree.get_sections(device, None) {
                    let target = if self.tree.name(subsection) == "heuristics" {
                        &mut settings.heuristics_options
                    } else {
                        per_model
                            .entry(self.tree.name(subsection).to_string())
                            .or_default()
                    };
                    for (name, value) in self.tree.get_attributes(subsection, None) {
                        target.insert(name.to_string(), value.to_string());
                    }
                }
            }
        }
        if let Some(model) = &settings.model {
            settings.model_options = per_model.remove(model).unwrap_or_default();
        }
        settings
    }

    fn used_node_ids(&self) -> BTreeSet<u32> {
        self.node_sections()
            .into_iter()
            .filter_map(|section| self.tree.get_attribute_value(section, "nodeid"))
            .filter_map(|nodeid| nodeid.parse().ok())
            .collect()
    }

    /// Appends `node` sections for the given nodes.
    ///
    /// The i-th address of a node goes to the i-th existing link (or link
    /// `i` if there are fewer links). Each node gets the lowest unused node
    /// id starting from 1. A `nodelist` section is created if missing.
    pub fn add_nodes(&mut self, nodes: &[NodeSpec]) {
        let links = self.get_links();
        let mut used_ids = self.used_node_ids();
        let nodelist = match self.tree.get_sections(self.root, Some("nodelist")).last() {
            Some(nodelist) => *nodelist,
            None => self.tree.add_new_section(self.root, "nodelist"),
        };
        for node in nodes {
            let section = self.tree.add_new_section(nodelist, "node");
            for (index, addr) in node.addrs.iter().enumerate() {
                let link = links.get(index).cloned().unwrap_or_else(|| index.to_string());
                self.tree
                    .add_attribute(section, format!("ring{link}_addr"), addr.as_str());
            }
            if let Some(name) = &node.name {
                self.tree.add_attribute(section, "name", name.as_str());
            }
            let nodeid = (1..).find(|id| !used_ids.contains(id)).unwrap_or(1);
            used_ids.insert(nodeid);
            self.tree.add_attribute(section, "nodeid", nodeid.to_string());
        }
    }

    /// Removes `node` sections whose name is in `names`.
    pub fn remove_nodes(&mut self, names: &[String]) {
        for nodelist in self.tree.get_sections(self.root, Some("nodelist")) {
            for node in self.tree.get_sections(nodelist, Some("node")) {
                let matches = self
                    .tree
                    .get_attribute_value(node, "name")
                    .is_some_and(|name| names.iter().any(|n| n == name));
                if matches {
                    self.tree.detach(node);
                }
            }
        }
    }
}
