//! Generic nested-section configuration tree.
//!
//! A [`SectionTree`] is an arena of sections. Each section has a name, an
//! ordered list of `key: value` attributes (duplicates allowed) and an
//! ordered list of child sections. Sections are addressed by [`SectionId`]
//! handles; the parent link of a section is a handle as well, so moving a
//! section never copies it.
//!
//! Sections which get detached from their parent stay in the arena until the
//! tree is dropped.

use std::fmt::Write as _;

use crate::error::{Error, Result};

/// Default indentation used by [`SectionTree::export`].
pub const DEFAULT_INDENT: &str = "    ";

/// Handle of a section inside a [`SectionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(usize);

#[derive(Debug, Clone)]
struct SectionNode {
    name: String,
    parent: Option<SectionId>,
    attributes: Vec<(String, String)>,
    children: Vec<SectionId>,
}

/// Arena holding sections and their parent/child links.
///
/// # Examples
///
/// ```
/// use hacfg::corosync::SectionTree;
///
/// let mut tree = SectionTree::new();
/// let root = tree.new_section("");
/// let totem = tree.new_section("totem");
/// tree.add_attribute(totem, "version", "2");
/// tree.add_section(root, totem).unwrap();
///
/// assert_eq!(tree.export(root), "totem {\n    version: 2\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionTree {
    nodes: Vec<SectionNode>,
}

/// Owned, structurally comparable copy of a section and its subtree.
///
/// Two snapshots are equal when names, attributes (including order) and
/// subsections (recursively, including order) are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionData {
    /// Section name.
    pub name: String,
    /// Attributes in order.
    pub attributes: Vec<(String, String)>,
    /// Subsections in order.
    pub sections: Vec<SectionData>,
}

impl SectionTree {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached, empty section.
    pub fn new_section(&mut self, name: impl Into<String>) -> SectionId {
        let id = SectionId(self.nodes.len());
        self.nodes.push(SectionNode {
            name: name.into(),
            parent: None,
            attributes: Vec::new(),
            children: Vec::new(),
        });
        id
    }

    /// Creates an empty section and appends it to the subsections of `parent`.
    pub fn add_new_section(&mut self, parent: SectionId, name: impl Into<String>) -> SectionId {
        let id = self.new_section(name);
        self.node_mut(id).parent = Some(parent);
        self.node_mut(parent).children.push(id);
        id
    }

    fn node(&self, id: SectionId) -> &SectionNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: SectionId) -> &mut SectionNode {
        &mut self.nodes[id.0]
    }

    /// Name of the section.
    #[must_use]
    pub fn name(&self, id: SectionId) -> &str {
        &self.node(id).name
    }

    /// Parent of the section, `None` for a root or detached section.
    #[must_use]
    pub fn parent(&self, id: SectionId) -> Option<SectionId> {
        self.node(id).parent
    }

    /// The topmost ancestor of the section (the section itself if it has no parent).
    #[must_use]
    pub fn get_root(&self, id: SectionId) -> SectionId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Returns `true` if the section has neither attributes nor subsections.
    #[must_use]
    pub fn is_empty(&self, id: SectionId) -> bool {
        let node = self.node(id);
        node.attributes.is_empty() && node.children.is_empty()
    }

    /// Direct subsections in order.
    #[must_use]
    pub fn children(&self, id: SectionId) -> &[SectionId] {
        &self.node(id).children
    }

    /// Direct subsections, optionally filtered by name.
    #[must_use]
    pub fn get_sections(&self, id: SectionId, name: Option<&str>) -> Vec<SectionId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| name.map_or(true, |name| self.name(*child) == name))
            .collect()
    }

    /// Attributes in order, optionally filtered by key.
    #[must_use]
    pub fn get_attributes(&self, id: SectionId, name: Option<&str>) -> Vec<(&str, &str)> {
        self.node(id)
            .attributes
            .iter()
            .filter(|(key, _)| name.map_or(true, |name| key == name))
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    /// Value of the last attribute with the given key.
    #[must_use]
    pub fn get_attribute_value(&self, id: SectionId, name: &str) -> Option<&str> {
        self.node(id)
            .attributes
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Appends an attribute.
    pub fn add_attribute(&mut self, id: SectionId, key: impl Into<String>, value: impl Into<String>) {
        self.node_mut(id)
            .attributes
            .push((key.into(), value.into()));
    }

    /// Sets an attribute.
    ///
    /// The first attribute with the key gets the new value in place, all
    /// other attributes with the key are removed. If there is none, the
    /// attribute is appended.
    pub fn set_attribute(&mut self, id: SectionId, key: &str, value: impl Into<String>) {
        let value = value.into();
        let attributes = &mut self.node_mut(id).attributes;
        match attributes.iter().position(|(name, _)| name == key) {
            Some(first) => {
                attributes[first].1 = value;
                let mut index = 0;
                attributes.retain(|(name, _)| {
                    let keep = index == first || name != key;
                    index += 1;
                    keep
                });
            }
            None => attributes.push((key.to_string(), value)),
        }
    }

    /// Removes all attributes matching both key and value.
    pub fn del_attribute(&mut self, id: SectionId, key: &str, value: &str) {
        self.node_mut(id)
            .attributes
            .retain(|(name, val)| !(name == key && val == value));
    }

    /// Removes all attributes with the key, optionally only those with the value.
    pub fn del_attributes_by_name(&mut self, id: SectionId, key: &str, value: Option<&str>) {
        self.node_mut(id)
            .attributes
            .retain(|(name, val)| !(name == key && value.map_or(true, |value| val == value)));
    }

    /// Returns `true` if `ancestor` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: SectionId, id: SectionId) -> bool {
        let mut current = Some(id);
        while let Some(section) = current {
            if section == ancestor {
                return true;
            }
            current = self.parent(section);
        }
        false
    }

    /// Moves `child` under `parent`, appending it to the subsections.
    ///
    /// If `child` already has a parent it is detached from it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CircularParentship`] if `child` is `parent` or one
    /// of its ancestors.
    pub fn add_section(&mut self, parent: SectionId, child: SectionId) -> Result<()> {
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::CircularParentship {
                parent: self.name(parent).to_string(),
                child: self.name(child).to_string(),
            });
        }
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        Ok(())
    }

    /// Removes `child` from the subsections of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotASubsection`] if `child` is not a direct
    /// subsection of `parent`.
    pub fn del_section(&mut self, parent: SectionId, child: SectionId) -> Result<()> {
        if self.parent(child) != Some(parent) {
            return Err(Error::NotASubsection {
                parent: self.name(parent).to_string(),
                child: self.name(child).to_string(),
            });
        }
        self.detach(child);
        Ok(())
    }

    /// Detaches the section from its parent, if any.
    pub fn detach(&mut self, id: SectionId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    /// Owned structural copy of the section's subtree.
    #[must_use]
    pub fn snapshot(&self, id: SectionId) -> SectionData {
        let node = self.node(id);
        SectionData {
            name: node.name.clone(),
            attributes: node.attributes.clone(),
            sections: node
                .children
                .iter()
                .map(|child| self.snapshot(*child))
                .collect(),
        }
    }

    /// Serializes the section with the default indentation.
    #[must_use]
    pub fn export(&self, id: SectionId) -> String {
        self.export_with_indent(id, DEFAULT_INDENT)
    }

    /// Serializes the section.
    ///
    /// A root section (one without a parent) is written as its bare content.
    /// Any other section is wrapped in `name { ... }`.
    #[must_use]
    pub fn export_with_indent(&self, id: SectionId, indent: &str) -> String {
        if self.parent(id).is_some() {
            self.export_wrapped(id, indent)
        } else {
            self.export_body(id, indent)
        }
    }

    fn export_body(&self, id: SectionId, indent: &str) -> String {
        let node = self.node(id);
        let mut out = String::new();
        for (key, value) in &node.attributes {
            let _ = writeln!(out, "{key}: {value}");
        }
        if !node.attributes.is_empty() && !node.children.is_empty() {
            out.push('\n');
        }
        let count = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            out.push_str(&self.export_wrapped(*child, indent));
            if index + 1 < count {
                out.push('\n');
            }
        }
        out
    }

    fn export_wrapped(&self, id: SectionId, indent: &str) -> String {
        let mut out = format!("{} {{\n", self.name(id));
        for line in self.export_body(id, indent).split_inclusive('\n') {
            if !line.trim().is_empty() {
                out.push_str(indent);
            }
            out.push_str(line);
        }
        out.push_str("}\n");
        out
    }
}
