//! Validation of node addition and removal.
//!
//! Both validators collect every problem they find and never stop early.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::corosync::facade::QuorumDeviceSettings;
use crate::corosync::node::{
    get_address_type, AddressResolver, AddressType, CorosyncNode, NodeSpec,
};
use crate::reports::{ForceCode, ReportItem, ReportItemMessage, ReportItemSeverity};

/// Maximal number of knet links.
pub const KNET_MAX_LINKS: usize = 8;

/// Characters which cannot appear in a node name.
pub const FORBIDDEN_NODE_NAME_CHARACTERS: &[char] = &['{', '}', '\n', '\r'];

const QDEVICE_TIE_BREAKER_KEYWORDS: &[&str] = &["lowest", "highest"];

fn duplicates<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(value, _)| value.to_string())
        .collect()
}

fn existing_links(existing_nodes: &[CorosyncNode]) -> Vec<String> {
    let mut links: Vec<String> = existing_nodes
        .iter()
        .flat_map(CorosyncNode::addrs)
        .map(|addr| addr.link().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    links.sort_by_key(|link| (link.parse::<u32>().unwrap_or(u32::MAX), link.clone()));
    links
}

/// IP family fixed for each link by the existing nodes.
///
/// Host names do not fix a family.
fn existing_link_families(existing_nodes: &[CorosyncNode]) -> HashMap<String, AddressType> {
    let mut families = HashMap::new();
    for addr in existing_nodes.iter().flat_map(CorosyncNode::addrs) {
        let address_type = addr.address_type(None);
        if address_type.is_ip() {
            families
                .entry(addr.link().to_string())
                .or_insert(address_type);
        }
    }
    families
}

/// Validates nodes to be added to a cluster.
///
/// Checks, for every new node:
/// - the name is present, non-empty and free of forbidden characters,
/// - the number of addresses matches the number of links of the cluster
///   (1 to [`KNET_MAX_LINKS`] for a cluster with no nodes),
/// - names and addresses are unique among the new nodes and not used by
///   existing nodes (remote node names included),
/// - addresses are non-empty and resolvable (forceable),
/// - addresses on each link use one IP family.
///
/// # Examples
///
/// ```
/// use hacfg::corosync::{validators, NodeSpec, SystemResolver};
///
/// let reports = validators::add_nodes(
///     &[NodeSpec::new("node1", &["10.0.0.1"])],
///     &[],
///     &[],
///     false,
///     &SystemResolver,
/// );
/// assert!(reports.is_empty());
/// ```
#[allow(clippy::too_many_lines)]
pub fn add_nodes(
    new_nodes: &[NodeSpec],
    existing_nodes: &[CorosyncNode],
    existing_remote_names: &[String],
    force_unresolvable: bool,
    resolver: &dyn AddressResolver,
) -> Vec<ReportItem> {
    let mut reports = Vec::new();

    let links = existing_links(existing_nodes);
    let (min_count, max_count) = if existing_nodes.is_empty() {
        (1, KNET_MAX_LINKS)
    } else {
        (links.len(), links.len())
    };

    let used_names: HashSet<&str> = existing_nodes
        .iter()
        .filter_map(CorosyncNode::name)
        .chain(existing_remote_names.iter().map(String::as_str))
        .collect();
    let used_addrs: HashSet<&str> = existing_nodes
        .iter()
        .flat_map(CorosyncNode::addrs_plain)
        .collect();

    let mut new_names: Vec<&str> = Vec::new();
    let mut already_existing_names: BTreeSet<String> = BTreeSet::new();
    let mut new_addrs: Vec<&str> = Vec::new();
    let mut already_existing_addrs: BTreeSet<String> = BTreeSet::new();
    let mut unresolvable: BTreeSet<String> = BTreeSet::new();
    let mut empty_addr_nodes: Vec<String> = Vec::new();
    let mut new_addrs_by_link: BTreeMap<String, Vec<(&str, AddressType)>> = BTreeMap::new();

    for (position, node) in new_nodes.iter().enumerate() {
        let node_index = position + 1;
        let name = node.name.as_deref().filter(|name| !name.trim().is_empty());

        match name {
            None => reports.push(ReportItem::error(
                ReportItemMessage::RequiredOptionsAreMissing {
                    option_names: vec!["name".into()],
                    option_type: format!("node {node_index}"),
                },
            )),
            Some(name) => {
                if name.contains(FORBIDDEN_NODE_NAME_CHARACTERS) {
                    reports.push(ReportItem::error(ReportItemMessage::InvalidNodeName {
                        name: name.to_string(),
                    }));
                }
                new_names.push(name);
                if used_names.contains(name) {
                    already_existing_names.insert(name.to_string());
                }
            }
        }

        if !(min_count..=max_count).contains(&node.addrs.len()) {
            reports.push(ReportItem::error(ReportItemMessage::BadNodeAddressesCount {
                actual_count: node.addrs.len(),
                min_count,
                max_count,
                node_name: name.map(String::from),
                node_index,
            }));
        }

        let mut has_empty_addr = false;
        for (addr_index, addr) in node.addrs.iter().enumerate() {
            if addr.trim().is_empty() {
                has_empty_addr = true;
                continue;
            }
            new_addrs.push(addr);
            if used_addrs.contains(addr.as_str()) {
                already_existing_addrs.insert(addr.clone());
            }
            let address_type = get_address_type(addr, Some(resolver));
            if address_type == AddressType::Unresolvable {
                unresolvable.insert(addr.clone());
            }
            let link = links
                .get(addr_index)
                .cloned()
                .unwrap_or_else(|| addr_index.to_string());
            new_addrs_by_link
                .entry(link)
                .or_default()
                .push((addr.as_str(), address_type));
        }
        if has_empty_addr {
            empty_addr_nodes.push(
                name.map_or_else(|| format!("node {node_index}"), String::from),
            );
        }
    }

    let duplicate_names = duplicates(new_names);
    if !duplicate_names.is_empty() {
        reports.push(ReportItem::error(ReportItemMessage::NodeNamesDuplication {
            name_list: duplicate_names,
        }));
    }
    if !already_existing_names.is_empty() {
        reports.push(ReportItem::error(ReportItemMessage::NodeNamesAlreadyExist {
            name_list: already_existing_names.into_iter().collect(),
        }));
    }
    if !empty_addr_nodes.is_empty() {
        reports.push(ReportItem::error(
            ReportItemMessage::NodeAddressesCannotBeEmpty {
                node_name_list: empty_addr_nodes,
            },
        ));
    }
    if !unresolvable.is_empty() {
        reports.push(ReportItem::new(
            ReportItemSeverity::from_force(Some(ForceCode::ForceUnresolvable), force_unresolvable),
            ReportItemMessage::NodeAddressesUnresolvable {
                address_list: unresolvable.into_iter().collect(),
            },
        ));
    }
    let duplicate_addrs = duplicates(new_addrs);
    if !duplicate_addrs.is_empty() {
        reports.push(ReportItem::error(ReportItemMessage::NodeAddressesDuplication {
            address_list: duplicate_addrs,
        }));
    }
    if !already_existing_addrs.is_empty() {
        reports.push(ReportItem::error(
            ReportItemMessage::NodeAddressesAlreadyExist {
                address_list: already_existing_addrs.into_iter().collect(),
            },
        ));
    }

    reports.extend(validate_link_families(existing_nodes, &new_addrs_by_link));
    reports
}

fn validate_link_families(
    existing_nodes: &[CorosyncNode],
    new_addrs_by_link: &BTreeMap<String, Vec<(&str, AddressType)>>,
) -> Vec<ReportItem> {
    let mut reports = Vec::new();
    let families = existing_link_families(existing_nodes);
    let mut mismatched_links = Vec::new();

    for (link, addrs) in new_addrs_by_link {
        if let Some(expected) = families.get(link) {
            for (addr, address_type) in addrs {
                if address_type.is_ip() && address_type != expected {
                    reports.push(ReportItem::error(
                        ReportItemMessage::CorosyncAddressIpVersionWrongForLink {
                            address: (*addr).to_string(),
                            expected_address_type: *expected,
                            link_number: link.clone(),
                        },
                    ));
                }
            }
        } else {
            let new_families: HashSet<AddressType> = addrs
                .iter()
                .map(|(_, address_type)| *address_type)
                .filter(|address_type| address_type.is_ip())
                .collect();
            if new_families.len() > 1 {
                mismatched_links.push(link.clone());
            }
        }
    }

    if !mismatched_links.is_empty() {
        mismatched_links.sort_by_key(|link| (link.parse::<u32>().unwrap_or(u32::MAX), link.clone()));
        reports.push(ReportItem::error(
            ReportItemMessage::CorosyncIpVersionMismatchInLinks {
                link_numbers: mismatched_links,
            },
        ));
    }
    reports
}

/// Validates removal of nodes from a cluster.
///
/// Reports names which are not in the cluster, removal of every node, and
/// removal of the node used as a qdevice-net tie-breaker.
#[must_use]
pub fn remove_nodes(
    node_names: &[String],
    existing_nodes: &[CorosyncNode],
    quorum_device: &QuorumDeviceSettings,
) -> Vec<ReportItem> {
    let mut reports = Vec::new();
    let existing_names: HashSet<&str> =
        existing_nodes.iter().filter_map(CorosyncNode::name).collect();
    let to_remove: HashSet<&str> = node_names.iter().map(String::as_str).collect();

    let mut reported = HashSet::new();
    for name in node_names {
        if !existing_names.contains(name.as_str()) && reported.insert(name.as_str()) {
            reports.push(ReportItem::error(ReportItemMessage::NodeNotFound {
                node: name.clone(),
            }));
        }
    }

    if existing_names.is_subset(&to_remove) {
        reports.push(ReportItem::error(
            ReportItemMessage::CannotRemoveAllClusterNodes,
        ));
    }

    if quorum_device.model.as_deref() == Some("net") {
        if let Some(tie_breaker) = quorum_device.model_options.get("tie_breaker") {
            if !QDEVICE_TIE_BREAKER_KEYWORDS.contains(&tie_breaker.as_str()) {
                for node in existing_nodes {
                    if let (Some(name), Some(nodeid)) = (node.name(), node.nodeid()) {
                        if to_remove.contains(name) && nodeid == tie_breaker {
                            reports.push(ReportItem::error(
                                ReportItemMessage::NodeUsedAsTieBreaker {
                                    node: name.to_string(),
                                    node_id: nodeid.to_string(),
                                },
                            ));
                        }
                    }
                }
            }
        }
    }

    reports
}
