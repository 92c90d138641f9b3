//! Validation of booth configuration changes.

use std::collections::{BTreeMap, BTreeSet};

use crate::booth::config_structure::{is_global_key, TICKET_KEYS};
use crate::booth::facade::BoothConfigFacade;
use crate::reports::{ForceCode, ReportItem, ReportItemMessage, ReportItemSeverity};

const TICKET_MODES: &[&str] = &["auto", "manual"];

/// Validates the peers of a new booth configuration.
///
/// # Examples
///
/// ```
/// use hacfg::booth::validators;
///
/// let reports = validators::create(&["1.1.1.1".into()], &["1.1.1.1".into()]);
/// let codes: Vec<_> = reports.iter().map(|report| report.code()).collect();
/// assert_eq!(
///     codes,
///     vec!["BOOTH_LACK_OF_SITES", "BOOTH_EVEN_PEERS_NUM", "BOOTH_ADDRESS_DUPLICATION"]
/// );
/// ```
#[must_use]
pub fn create(sites: &[String], arbitrators: &[String]) -> Vec<ReportItem> {
    let mut reports = Vec::new();

    if sites.len() < 2 {
        reports.push(ReportItem::error(ReportItemMessage::BoothLackOfSites {
            sites: sites.to_vec(),
        }));
    }

    let peers: Vec<&String> = sites.iter().chain(arbitrators).collect();
    if peers.len() % 2 == 0 {
        reports.push(ReportItem::error(ReportItemMessage::BoothEvenPeersNum {
            number: peers.len(),
        }));
    }

    let mut seen = BTreeSet::new();
    let duplicates: BTreeSet<String> = peers
        .into_iter()
        .filter(|addr| !seen.insert(addr.as_str()))
        .cloned()
        .collect();
    if !duplicates.is_empty() {
        reports.push(ReportItem::error(
            ReportItemMessage::BoothAddressDuplication {
                duplicate_addresses: duplicates.into_iter().collect(),
            },
        ));
    }

    reports
}

fn is_valid_ticket_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validates a ticket to be added to a booth configuration.
///
/// Unknown options are a forceable error, downgraded to a warning when
/// `allow_unknown_options` is set. Global keys are never allowed.
#[must_use]
pub fn add_ticket(
    facade: &BoothConfigFacade,
    ticket_name: &str,
    options: &BTreeMap<String, String>,
    allow_unknown_options: bool,
) -> Vec<ReportItem> {
    let mut reports = Vec::new();

    if !is_valid_ticket_name(ticket_name) {
        reports.push(ReportItem::error(ReportItemMessage::BoothTicketNameInvalid {
            ticket_name: ticket_name.to_string(),
        }));
    }
    if facade.has_ticket(ticket_name) {
        reports.push(ReportItem::error(ReportItemMessage::BoothTicketDuplicate {
            ticket_name: ticket_name.to_string(),
        }));
    }

    let allowed: Vec<String> = TICKET_KEYS.iter().map(|key| (*key).to_string()).collect();
    let (global, other): (Vec<&String>, Vec<&String>) = options
        .keys()
        .filter(|key| !TICKET_KEYS.contains(&key.as_str()))
        .partition(|key| is_global_key(key));

    if !global.is_empty() {
        reports.push(ReportItem::error(ReportItemMessage::InvalidOptions {
            option_names: global.into_iter().cloned().collect(),
            allowed: allowed.clone(),
            option_type: "booth ticket".into(),
        }));
    }
    if !other.is_empty() {
        reports.push(ReportItem::new(
            ReportItemSeverity::from_force(Some(ForceCode::ForceOptions), allow_unknown_options),
            ReportItemMessage::InvalidOptions {
                option_names: other.into_iter().cloned().collect(),
                allowed,
                option_type: "booth ticket".into(),
            },
        ));
    }

    for (name, value) in options {
        if value.trim().is_empty() {
            reports.push(ReportItem::error(ReportItemMessage::InvalidOptionValue {
                option_name: name.clone(),
                option_value: value.clone(),
                allowed_values: "no-empty".into(),
            }));
        } else if name == "mode" && !TICKET_MODES.contains(&value.as_str()) {
            reports.push(ReportItem::error(ReportItemMessage::InvalidOptionValue {
                option_name: name.clone(),
                option_value: value.clone(),
                allowed_values: TICKET_MODES.join(", "),
            }));
        }
    }

    reports
}

/// Validates removal of a ticket.
#[must_use]
pub fn remove_ticket(facade: &BoothConfigFacade, ticket_name: &str) -> Vec<ReportItem> {
    if facade.has_ticket(ticket_name) {
        Vec::new()
    } else {
        vec![ReportItem::error(
            ReportItemMessage::BoothTicketDoesNotExist {
                ticket_name: ticket_name.to_string(),
            },
        )]
    }
}
