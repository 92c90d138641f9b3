//! Structured report items produced by validators and parser adapters.
//!
//! Validators never stop at the first problem. They collect every violation
//! into a list of [`ReportItem`]s so the caller can present all of them at
//! once. Each item carries a severity and a structured message with a stable
//! upper-case code.

use std::fmt;

use crate::corosync::AddressType;

/// Code allowing a forceable error to be overridden by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceCode {
    /// Generic force flag.
    Force,
    /// Allow unknown or unusual options.
    ForceOptions,
    /// Allow addresses which cannot be resolved.
    ForceUnresolvable,
}

impl fmt::Display for ForceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Force => write!(f, "FORCE"),
            Self::ForceOptions => write!(f, "FORCE_OPTIONS"),
            Self::ForceUnresolvable => write!(f, "FORCE_NODE_ADDRESSES_UNRESOLVABLE"),
        }
    }
}

/// Severity of a report item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportItemSeverity {
    /// An error. If `force_code` is set, the error may be overridden.
    Error {
        /// The force code which downgrades this error, if any.
        force_code: Option<ForceCode>,
    },
    /// A warning; does not stop the operation.
    Warning,
    /// Informational message.
    Info,
    /// Debug message.
    Debug,
}

impl ReportItemSeverity {
    /// A hard error which cannot be forced.
    #[must_use]
    pub const fn error() -> Self {
        Self::Error { force_code: None }
    }

    /// Resolve severity from the caller's force policy.
    ///
    /// A forced problem becomes a warning, otherwise it is an error carrying
    /// `force_code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hacfg::reports::{ForceCode, ReportItemSeverity};
    ///
    /// let forced = ReportItemSeverity::from_force(Some(ForceCode::Force), true);
    /// assert_eq!(forced, ReportItemSeverity::Warning);
    ///
    /// let not_forced = ReportItemSeverity::from_force(Some(ForceCode::Force), false);
    /// assert!(not_forced.is_error());
    /// ```
    #[must_use]
    pub const fn from_force(force_code: Option<ForceCode>, is_forced: bool) -> Self {
        if is_forced {
            Self::Warning
        } else {
            Self::Error { force_code }
        }
    }

    /// Returns `true` for errors (forceable or not).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for ReportItemSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error { .. } => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
            Self::Info => write!(f, "Info"),
            Self::Debug => write!(f, "Debug"),
        }
    }
}

/// Kind of configuration file a report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// corosync.conf
    CorosyncConf,
    /// A booth configuration file.
    BoothConfig,
    /// The permissions configuration file.
    PermissionsConfig,
    /// The known-hosts file.
    KnownHosts,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorosyncConf => write!(f, "corosync.conf"),
            Self::BoothConfig => write!(f, "booth config"),
            Self::PermissionsConfig => write!(f, "permissions config"),
            Self::KnownHosts => write!(f, "known-hosts"),
        }
    }
}

/// Structured payload of a report item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportItemMessage {
    /// A `}` was found with no section open.
    ParseErrorCorosyncConfUnexpectedClosingBrace,
    /// The input ended inside an open section.
    ParseErrorCorosyncConfMissingClosingBrace,
    /// A JSON file is not valid JSON.
    ParseErrorJsonFile {
        /// Type of the file.
        file_type: FileType,
        /// Line of the error (1-based).
        line: usize,
        /// Column of the error (1-based).
        column: usize,
        /// Decoder message.
        message: String,
        /// Path to the file, if known.
        file_path: Option<String>,
    },
    /// A file is well-formed but does not follow its schema.
    ParseErrorInvalidFileStructure {
        /// Type of the file.
        file_type: FileType,
        /// Description of the problem.
        reason: String,
        /// Path to the file, if known.
        file_path: Option<String>,
    },
    /// booth config contains lines which are not `key = value`.
    BoothConfigUnexpectedLines {
        /// The offending lines.
        line_list: Vec<String>,
        /// Path to the file, if known.
        file_path: Option<String>,
    },
    /// A booth config file could not be read.
    BoothConfigReadError {
        /// Name of the config file.
        name: String,
        /// Reason of the failure.
        reason: String,
    },
    /// Fewer than two booth sites.
    BoothLackOfSites {
        /// Sites currently configured.
        sites: Vec<String>,
    },
    /// Booth needs an odd number of peers.
    BoothEvenPeersNum {
        /// Number of peers (sites and arbitrators).
        number: usize,
    },
    /// Booth peer addresses are not unique.
    BoothAddressDuplication {
        /// The duplicate addresses, sorted.
        duplicate_addresses: Vec<String>,
    },
    /// A booth ticket name contains forbidden characters.
    BoothTicketNameInvalid {
        /// The ticket name.
        ticket_name: String,
    },
    /// A booth ticket already exists.
    BoothTicketDuplicate {
        /// The ticket name.
        ticket_name: String,
    },
    /// A booth ticket does not exist.
    BoothTicketDoesNotExist {
        /// The ticket name.
        ticket_name: String,
    },
    /// Options not allowed in the given context.
    InvalidOptions {
        /// The rejected option names.
        option_names: Vec<String>,
        /// The option names which are allowed.
        allowed: Vec<String>,
        /// Context of the options, e.g. "booth ticket".
        option_type: String,
    },
    /// An option has an invalid value.
    InvalidOptionValue {
        /// The option name.
        option_name: String,
        /// The rejected value.
        option_value: String,
        /// Description of the allowed values.
        allowed_values: String,
    },
    /// Required options were not specified.
    RequiredOptionsAreMissing {
        /// The missing option names.
        option_names: Vec<String>,
        /// Context of the options, e.g. "node 2".
        option_type: String,
    },
    /// A node name contains characters which break corosync.conf syntax.
    InvalidNodeName {
        /// The node name.
        name: String,
    },
    /// A node has a wrong number of addresses.
    BadNodeAddressesCount {
        /// Number of addresses specified.
        actual_count: usize,
        /// Minimal allowed number of addresses.
        min_count: usize,
        /// Maximal allowed number of addresses.
        max_count: usize,
        /// Name of the node, if specified.
        node_name: Option<String>,
        /// 1-based position of the node in the request.
        node_index: usize,
    },
    /// Node names are repeated among the new nodes.
    NodeNamesDuplication {
        /// The duplicate names, sorted.
        name_list: Vec<String>,
    },
    /// Node names are already used in the cluster.
    NodeNamesAlreadyExist {
        /// The conflicting names, sorted.
        name_list: Vec<String>,
    },
    /// Nodes have empty addresses.
    NodeAddressesCannotBeEmpty {
        /// Names (or positions) of the affected nodes.
        node_name_list: Vec<String>,
    },
    /// Addresses cannot be resolved.
    NodeAddressesUnresolvable {
        /// The unresolvable addresses, sorted.
        address_list: Vec<String>,
    },
    /// Addresses are repeated among the new nodes.
    NodeAddressesDuplication {
        /// The duplicate addresses, sorted.
        address_list: Vec<String>,
    },
    /// Addresses are already used in the cluster.
    NodeAddressesAlreadyExist {
        /// The conflicting addresses, sorted.
        address_list: Vec<String>,
    },
    /// An address does not match the IP family established for its link.
    CorosyncAddressIpVersionWrongForLink {
        /// The address.
        address: String,
        /// The address family used by the existing nodes on the link.
        expected_address_type: AddressType,
        /// The link.
        link_number: String,
    },
    /// Newly added addresses mix IPv4 and IPv6 within a link.
    CorosyncIpVersionMismatchInLinks {
        /// The affected links, sorted.
        link_numbers: Vec<String>,
    },
    /// A node to be removed is not in the cluster.
    NodeNotFound {
        /// The node name.
        node: String,
    },
    /// At least one node must stay in the cluster.
    CannotRemoveAllClusterNodes,
    /// The node is configured as the qdevice tie-breaker.
    NodeUsedAsTieBreaker {
        /// The node name.
        node: String,
        /// The node id used as tie-breaker.
        node_id: String,
    },
}

fn join(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn file_suffix(file_path: Option<&String>) -> String {
    file_path.map_or_else(String::new, |path| format!(" '{path}'"))
}

impl ReportItemMessage {
    /// The stable code of this message.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ParseErrorCorosyncConfUnexpectedClosingBrace => {
                "PARSE_ERROR_COROSYNC_CONF_UNEXPECTED_CLOSING_BRACE"
            }
            Self::ParseErrorCorosyncConfMissingClosingBrace => {
                "PARSE_ERROR_COROSYNC_CONF_MISSING_CLOSING_BRACE"
            }
            Self::ParseErrorJsonFile { .. } => "PARSE_ERROR_JSON_FILE",
            Self::ParseErrorInvalidFileStructure { .. } => "PARSE_ERROR_INVALID_FILE_STRUCTURE",
            Self::BoothConfigUnexpectedLines { .. } => "BOOTH_CONFIG_UNEXPECTED_LINES",
            Self::BoothConfigReadError { .. } => "BOOTH_CONFIG_READ_ERROR",
            Self::BoothLackOfSites { .. } => "BOOTH_LACK_OF_SITES",
            Self::BoothEvenPeersNum { .. } => "BOOTH_EVEN_PEERS_NUM",
            Self::BoothAddressDuplication { .. } => "BOOTH_ADDRESS_DUPLICATION",
            Self::BoothTicketNameInvalid { .. } => "BOOTH_TICKET_NAME_INVALID",
            Self::BoothTicketDuplicate { .. } => "BOOTH_TICKET_DUPLICATE",
            Self::BoothTicketDoesNotExist { .. } => "BOOTH_TICKET_DOES_NOT_EXIST",
            Self::InvalidOptions { .. } => "INVALID_OPTIONS",
            Self::InvalidOptionValue { .. } => "INVALID_OPTION_VALUE",
            Self::RequiredOptionsAreMissing { .. } => "REQUIRED_OPTIONS_ARE_MISSING",
            Self::InvalidNodeName { .. } => "INVALID_NODE_NAME",
            Self::BadNodeAddressesCount { .. } => "BAD_NODE_ADDRESSES_COUNT",
            Self::NodeNamesDuplication { .. } => "NODE_NAMES_DUPLICATION",
            Self::NodeNamesAlreadyExist { .. } => "NODE_NAMES_ALREADY_EXIST",
            Self::NodeAddressesCannotBeEmpty { .. } => "NODE_ADDRESSES_CANNOT_BE_EMPTY",
            Self::NodeAddressesUnresolvable { .. } => "NODE_ADDRESSES_UNRESOLVABLE",
            Self::NodeAddressesDuplication { .. } => "NODE_ADDRESSES_DUPLICATION",
            Self::NodeAddressesAlreadyExist { .. } => "NODE_ADDRESSES_ALREADY_EXIST",
            Self::CorosyncAddressIpVersionWrongForLink { .. } => {
                "COROSYNC_ADDRESS_IP_VERSION_WRONG_FOR_LINK"
            }
            Self::CorosyncIpVersionMismatchInLinks { .. } => "COROSYNC_IP_VERSION_MISMATCH_IN_LINKS",
            Self::NodeNotFound { .. } => "NODE_NOT_FOUND",
            Self::CannotRemoveAllClusterNodes => "CANNOT_REMOVE_ALL_CLUSTER_NODES",
            Self::NodeUsedAsTieBreaker { .. } => "NODE_USED_AS_TIE_BREAKER",
        }
    }
}

impl fmt::Display for ReportItemMessage {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseErrorCorosyncConfUnexpectedClosingBrace => {
                write!(f, "Unable to parse corosync config: unexpected closing brace")
            }
            Self::ParseErrorCorosyncConfMissingClosingBrace => {
                write!(f, "Unable to parse corosync config: missing closing brace")
            }
            Self::ParseErrorJsonFile {
                file_type,
                line,
                column,
                message,
                file_path,
            } => write!(
                f,
                "Unable to parse {file_type} file{}: {message}: line {line} column {column}",
                file_suffix(file_path.as_ref())
            ),
            Self::ParseErrorInvalidFileStructure {
                file_type,
                reason,
                file_path,
            } => write!(
                f,
                "Unable to parse {file_type} file{}: {reason}",
                file_suffix(file_path.as_ref())
            ),
            Self::BoothConfigUnexpectedLines {
                line_list,
                file_path,
            } => write!(
                f,
                "Unexpected line(s) in booth config{}: {}",
                file_suffix(file_path.as_ref()),
                join(line_list)
            ),
            Self::BoothConfigReadError { name, reason } => {
                write!(f, "Unable to read booth config '{name}': {reason}")
            }
            Self::BoothLackOfSites { sites } => write!(
                f,
                "Booth requires at least two sites, got {} ({})",
                sites.len(),
                join(sites)
            ),
            Self::BoothEvenPeersNum { number } => write!(
                f,
                "Booth requires an odd number of peers (sites and arbitrators), got {number}"
            ),
            Self::BoothAddressDuplication {
                duplicate_addresses,
            } => write!(
                f,
                "Booth cannot have duplicate addresses: {}",
                join(duplicate_addresses)
            ),
            Self::BoothTicketNameInvalid { ticket_name } => write!(
                f,
                "Booth ticket name '{ticket_name}' is not valid, use alphanumeric characters, '-' or '_'"
            ),
            Self::BoothTicketDuplicate { ticket_name } => {
                write!(f, "Booth ticket '{ticket_name}' already exists")
            }
            Self::BoothTicketDoesNotExist { ticket_name } => {
                write!(f, "Booth ticket '{ticket_name}' does not exist")
            }
            Self::InvalidOptions {
                option_names,
                allowed,
                option_type,
            } => write!(
                f,
                "Invalid {option_type} option(s) {}, allowed options are: {}",
                join(option_names),
                join(allowed)
            ),
            Self::InvalidOptionValue {
                option_name,
                option_value,
                allowed_values,
            } => write!(
                f,
                "'{option_value}' is not a valid {option_name} value, use {allowed_values}"
            ),
            Self::RequiredOptionsAreMissing {
                option_names,
                option_type,
            } => write!(
                f,
                "Required {option_type} option(s) {} are missing",
                join(option_names)
            ),
            Self::InvalidNodeName { name } => write!(
                f,
                "Node name '{}' contains forbidden characters '{{', '}}', newline or carriage return",
                name.escape_debug()
            ),
            Self::BadNodeAddressesCount {
                actual_count,
                min_count,
                max_count,
                node_name,
                node_index,
            } => {
                let node = node_name
                    .as_ref()
                    .map_or_else(|| format!("node {node_index}"), |name| format!("node '{name}'"));
                if min_count == max_count {
                    write!(
                        f,
                        "{actual_count} address(es) specified for {node}, {min_count} address(es) expected"
                    )
                } else {
                    write!(
                        f,
                        "{actual_count} address(es) specified for {node}, {min_count}-{max_count} address(es) expected"
                    )
                }
            }
            Self::NodeNamesDuplication { name_list } => {
                write!(f, "Node names must be unique, duplicate names: {}", join(name_list))
            }
            Self::NodeNamesAlreadyExist { name_list } => {
                write!(f, "Node names already used: {}", join(name_list))
            }
            Self::NodeAddressesCannotBeEmpty { node_name_list } => write!(
                f,
                "Empty address set for node(s): {}",
                join(node_name_list)
            ),
            Self::NodeAddressesUnresolvable { address_list } => {
                write!(f, "Unable to resolve addresses: {}", join(address_list))
            }
            Self::NodeAddressesDuplication { address_list } => write!(
                f,
                "Node addresses must be unique, duplicate addresses: {}",
                join(address_list)
            ),
            Self::NodeAddressesAlreadyExist { address_list } => {
                write!(f, "Node addresses already used: {}", join(address_list))
            }
            Self::CorosyncAddressIpVersionWrongForLink {
                address,
                expected_address_type,
                link_number,
            } => write!(
                f,
                "Address '{address}' cannot be used in link '{link_number}' because the link uses {expected_address_type} addresses"
            ),
            Self::CorosyncIpVersionMismatchInLinks { link_numbers } => write!(
                f,
                "Using both IPv4 and IPv6 in one link is not allowed; please, use either IPv4 or IPv6 in link(s): {}",
                join(link_numbers)
            ),
            Self::NodeNotFound { node } => write!(f, "Node '{node}' does not appear to exist in configuration"),
            Self::CannotRemoveAllClusterNodes => {
                write!(f, "No nodes would be left in the cluster")
            }
            Self::NodeUsedAsTieBreaker { node, node_id } => write!(
                f,
                "Node '{node}' with id '{node_id}' is used as a tie breaker for a qdevice"
            ),
        }
    }
}

/// A single problem found by a validator or parser adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    /// Severity of the problem.
    pub severity: ReportItemSeverity,
    /// What the problem is.
    pub message: ReportItemMessage,
}

impl ReportItem {
    /// Create a report item with an explicit severity.
    #[must_use]
    pub const fn new(severity: ReportItemSeverity, message: ReportItemMessage) -> Self {
        Self { severity, message }
    }

    /// Create a hard error.
    #[must_use]
    pub const fn error(message: ReportItemMessage) -> Self {
        Self::new(ReportItemSeverity::error(), message)
    }

    /// Create an error which can be overridden with `force_code`.
    #[must_use]
    pub const fn forceable_error(message: ReportItemMessage, force_code: ForceCode) -> Self {
        Self::new(
            ReportItemSeverity::Error {
                force_code: Some(force_code),
            },
            message,
        )
    }

    /// Create a warning.
    #[must_use]
    pub const fn warning(message: ReportItemMessage) -> Self {
        Self::new(ReportItemSeverity::Warning, message)
    }

    /// The stable code of the message.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.message.code()
    }

    /// Returns `true` if this item is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for ReportItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let ReportItemSeverity::Error {
            force_code: Some(code),
        } = self.severity
        {
            write!(f, ", use --force to override ({code})")?;
        }
        Ok(())
    }
}

/// Returns `true` if any item in the list is an error.
///
/// # Examples
///
/// ```
/// use hacfg::reports::{has_errors, ReportItem, ReportItemMessage};
///
/// let reports = vec![ReportItem::warning(ReportItemMessage::CannotRemoveAllClusterNodes)];
/// assert!(!has_errors(&reports));
/// ```
#[must_use]
pub fn has_errors(reports: &[ReportItem]) -> bool {
    reports.iter().any(ReportItem::is_error)
}
