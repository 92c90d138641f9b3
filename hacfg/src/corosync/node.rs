//! Corosync cluster nodes and their addresses.

use std::collections::HashSet;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, ToSocketAddrs};

use crate::error::{Error, Result};

/// Kind of a node address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressType {
    /// IPv4 literal.
    Ipv4,
    /// IPv6 literal.
    Ipv6,
    /// Host name, resolvable or not checked.
    Fqdn,
    /// Host name which failed to resolve.
    Unresolvable,
}

impl AddressType {
    /// Returns `true` for IP literals.
    #[must_use]
    pub const fn is_ip(self) -> bool {
        matches!(self, Self::Ipv4 | Self::Ipv6)
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
            Self::Fqdn => write!(f, "FQDN"),
            Self::Unresolvable => write!(f, "unresolvable"),
        }
    }
}

/// Forward name resolution used to check node addresses.
#[cfg_attr(test, mockall::automock)]
pub trait AddressResolver {
    /// Returns `true` if the host name resolves to at least one address.
    fn resolves(&self, host: &str) -> bool;
}

/// Resolver backed by the system resolver (`getaddrinfo`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl AddressResolver for SystemResolver {
    fn resolves(&self, host: &str) -> bool {
        match (host, 0).to_socket_addrs() {
            Ok(mut addrs) => addrs.next().is_some(),
            Err(e) => {
                log::debug!("Unable to resolve '{host}': {e}");
                false
            }
        }
    }
}

/// Classifies an address.
///
/// IP literals are recognized without any lookup. Other strings are host
/// names: without a resolver they are optimistically reported as
/// [`AddressType::Fqdn`], with a resolver a failed lookup yields
/// [`AddressType::Unresolvable`].
///
/// # Examples
///
/// ```
/// use hacfg::corosync::{get_address_type, AddressType};
///
/// assert_eq!(get_address_type("192.168.0.1", None), AddressType::Ipv4);
/// assert_eq!(get_address_type("fe80::1", None), AddressType::Ipv6);
/// assert_eq!(get_address_type("node1.example.com", None), AddressType::Fqdn);
/// ```
#[must_use]
pub fn get_address_type(address: &str, resolver: Option<&dyn AddressResolver>) -> AddressType {
    if address.parse::<Ipv4Addr>().is_ok() {
        return AddressType::Ipv4;
    }
    if address.parse::<Ipv6Addr>().is_ok() {
        return AddressType::Ipv6;
    }
    match resolver {
        Some(resolver) if !resolver.resolves(address) => AddressType::Unresolvable,
        _ => AddressType::Fqdn,
    }
}

/// An address of a node on one link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorosyncNodeAddress {
    addr: String,
    link: String,
}

impl CorosyncNodeAddress {
    /// Creates an address.
    pub fn new(addr: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            link: link.into(),
        }
    }

    /// The address string.
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// The link id.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Classifies the address, see [`get_address_type`].
    #[must_use]
    pub fn address_type(&self, resolver: Option<&dyn AddressResolver>) -> AddressType {
        get_address_type(&self.addr, resolver)
    }
}

/// A node of a corosync cluster.
///
/// A node has at most one address per link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorosyncNode {
    name: Option<String>,
    addrs: Vec<CorosyncNodeAddress>,
    nodeid: Option<String>,
}

impl CorosyncNode {
    /// Creates a node.
    ///
    /// # Errors
    ///
    /// Returns a validation error if two addresses share a link.
    pub fn new(
        name: Option<String>,
        addrs: Vec<CorosyncNodeAddress>,
        nodeid: Option<String>,
    ) -> Result<Self> {
        let mut links = HashSet::new();
        for addr in &addrs {
            if !links.insert(addr.link()) {
                return Err(Error::Validation {
                    field: "addrs".into(),
                    message: format!("link '{}' has more than one address", addr.link()),
                });
            }
        }
        Ok(Self {
            name,
            addrs,
            nodeid,
        })
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Node addresses in configuration order.
    #[must_use]
    pub fn addrs(&self) -> &[CorosyncNodeAddress] {
        &self.addrs
    }

    /// Node id.
    #[must_use]
    pub fn nodeid(&self) -> Option<&str> {
        self.nodeid.as_deref()
    }

    /// Address used on the given link.
    #[must_use]
    pub fn addr_for_link(&self, link: &str) -> Option<&CorosyncNodeAddress> {
        self.addrs.iter().find(|addr| addr.link() == link)
    }

    /// Address strings in configuration order.
    #[must_use]
    pub fn addrs_plain(&self) -> Vec<&str> {
        self.addrs.iter().map(CorosyncNodeAddress::addr).collect()
    }
}

/// Request to add a node, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSpec {
    /// Node name.
    pub name: Option<String>,
    /// Node addresses, one per link in link order.
    pub addrs: Vec<String>,
}

impl NodeSpec {
    /// Creates a node request.
    pub fn new(name: impl Into<String>, addrs: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            addrs: addrs.iter().map(|addr| (*addr).to_string()).collect(),
        }
    }
}
