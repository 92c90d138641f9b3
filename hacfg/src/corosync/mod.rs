//! corosync.conf handling.
//!
//! corosync.conf is a tree of named sections holding ordered `key: value`
//! attributes. This module provides:
//! - a generic section tree with parse and export,
//! - a facade reading cluster name, nodes, links and quorum device settings,
//! - validators for adding and removing cluster nodes.
//!
//! # Examples
//!
//! ```
//! use hacfg::corosync::{parse, SectionTree};
//!
//! let (mut tree, root) = parse("totem {\n    version: 2\n}\n").unwrap();
//! let quorum = tree.add_new_section(root, "quorum");
//! tree.set_attribute(quorum, "provider", "corosync_votequorum");
//!
//! assert_eq!(
//!     tree.export(root),
//!     "totem {\n    version: 2\n}\n\nquorum {\n    provider: corosync_votequorum\n}\n"
//! );
//! ```

pub mod facade;
pub mod node;
pub mod parser;
pub mod section;
pub mod validators;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use facade::{CorosyncConfFacade, QuorumDeviceSettings};
pub use node::{
    get_address_type, AddressResolver, AddressType, CorosyncNode, CorosyncNodeAddress, NodeSpec,
    SystemResolver,
};
pub use parser::{parse, ParseError};
pub use section::{SectionData, SectionId, SectionTree};
