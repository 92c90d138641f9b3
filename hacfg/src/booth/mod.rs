//! Booth configuration handling.
//!
//! A booth configuration is an ordered list of [`ConfigItem`]s. Tickets
//! carry their options as nested details. The module provides the text
//! parser and exporter, an editing facade, the JSON exchange format used
//! between nodes, and validators for configuration changes.
//!
//! # Examples
//!
//! ```
//! use hacfg::booth::{parser, BoothConfigFacade, BoothFeatures};
//!
//! let items = parser::parse("site = 1.1.1.1\nsite = 2.2.2.2\narbitrator = 3.3.3.3\n").unwrap();
//! let mut facade = BoothConfigFacade::new(items, BoothFeatures::default());
//! facade.add_ticket("T1", [("expire", "600")]);
//!
//! assert_eq!(
//!     parser::build(facade.config()),
//!     "site = 1.1.1.1\nsite = 2.2.2.2\narbitrator = 3.3.3.3\nticket = \"T1\"\n  expire = 600\n"
//! );
//! ```

pub mod config_structure;
pub mod exchange;
pub mod facade;
pub mod files;
pub mod parser;
pub mod validators;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use config_structure::{ConfigItem, AUTHFILE_FIX_OPTION, GLOBAL_KEYS, TICKET_KEYS};
pub use exchange::{from_exchange_format, to_exchange_format, ExchangeFormatError};
pub use facade::{BoothConfigFacade, BoothFeatures};
pub use files::read_configs;
pub use parser::ParseError;
