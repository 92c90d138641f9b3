//! Error types for the hacfg library.
//!
//! This module provides the error hierarchy for all fallible operations
//! in the hacfg library, using `thiserror` for ergonomic error handling.
//!
//! Validation problems are not errors: validators return a list of
//! [`ReportItem`](crate::reports::ReportItem)s instead. Errors are reserved
//! for structural failures (unparseable input, I/O, misuse of the tree API).

use std::path::PathBuf;

use thiserror::Error;

use crate::permissions::PermissionTargetType;

/// Result type alias for operations that may fail with a hacfg error.
///
/// # Examples
///
/// ```
/// use hacfg::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the hacfg library.
#[derive(Debug, Error)]
pub enum Error {
    /// corosync.conf text could not be parsed.
    #[error("unable to parse corosync config: {0}")]
    CorosyncParse(#[from] crate::corosync::ParseError),

    /// booth config text could not be parsed.
    #[error("unable to parse booth config: {0}")]
    BoothParse(#[from] crate::booth::ParseError),

    /// A booth exchange payload was malformed.
    #[error("invalid booth exchange format: {0}")]
    BoothExchange(#[from] crate::booth::ExchangeFormatError),

    /// A versioned JSON file could not be parsed.
    #[error("unable to parse JSON file: {0}")]
    JsonFile(#[from] crate::json_file::ParseError),

    /// Adding a section would make it its own ancestor.
    #[error("circular parentship: section '{child}' cannot be placed under '{parent}'")]
    CircularParentship {
        /// Name of the intended parent section.
        parent: String,
        /// Name of the section being added.
        child: String,
    },

    /// A section was expected to be a child of another one and is not.
    #[error("section '{child}' is not a subsection of '{parent}'")]
    NotASubsection {
        /// Name of the parent section.
        parent: String,
        /// Name of the section that was not found among the children.
        child: String,
    },

    /// A permission entry to be removed does not exist.
    #[error("permission entry not found: {target_type} '{name}'")]
    EntryNotFound {
        /// Name of the user or group.
        name: String,
        /// Whether the entry targets a user or a group.
        target_type: PermissionTargetType,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if the error was caused by malformed input text.
    ///
    /// # Examples
    ///
    /// ```
    /// use hacfg::Error;
    /// use hacfg::corosync::ParseError;
    ///
    /// let err = Error::from(ParseError::MissingClosingBrace);
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::CorosyncParse(_) | Self::BoothParse(_) | Self::BoothExchange(_) | Self::JsonFile(_)
        )
    }

    /// Check if error indicates a missing permission entry.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound { .. })
    }
}
