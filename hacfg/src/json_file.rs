//! Versioned JSON configuration files.
//!
//! Permission and known-hosts files are JSON objects carrying a
//! `format_version` field. Loading one goes through three steps: decode the
//! JSON, check the root object and its format version, then decode the
//! typed structure. Each step has its own [`ParseError`] variant so that the
//! failure can be reported precisely.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::reports::{FileType, ReportItem, ReportItemMessage};

/// Name of the field holding the schema version.
pub const FORMAT_VERSION_KEY: &str = "format_version";

/// Errors found while loading a versioned JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not valid JSON.
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        /// Decoder message.
        message: String,
        /// Line of the error (1-based).
        line: usize,
        /// Column of the error (1-based).
        column: usize,
    },
    /// The root element is not an object.
    #[error("root element is not an object")]
    NotAnObject,
    /// The `format_version` field is missing.
    #[error("missing 'format_version'")]
    MissingFormatVersion,
    /// The `format_version` field holds an unsupported value.
    #[error("unsupported 'format_version' {found}, expected {expected}")]
    UnsupportedFormatVersion {
        /// The supported version.
        expected: u64,
        /// The value found in the file.
        found: String,
    },
    /// The content does not follow the schema.
    #[error("{0}")]
    InvalidStructure(String),
}

/// Decodes the root object of a file and checks its format version.
///
/// The `format_version` field is removed from the returned object.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not JSON, the root is not an object
/// or the format version is missing or different from `expected_version`.
///
/// # Examples
///
/// ```
/// use hacfg::json_file::{parse_root, ParseError};
///
/// let root = parse_root(r#"{"format_version": 2, "data_version": 1}"#, 2).unwrap();
/// assert_eq!(root["data_version"], 1);
///
/// assert_eq!(parse_root("[]", 2).unwrap_err(), ParseError::NotAnObject);
/// ```
pub fn parse_root(text: &str, expected_version: u64) -> Result<Map<String, Value>, ParseError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ParseError::InvalidJson {
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })?;
    let Value::Object(mut root) = value else {
        return Err(ParseError::NotAnObject);
    };
    match root.remove(FORMAT_VERSION_KEY) {
        None => Err(ParseError::MissingFormatVersion),
        Some(version) if version.as_u64() == Some(expected_version) => Ok(root),
        Some(version) => Err(ParseError::UnsupportedFormatVersion {
            expected: expected_version,
            found: version.to_string(),
        }),
    }
}

/// Decodes the typed structure from a root object.
///
/// # Errors
///
/// Returns [`ParseError::InvalidStructure`] on missing, mistyped or unknown
/// fields.
pub fn decode<T: DeserializeOwned>(root: Map<String, Value>) -> Result<T, ParseError> {
    serde_json::from_value(Value::Object(root))
        .map_err(|e| ParseError::InvalidStructure(e.to_string()))
}

/// Parses a versioned JSON file into `T`.
///
/// # Errors
///
/// See [`parse_root`] and [`decode`].
pub fn parse<T: DeserializeOwned>(text: &str, expected_version: u64) -> Result<T, ParseError> {
    decode(parse_root(text, expected_version)?)
}

/// Serializes `data` as pretty JSON with the given format version.
///
/// # Errors
///
/// Returns a serialization error if `data` is not a JSON object.
pub fn export<T: Serialize>(data: &T, format_version: u64) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(data)?;
    if let Value::Object(root) = &mut value {
        root.insert(FORMAT_VERSION_KEY.to_string(), Value::from(format_version));
    } else {
        return Err(serde::ser::Error::custom("root element is not an object"));
    }
    serde_json::to_string_pretty(&value)
}

/// Converts a parse error into report items.
#[must_use]
pub fn error_to_report_list(
    error: &ParseError,
    file_type: FileType,
    file_path: Option<&str>,
) -> Vec<ReportItem> {
    let file_path = file_path.map(String::from);
    let message = match error {
        ParseError::InvalidJson {
            message,
            line,
            column,
        } => ReportItemMessage::ParseErrorJsonFile {
            file_type,
            line: *line,
            column: *column,
            message: message.clone(),
            file_path,
        },
        other => ReportItemMessage::ParseErrorInvalidFileStructure {
            file_type,
            reason: other.to_string(),
            file_path,
        },
    };
    vec![ReportItem::error(message)]
}
