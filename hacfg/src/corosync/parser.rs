//! corosync.conf parser.
//!
//! The parser follows the tolerance of the corosync parser itself: lines are
//! trimmed, blank lines and `#` comments are skipped, and lines which neither
//! open a section, close it, nor contain an attribute are ignored.

use thiserror::Error;

use crate::corosync::section::{SectionId, SectionTree};
use crate::reports::{ReportItem, ReportItemMessage};

/// Structural errors found while parsing corosync.conf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `}` was found while no section was open.
    #[error("unexpected closing brace")]
    UnexpectedClosingBrace,
    /// The input ended while a section was still open.
    #[error("missing closing brace")]
    MissingClosingBrace,
}

/// Parses corosync.conf text into a section tree.
///
/// Returns the tree together with the id of its root section. The root
/// section has an empty name and is never wrapped in braces on export.
///
/// # Errors
///
/// Returns [`ParseError`] if braces are not balanced.
///
/// # Examples
///
/// ```
/// use hacfg::corosync::parse;
///
/// let (tree, root) = parse("totem {\n    version: 2\n}\n").unwrap();
/// let totem = tree.get_sections(root, Some("totem"))[0];
/// assert_eq!(tree.get_attribute_value(totem, "version"), Some("2"));
/// ```
pub fn parse(text: &str) -> Result<(SectionTree, SectionId), ParseError> {
    let mut tree = SectionTree::new();
    let root = tree.new_section("");
    let mut current = root;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(position) = line.rfind('{') {
            current = tree.add_new_section(current, line[..position].trim());
        } else if line.contains('}') {
            current = tree
                .parent(current)
                .ok_or(ParseError::UnexpectedClosingBrace)?;
        } else if let Some((key, value)) = line.split_once(':') {
            tree.add_attribute(current, key.trim(), value.trim());
        } else {
            log::debug!("Ignoring unrecognized corosync.conf line: {line}");
        }
    }

    if current == root {
        Ok((tree, root))
    } else {
        Err(ParseError::MissingClosingBrace)
    }
}

/// Converts a parse error into report items.
#[must_use]
pub fn error_to_report_list(error: ParseError) -> Vec<ReportItem> {
    let message = match error {
        ParseError::UnexpectedClosingBrace => {
            ReportItemMessage::ParseErrorCorosyncConfUnexpectedClosingBrace
        }
        ParseError::MissingClosingBrace => {
            ReportItemMessage::ParseErrorCorosyncConfMissingClosingBrace
        }
    };
    vec![ReportItem::error(message)]
}
