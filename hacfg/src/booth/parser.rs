//! booth.conf parser and exporter.
//!
//! Lines are `key = value`, `key = 'value'` or `key = "value"`. Quoted
//! values may be followed by a `#` comment. Unquoted values extend to the
//! end of the line, so a `#` inside them is part of the value, the same way
//! booth itself reads them.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::booth::config_structure::{is_global_key, ConfigItem};
use crate::reports::{ForceCode, ReportItem, ReportItemMessage, ReportItemSeverity};

/// Errors found while parsing a booth configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Lines which do not follow any of the accepted forms.
    #[error("unexpected lines in booth config: {}", .0.join(", "))]
    InvalidLines(Vec<String>),
}

const KEY_PART: &str = r"^(?P<key>[a-zA-Z0-9_-]+)\s*=\s*";

fn line_regex(value_part: &str) -> Regex {
    Regex::new(&format!("{KEY_PART}{value_part}")).expect("booth line pattern is valid")
}

static LINE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        line_regex(r#"(?P<value>[^'"]+)$"#),
        line_regex(r"'(?P<value>[^']*)'\s*(?:#.*)?$"),
        line_regex(r#""(?P<value>[^"]*)"\s*(?:#.*)?$"#),
    ]
});

fn match_line(line: &str) -> Option<(String, String)> {
    LINE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(line)
            .map(|captures| (captures["key"].to_string(), captures["value"].to_string()))
    })
}

/// Splits booth config text into `(key, value)` pairs.
///
/// The whole text is scanned before failing so that every invalid line is
/// reported.
///
/// # Errors
///
/// Returns [`ParseError::InvalidLines`] listing the lines which match none
/// of the accepted forms.
///
/// # Examples
///
/// ```
/// use hacfg::booth::parser::parse_to_raw_lines;
///
/// let lines = parse_to_raw_lines("site = 1.1.1.1\n site  =  2.2.2.2 \narbitrator=3.3.3.3").unwrap();
/// assert_eq!(
///     lines,
///     vec![
///         ("site".to_string(), "1.1.1.1".to_string()),
///         ("site".to_string(), "2.2.2.2".to_string()),
///         ("arbitrator".to_string(), "3.3.3.3".to_string()),
///     ]
/// );
/// ```
pub fn parse_to_raw_lines(text: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut lines = Vec::new();
    let mut invalid_lines = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match match_line(line) {
            Some(pair) => lines.push(pair),
            None => invalid_lines.push(line.to_string()),
        }
    }

    if invalid_lines.is_empty() {
        Ok(lines)
    } else {
        log::debug!("Booth config contains {} invalid lines", invalid_lines.len());
        Err(ParseError::InvalidLines(invalid_lines))
    }
}

/// Groups raw lines into configuration items.
///
/// Global keys and everything before the first ticket become top-level
/// items. Other keys become details of the last ticket. The result lists
/// all global items in encounter order followed by the tickets.
#[must_use]
pub fn organize_lines(raw_lines: Vec<(String, String)>) -> Vec<ConfigItem> {
    let mut global_items = Vec::new();
    let mut tickets: Vec<(String, Vec<ConfigItem>)> = Vec::new();

    for (key, value) in raw_lines {
        if key == "ticket" {
            tickets.push((value, Vec::new()));
            continue;
        }
        match tickets.last_mut() {
            Some((_, details)) if !is_global_key(&key) => {
                details.push(ConfigItem::new(key, value));
            }
            _ => global_items.push(ConfigItem::new(key, value)),
        }
    }

    global_items.extend(
        tickets
            .into_iter()
            .map(|(name, details)| ConfigItem::with_details("ticket", name, details)),
    );
    global_items
}

/// Renders a value so that parsing it back yields the same string.
///
/// Values which would not survive the unquoted form are quoted, with single
/// quotes when the value holds a double quote. Ticket names are always quoted.
fn format_value(value: &str, always_quote: bool) -> String {
    let needs_quotes = always_quote
        || value.is_empty()
        || value.trim() != value
        || value.contains(['"', '\'']);
    if !needs_quotes {
        value.to_string()
    } else if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

/// Renders items as config lines, details indented by two spaces per level.
#[must_use]
pub fn build_to_lines(items: &[ConfigItem], deep: usize) -> Vec<String> {
    let indent = "  ".repeat(deep);
    let mut lines = Vec::new();
    for item in items {
        let value = format_value(item.value(), item.key() == "ticket");
        lines.push(format!("{indent}{} = {value}", item.key()));
        lines.extend(build_to_lines(item.details(), deep + 1));
    }
    lines
}

/// Parses booth config text into configuration items.
///
/// # Errors
///
/// Returns [`ParseError::InvalidLines`] if any line is malformed.
pub fn parse(text: &str) -> Result<Vec<ConfigItem>, ParseError> {
    Ok(organize_lines(parse_to_raw_lines(text)?))
}

/// Renders configuration items as booth config text.
///
/// # Examples
///
/// ```
/// use hacfg::booth::{parser, ConfigItem};
///
/// let items = vec![
///     ConfigItem::new("site", "1.1.1.1"),
///     ConfigItem::with_details("ticket", "T1", vec![ConfigItem::new("expire", "10")]),
/// ];
/// assert_eq!(parser::build(&items), "site = 1.1.1.1\nticket = \"T1\"\n  expire = 10\n");
/// ```
#[must_use]
pub fn build(items: &[ConfigItem]) -> String {
    let lines = build_to_lines(items, 0);
    if lines.is_empty() {
        String::new()
    } else {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Converts a parse error into report items.
///
/// The severity follows the caller's force policy.
#[must_use]
pub fn error_to_report_list(
    error: &ParseError,
    force_code: Option<ForceCode>,
    is_forced: bool,
    file_path: Option<&str>,
) -> Vec<ReportItem> {
    match error {
        ParseError::InvalidLines(lines) => vec![ReportItem::new(
            ReportItemSeverity::from_force(force_code, is_forced),
            ReportItemMessage::BoothConfigUnexpectedLines {
                line_list: lines.clone(),
                file_path: file_path.map(String::from),
            },
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_raw_lines() {
        let lines = parse_to_raw_lines("site = 1.1.1.1\n site  =  2.2.2.2 \narbitrator=3.3.3.3").unwrap();
        assert_eq!(
            lines,
            pairs(&[
                ("site", "1.1.1.1"),
                ("site", "2.2.2.2"),
                ("arbitrator", "3.3.3.3")
            ])
        );
    }

    #[test]
    fn test_quoted_values_and_comments() {
        let text = "\
# full line comment
ticket = \"T1\" # comment
ticket = 'T2'#comment
authfile = /path/with#hash

name = 'with \"double\" inside'
";
        let lines = parse_to_raw_lines(text).unwrap();
        assert_eq!(
            lines,
            pairs(&[
                ("ticket", "T1"),
                ("ticket", "T2"),
                ("authfile", "/path/with#hash"),
                ("name", "with \"double\" inside"),
            ])
        );
    }

    #[test]
    fn test_empty_quoted_value() {
        let lines = parse_to_raw_lines("name = \"\"\n").unwrap();
        assert_eq!(lines, pairs(&[("name", "")]));
    }

    #[test]
    fn test_invalid_lines_all_reported() {
        let text = "site = 1.1.1.1\nsite\nbad key = value\narbitrator = 'unterminated\nkey = \n";
        let err = parse_to_raw_lines(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLines(vec![
                "site".into(),
                "bad key = value".into(),
                "arbitrator = 'unterminated".into(),
                "key =".into(),
            ])
        );
    }

    #[test]
    fn test_unquoted_value_with_quote_is_invalid() {
        assert!(parse_to_raw_lines("name = it's\n").is_err());
    }

    #[test]
    fn test_organize_lines() {
        let raw = pairs(&[
            ("site", "1.1.1.1"),
            ("expire", "100"),
            ("ticket", "TA"),
            ("timeout", "10"),
            ("site", "2.2.2.2"),
            ("ticket", "TB"),
            ("expire", "20"),
            ("arbitrator", "3.3.3.3"),
            ("weights", "1,2"),
        ]);
        assert_eq!(
            organize_lines(raw),
            vec![
                ConfigItem::new("site", "1.1.1.1"),
                ConfigItem::new("expire", "100"),
                ConfigItem::new("site", "2.2.2.2"),
                ConfigItem::new("arbitrator", "3.3.3.3"),
                ConfigItem::with_details("ticket", "TA", vec![ConfigItem::new("timeout", "10")]),
                ConfigItem::with_details(
                    "ticket",
                    "TB",
                    vec![
                        ConfigItem::new("expire", "20"),
                        ConfigItem::new("weights", "1,2"),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_build_round_trip() {
        let text = "\
site = 1.1.1.1
site = 2.2.2.2
arbitrator = 3.3.3.3
ticket = \"TA\"
  expire = 10
ticket = \"TB\"
";
        let items = parse(text).unwrap();
        assert_eq!(build(&items), text);
    }

    #[test]
    fn test_build_nested_details() {
        let items = vec![ConfigItem::with_details(
            "a",
            "1",
            vec![ConfigItem::with_details("b", "2", vec![ConfigItem::new("c", "3")])],
        )];
        assert_eq!(
            build_to_lines(&items, 0),
            vec!["a = 1", "  b = 2", "    c = 3"]
        );
        assert_eq!(build(&[]), "");
    }

    #[test]
    fn test_build_quotes_values_when_needed() {
        let items = vec![
            ConfigItem::new("authfile", ""),
            ConfigItem::new("name", " padded "),
            ConfigItem::new("name", "it's"),
            ConfigItem::new("name", "with \"double\""),
            ConfigItem::new("authfile", "/path/with#hash"),
            ConfigItem::new("ticket", "a\"b"),
        ];
        assert_eq!(
            build_to_lines(&items, 0),
            vec![
                "authfile = \"\"",
                "name = \" padded \"",
                "name = \"it's\"",
                "name = 'with \"double\"'",
                "authfile = /path/with#hash",
                "ticket = 'a\"b'",
            ]
        );
    }

    #[test]
    fn test_quoted_values_survive_rebuild() {
        let text = "site = 1.1.1.1\nauthfile = \"\"\nticket = 'a\"b'\n  weights = \"  spaced  \"\n";
        let items = parse(text).unwrap();
        assert_eq!(items[1], ConfigItem::new("authfile", ""));
        assert_eq!(items[2].value(), "a\"b");
        assert_eq!(items[2].details()[0].value(), "  spaced  ");

        let rebuilt = build(&items);
        assert_eq!(parse(&rebuilt).unwrap(), items);
    }

    #[test]
    fn test_error_to_report_list() {
        let err = ParseError::InvalidLines(vec!["x".into()]);
        let reports = error_to_report_list(&err, Some(ForceCode::Force), false, Some("/etc/booth/booth.conf"));
        assert_eq!(
            reports,
            vec![ReportItem::forceable_error(
                ReportItemMessage::BoothConfigUnexpectedLines {
                    line_list: vec!["x".into()],
                    file_path: Some("/etc/booth/booth.conf".into()),
                },
                ForceCode::Force,
            )]
        );

        let forced = error_to_report_list(&err, Some(ForceCode::Force), true, None);
        assert_eq!(forced[0].severity, ReportItemSeverity::Warning);
    }
}
