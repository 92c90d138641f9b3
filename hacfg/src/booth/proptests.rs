//! Property-based tests for booth configuration handling.

use super::config_structure::{ConfigItem, GLOBAL_KEYS, TICKET_KEYS};
use super::exchange::{from_exchange_format, to_exchange_format};
use super::parser::{build, build_to_lines, organize_lines, parse, parse_to_raw_lines};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(GLOBAL_KEYS).prop_map(String::from),
        prop::sample::select(TICKET_KEYS).prop_map(String::from),
        "[a-z][a-z0-9_-]{0,10}",
    ]
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_./:-][a-zA-Z0-9_./: #-]{0,15}".prop_map(|value| value.trim_end().to_string()),
        Just(String::new()),
        " {0,3}[a-zA-Z0-9_. #-]{0,10} {0,3}",
        "[a-zA-Z0-9 #']{0,12}",
        "[a-zA-Z0-9 #\"]{0,12}",
    ]
}

fn raw_lines_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..30)
}

fn item_strategy() -> impl Strategy<Value = ConfigItem> {
    let leaf = (any::<String>(), any::<String>()).prop_map(|(key, value)| ConfigItem::new(key, value));
    leaf.prop_recursive(4, 32, 5, |inner| {
        (any::<String>(), any::<String>(), prop::collection::vec(inner, 0..5))
            .prop_map(|(key, value, details)| ConfigItem::with_details(key, value, details))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Organizing the exported form of organized lines changes nothing
    #[test]
    fn organize_is_idempotent(raw in raw_lines_strategy()) {
        let organized = organize_lines(raw);
        let text = build(&organized);
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(&reparsed, &organized);
        prop_assert_eq!(build(&reparsed), text);
    }

    // Global keys never end up in ticket details
    #[test]
    fn globals_never_nested(raw in raw_lines_strategy()) {
        for item in organize_lines(raw) {
            for detail in item.details() {
                prop_assert!(!GLOBAL_KEYS.contains(&detail.key()));
            }
        }
    }

    // Organizing keeps every line, only moving it
    #[test]
    fn organize_keeps_line_count(raw in raw_lines_strategy()) {
        let count = raw.len();
        let organized = organize_lines(raw);
        prop_assert_eq!(build_to_lines(&organized, 0).len(), count);
    }

    // Exchange format conversion is lossless
    #[test]
    fn exchange_round_trip(items in prop::collection::vec(item_strategy(), 0..8)) {
        let data = to_exchange_format(&items);
        prop_assert_eq!(from_exchange_format(&data).unwrap(), items);
    }

    // Parsing never panics, whatever the input
    #[test]
    fn raw_parse_total(text in ".{0,200}") {
        let _ = parse_to_raw_lines(&text);
    }
}
