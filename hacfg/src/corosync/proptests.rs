//! Property-based tests for corosync.conf handling.

use super::node::{AddressResolver, CorosyncNode, CorosyncNodeAddress, NodeSpec};
use super::parser::parse;
use super::section::SectionTree;
use super::validators;
use proptest::prelude::*;

struct ResolvesAll;

impl AddressResolver for ResolvesAll {
    fn resolves(&self, _host: &str) -> bool {
        true
    }
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:/ -]{0,20}".prop_map(|value| value.trim().to_string())
}

#[derive(Debug, Clone)]
struct SectionSketch {
    name: String,
    attributes: Vec<(String, String)>,
    sections: Vec<SectionSketch>,
}

fn section_strategy() -> impl Strategy<Value = SectionSketch> {
    let leaf = (
        name_strategy(),
        prop::collection::vec((name_strategy(), value_strategy()), 0..5),
    )
        .prop_map(|(name, attributes)| SectionSketch {
            name,
            attributes,
            sections: Vec::new(),
        });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            name_strategy(),
            prop::collection::vec((name_strategy(), value_strategy()), 0..5),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(name, attributes, sections)| SectionSketch {
                name,
                attributes,
                sections,
            })
    })
}

fn build(tree: &mut SectionTree, parent: super::SectionId, sketch: &SectionSketch) {
    let id = tree.add_new_section(parent, sketch.name.clone());
    for (key, value) in &sketch.attributes {
        tree.add_attribute(id, key.clone(), value.clone());
    }
    for child in &sketch.sections {
        build(tree, id, child);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Exported text parses back into the same tree
    #[test]
    fn export_then_parse_preserves_tree(
        root_attributes in prop::collection::vec((name_strategy(), value_strategy()), 0..4),
        sections in prop::collection::vec(section_strategy(), 0..4),
    ) {
        let mut tree = SectionTree::new();
        let root = tree.new_section("");
        for (key, value) in &root_attributes {
            tree.add_attribute(root, key.clone(), value.clone());
        }
        for sketch in &sections {
            build(&mut tree, root, sketch);
        }

        let text = tree.export(root);
        let (parsed, parsed_root) = parse(&text).unwrap();
        prop_assert_eq!(parsed.snapshot(parsed_root), tree.snapshot(root));
        prop_assert_eq!(parsed.export(parsed_root), text);
    }

    // Brace balance decides parse success
    #[test]
    fn unbalanced_braces_fail(opened in 1usize..6, closed in 0usize..6) {
        let mut text = "a {\n".repeat(opened);
        text.push_str(&"}\n".repeat(closed));
        let result = parse(&text);
        prop_assert_eq!(result.is_ok(), opened == closed);
    }

    // A node gets a count report exactly when its address count differs
    // from the number of links in the cluster
    #[test]
    fn address_count_matches_links(links in 1usize..5, given in 0usize..9) {
        let existing = vec![CorosyncNode::new(
            Some("node1".into()),
            (0..links)
                .map(|link| CorosyncNodeAddress::new(format!("10.0.{link}.1"), link.to_string()))
                .collect(),
            Some("1".into()),
        ).unwrap()];
        let spec = NodeSpec {
            name: Some("node2".into()),
            addrs: (0..given).map(|link| format!("10.0.{link}.2")).collect(),
        };

        let reports = validators::add_nodes(&[spec], &existing, &[], false, &ResolvesAll);
        let has_count_report = reports
            .iter()
            .any(|report| report.code() == "BAD_NODE_ADDRESSES_COUNT");
        prop_assert_eq!(has_count_report, links != given);
    }
}
