//! Property-based tests for permissions.

use std::collections::BTreeSet;

use super::checker::complete_access_list;
use super::facade::PermissionsFacade;
use super::parser::{export, parse};
use super::types::{AccessType, PermissionEntry, PermissionTargetType};
use proptest::prelude::*;

fn access_set_strategy() -> impl Strategy<Value = BTreeSet<AccessType>> {
    prop::collection::btree_set(prop::sample::select(AccessType::ALL.to_vec()), 0..=5)
}

fn entry_strategy() -> impl Strategy<Value = PermissionEntry> {
    (
        "[a-z]{1,8}",
        prop_oneof![
            Just(PermissionTargetType::User),
            Just(PermissionTargetType::Group)
        ],
        access_set_strategy(),
    )
        .prop_map(|(name, target_type, allow)| PermissionEntry::new(name, target_type, allow))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Completion only adds levels and is idempotent
    #[test]
    fn completion_is_closure(access in access_set_strategy()) {
        let completed = complete_access_list(&access);
        prop_assert!(completed.is_superset(&access));
        prop_assert_eq!(complete_access_list(&completed), completed.clone());
        if completed.contains(&AccessType::Write) {
            prop_assert!(completed.contains(&AccessType::Read));
        }
    }

    // Completion is monotonic
    #[test]
    fn completion_is_monotonic(a in access_set_strategy(), b in access_set_strategy()) {
        let union: BTreeSet<_> = a.union(&b).copied().collect();
        let completed_union = complete_access_list(&union);
        prop_assert!(completed_union.is_superset(&complete_access_list(&a)));
        prop_assert!(completed_union.is_superset(&complete_access_list(&b)));
    }

    // One entry per user or group, whatever was set before
    #[test]
    fn set_permission_keeps_entries_unique(entries in prop::collection::vec(entry_strategy(), 0..20)) {
        let mut facade = PermissionsFacade::create("haclient");
        for entry in &entries {
            facade.set_permission(entry.clone());
        }
        let keys: BTreeSet<_> = facade
            .entries()
            .iter()
            .map(|entry| (entry.name.clone(), entry.target_type))
            .collect();
        prop_assert_eq!(keys.len(), facade.entries().len());

        let text = export(facade.config()).unwrap();
        prop_assert_eq!(&parse(&text).unwrap(), facade.config());
    }
}
