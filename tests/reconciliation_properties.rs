use std::collections::BTreeSet;

use proptest::prelude::*;

use alliance_tracker::achievements::{IdentityRecord, IdentityRegistry, reconcile_achievers};
use alliance_tracker::normalize::{normalize_for_comparison, normalize_for_identity};
use alliance_tracker::{RosterEntry, compare_rosters};

fn arb_roster(prefix: &'static str) -> impl Strategy<Value = Vec<RosterEntry>> {
    prop::collection::vec(("[A-Za-z ]{0,4}", 0u64..5_000), 0..20).prop_map(move |rows| {
        rows.into_iter()
            .map(|(nick, points)| RosterEntry::new(format!("{prefix}{nick}"), points))
            .collect()
    })
}

fn arb_registry() -> impl Strategy<Value = IdentityRegistry> {
    prop::collection::vec(("u[0-9]{1,2}", "[A-Za-z_ -]{1,6}"), 0..15).prop_map(|rows| {
        rows.into_iter()
            .map(|(id, nick)| (id, IdentityRecord { nick }))
            .collect()
    })
}

fn arb_achievers() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("u[0-9]{1,2}", 0..8)
}

proptest! {
    #[test]
    fn comparing_roster_with_itself_is_empty(roster in arb_roster("p")) {
        let cmp = compare_rosters(&roster, &roster);
        prop_assert_eq!(cmp.total_delta, 0);
        prop_assert!(cmp.changes.is_empty());
    }

    #[test]
    fn disjoint_rosters_have_no_delta(previous in arb_roster("x"), current in arb_roster("y")) {
        // prefiksy x/y gwarantują rozłączne klucze
        let cmp = compare_rosters(&previous, &current);
        prop_assert_eq!(cmp.total_delta, 0);
        prop_assert!(cmp.changes.is_empty());
    }

    #[test]
    fn total_is_sum_of_changes(previous in arb_roster("p"), current in arb_roster("p")) {
        let cmp = compare_rosters(&previous, &current);
        let sum: i64 = cmp.changes.iter().map(|c| c.delta).sum();
        prop_assert_eq!(cmp.total_delta, sum);
        prop_assert!(cmp.changes.iter().all(|c| c.delta != 0));
    }

    #[test]
    fn changes_only_name_players_present_in_both(previous in arb_roster("p"), current in arb_roster("p")) {
        let cmp = compare_rosters(&previous, &current);
        let before: BTreeSet<String> =
            previous.iter().map(|e| normalize_for_comparison(&e.nickname)).collect();
        for c in &cmp.changes {
            prop_assert!(current.iter().any(|e| e.nickname == c.nickname));
            prop_assert!(before.contains(&normalize_for_comparison(&c.nickname)));
        }
    }

    #[test]
    fn comparison_key_has_no_whitespace(nick in "\\PC{0,12}") {
        let key = normalize_for_comparison(&nick);
        prop_assert!(!key.chars().any(char::is_whitespace));
    }

    #[test]
    fn identity_key_is_lowercase_ascii_alphanumeric(nick in "\\PC{0,12}") {
        let key = normalize_for_identity(&nick);
        prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn achievers_only_grow(
        roster in arb_roster(""),
        registry in arb_registry(),
        existing in arb_achievers(),
        threshold in 0u64..5_000,
    ) {
        let rec = reconcile_achievers(&roster, threshold, &registry, &existing);
        prop_assert!(existing.is_subset(&rec.achievers));
        for id in &rec.newly_added {
            prop_assert!(!existing.contains(id));
            prop_assert!(registry.contains_key(id));
        }
    }

    #[test]
    fn reconciling_twice_equals_once(
        roster in arb_roster(""),
        registry in arb_registry(),
        existing in arb_achievers(),
        threshold in 0u64..5_000,
    ) {
        let once = reconcile_achievers(&roster, threshold, &registry, &existing);
        let twice = reconcile_achievers(&roster, threshold, &registry, &once.achievers);
        prop_assert_eq!(&once.achievers, &twice.achievers);
        prop_assert!(twice.newly_added.is_empty());
        prop_assert_eq!(once.unresolved, twice.unresolved);
    }
}
