//! Integration tests for NameOrder and GroupOrder

use deckflow_foundation::ErrorKind;
use deckflow_registry::{FIELD, GroupOrder, NameOrder};
use proptest::prelude::*;

#[test]
fn erase_then_add_reappends() {
    let mut order = NameOrder::from_names(["A", "B"]).unwrap();
    assert!(order.erase("A"));
    order.add("A");
    assert_eq!(order.names(), vec!["B", "A"]);
    assert_eq!(order.len(), 2);
}

#[test]
fn duplicate_initial_names_rejected() {
    let err = NameOrder::from_names(["W1", "W2", "W1"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
}

#[test]
fn index_tracks_removals() {
    let mut order = NameOrder::from_names(["W1", "W2", "W3", "W4"]).unwrap();
    order.erase("W2");
    assert_eq!(order.index_of("W3"), Some(1));
    assert_eq!(order.get(2), Some("W4"));
    assert!(!order.has("W2"));
}

#[test]
fn pattern_lookup_in_order() {
    let order = NameOrder::from_names(["PROD2", "INJ1", "PROD1"]).unwrap();
    assert_eq!(order.names_matching("PROD*"), vec!["PROD2", "PROD1"]);
    assert_eq!(order.names_matching("INJ1"), vec!["INJ1"]);
    assert!(order.names_matching("NONE").is_empty());
    assert_eq!(
        order.sort_by_order(&["PROD1", "GHOST", "PROD2", "PROD1"]),
        vec!["PROD2", "PROD1"]
    );
}

#[test]
fn groups_restart_layout() {
    let mut groups = GroupOrder::new(3);
    groups.add("PLAT");
    groups.add("G1");
    assert_eq!(groups.names()[0], FIELD);

    let layout = groups.restart_groups().unwrap();
    assert_eq!(
        layout,
        vec![
            Some("PLAT".to_string()),
            Some("G1".to_string()),
            None,
            Some(FIELD.to_string()),
        ]
    );

    groups.add("G2");
    groups.add("G3");
    assert!(matches!(
        groups.restart_groups().unwrap_err().kind,
        ErrorKind::OutOfRange(_)
    ));
}

proptest! {
    #[test]
    fn order_is_first_insertion_without_duplicates(
        ops in prop::collection::vec((any::<bool>(), 0_u8..8), 0..60)
    ) {
        let mut order = NameOrder::new();
        let mut model: Vec<String> = Vec::new();
        for (add, n) in ops {
            let name = format!("W{n}");
            if add {
                order.add(name.clone());
                if !model.contains(&name) {
                    model.push(name);
                }
            } else {
                order.erase(&name);
                model.retain(|m| *m != name);
            }
        }
        prop_assert_eq!(order.names(), model.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
