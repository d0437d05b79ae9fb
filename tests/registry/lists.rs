//! Integration tests for well lists and well segment layouts

use deckflow_foundation::ErrorKind;
use deckflow_registry::{WListManager, Well, WellCatalog, WellSegments};

#[test]
fn reverse_mapping_follows_edits() {
    let mut lists = WListManager::new();
    lists.new_list("*A", &["W1", "W2"]).unwrap();
    lists.new_list("*B", &["W2"]).unwrap();
    assert_eq!(lists.lists_of_well("W2"), &["*A".to_string(), "*B".to_string()]);

    assert!(lists.del_well("W2"));
    assert!(lists.lists_of_well("W2").is_empty());
    assert_eq!(lists.wells("*A"), vec!["W1"]);
    assert!(lists.wells("*B").is_empty());
}

#[test]
fn new_list_resets_members() {
    let mut lists = WListManager::new();
    lists.new_list("*A", &["W1", "W2"]).unwrap();
    lists.new_list("*A", &["W3"]).unwrap();
    assert_eq!(lists.wells("*A"), vec!["W3"]);
    assert!(lists.lists_of_well("W1").is_empty());
}

#[test]
fn list_patterns_merge_in_name_order() {
    let mut lists = WListManager::new();
    lists.new_list("*OP2", &["W3", "W1"]).unwrap();
    lists.new_list("*OP1", &["W1", "W2"]).unwrap();
    lists.new_list("*INJ", &["W9"]).unwrap();
    assert_eq!(lists.wells("*OP*"), vec!["W1", "W2", "W3"]);
    assert!(lists.has_well("*OP?"));
    assert!(!lists.has_well("*XX*"));
}

#[test]
fn list_names_need_marker() {
    let mut lists = WListManager::new();
    let err = lists.new_list("OPEN", &["W1"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    assert!(lists.add_list_well("W1", "*MISSING").is_err());
}

#[test]
fn segments_require_defined_well() {
    let mut catalog = WellCatalog::new();
    catalog.insert(Well::new("W1", "G1"));
    catalog
        .set_segments("W1", WellSegments::new([1, 2, 3]).unwrap())
        .unwrap();
    assert!(catalog.is_multi_segment("W1"));
    assert!(catalog.set_segments("W2", WellSegments::default()).is_err());

    catalog.define("W1", "G2");
    assert_eq!(catalog.get("W1").map(|w| w.group.as_str()), Some("G2"));
    assert!(catalog.is_multi_segment("W1"));
}

#[test]
fn segment_numbers_validated() {
    assert!(WellSegments::new([1, 0]).is_err());
    assert!(WellSegments::new([1, 2, 2]).is_err());
    let segments = WellSegments::new([1, 4, 2]).unwrap();
    assert_eq!(segments.numbers(), &[1, 4, 2]);
    assert!(segments.has(4));
}
