//! Integration tests for WellMatcher and WellListMatcher

use deckflow_matcher::{WellListMatcher, WellListQuery, WellMatcher};
use deckflow_registry::{NameOrder, WListManager};

fn order() -> NameOrder {
    NameOrder::from_names(["OP1", "OP2", "WI1", "OP3"]).unwrap()
}

fn lists() -> WListManager {
    let mut lists = WListManager::new();
    lists.new_list("*PROD", &["OP3", "OP1", "GONE"]).unwrap();
    lists.new_list("*INJ", &["WI1"]).unwrap();
    lists
}

#[test]
fn list_members_in_well_order() {
    let order = order();
    let lists = lists();
    let matcher = WellMatcher::with_wlists(&order, &lists);
    assert_eq!(matcher.wells("*PROD"), vec!["OP1", "OP3"]);
    assert_eq!(matcher.wells("OP*"), vec!["OP1", "OP2", "OP3"]);
    assert_eq!(matcher.wells("WI1"), vec!["WI1"]);
    assert!(matcher.wells("XX").is_empty());
}

#[test]
fn lists_ignored_without_manager() {
    let order = order();
    let matcher = WellMatcher::new(&order);
    assert!(matcher.wells("*PROD").is_empty());
    assert_eq!(matcher.all().len(), 4);
}

#[test]
fn list_query_by_list_and_well() {
    let lists = lists();
    let matcher = WellListMatcher::new(&lists);

    let all = matcher.find_wells(&WellListQuery::new());
    assert_eq!(all.owners().collect::<Vec<_>>(), vec!["*INJ", "*PROD"]);

    let members = matcher.find_wells(&WellListQuery::new().with_list("PROD").with_well("OP*"));
    assert_eq!(members.entities("*PROD"), &["OP3".to_string(), "OP1".to_string()]);

    let missing = matcher.find_wells(&WellListQuery::new().with_list("*NONE"));
    assert!(missing.is_empty());
}
