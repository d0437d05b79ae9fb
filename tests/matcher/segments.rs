//! Integration tests for SegmentMatcher

use deckflow_matcher::{SegmentMatcher, SetDescriptor};
use deckflow_registry::{NameOrder, WListManager, Well, WellCatalog, WellSegments};

struct Fixture {
    order: NameOrder,
    catalog: WellCatalog,
    wlists: WListManager,
}

impl Fixture {
    fn new() -> Self {
        let order = NameOrder::from_names(["W1", "W2", "VERT"]).unwrap();
        let mut catalog = WellCatalog::new();
        catalog.insert(Well::new("W1", "G").with_segments(WellSegments::new(1..=5).unwrap()));
        catalog.insert(Well::new("W2", "G").with_segments(WellSegments::new([1, 2]).unwrap()));
        catalog.insert(Well::new("VERT", "G"));
        let mut wlists = WListManager::new();
        wlists.new_list("*MSW", &["W2"]).unwrap();
        Self {
            order,
            catalog,
            wlists,
        }
    }

    fn matcher(&self) -> SegmentMatcher<'_> {
        SegmentMatcher::new(&self.order, &self.catalog, &self.wlists)
    }
}

#[test]
fn single_well_single_segment() {
    let fixture = Fixture::new();
    let result = fixture
        .matcher()
        .find_segments(&SetDescriptor::new().with_owner("W1").with_id(3));
    assert!(result.is_scalar());
    assert_eq!(result.entities("W1"), &[3]);
}

#[test]
fn undefined_segment_is_empty() {
    let fixture = Fixture::new();
    let result = fixture
        .matcher()
        .find_segments(&SetDescriptor::new().with_owner("W1").with_id(99));
    assert!(result.is_empty());
}

#[test]
fn no_owner_no_id_lists_everything() {
    let fixture = Fixture::new();
    let result = fixture.matcher().find_segments(&SetDescriptor::new());
    assert_eq!(result.owners().collect::<Vec<_>>(), vec!["W1", "W2"]);
    assert_eq!(result.entities("W1"), &[1, 2, 3, 4, 5]);
    assert_eq!(result.entities("W2"), &[1, 2]);
    assert_eq!(result.len(), 7);
}

#[test]
fn standard_wells_are_not_owners() {
    let fixture = Fixture::new();
    let result = fixture
        .matcher()
        .find_segments(&SetDescriptor::new().with_owner("VERT"));
    assert!(result.is_empty());
}

#[test]
fn list_and_glob_owners() {
    let fixture = Fixture::new();
    let by_list = fixture
        .matcher()
        .find_segments(&SetDescriptor::new().with_owner("*MSW"));
    assert_eq!(by_list.owners().collect::<Vec<_>>(), vec!["W2"]);

    let by_glob = fixture
        .matcher()
        .find_segments(&SetDescriptor::new().with_owner("W*").with_id(2));
    assert_eq!(by_glob.num_owners(), 2);
    assert_eq!(by_glob.entities_at(1), &[2]);
}

#[test]
fn parsed_ids() {
    let fixture = Fixture::new();
    let request = SetDescriptor::new().with_owner("W1").parse_id("'4'").unwrap();
    assert_eq!(fixture.matcher().find_segments(&request).entities("W1"), &[4]);

    let all = SetDescriptor::new().with_owner("W1").parse_id("*").unwrap();
    assert_eq!(fixture.matcher().find_segments(&all).len(), 5);

    assert!(SetDescriptor::new().parse_id(" 4").is_err());
    assert!(SetDescriptor::new().parse_id("'4").is_err());
}
