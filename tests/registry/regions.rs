//! Integration tests for region statistics

use deckflow_registry::RegionStatistics;

#[test]
fn maxima_from_region_arrays() {
    let fipnum = [1, 2, 3, 3, 1];
    let fipabc = [4, 4, 0];
    let stats = RegionStatistics::from_region_arrays(
        6,
        [("FIPNUM", &fipnum[..]), ("FIPABC", &fipabc[..])],
        |_| {},
    )
    .unwrap();
    assert_eq!(stats.max_region_id("NUM"), 3);
    assert_eq!(stats.max_region_id("ABC"), 4);
    assert_eq!(stats.region_sets().collect::<Vec<_>>(), vec!["ABC", "NUM"]);
    assert_eq!(stats.declared_max(), 6);
}

#[test]
fn reduction_hook_sees_set_order() {
    let fipnum = [2];
    let fipabc = [1];
    let stats = RegionStatistics::from_region_arrays(
        0,
        [("FIPNUM", &fipnum[..]), ("FIPABC", &fipabc[..])],
        |maxima| {
            for max in maxima.iter_mut() {
                *max += 10;
            }
        },
    )
    .unwrap();
    assert_eq!(stats.max_region_id("ABC"), 11);
    assert_eq!(stats.max_region_id("NUM"), 12);
}

#[test]
fn non_fip_array_rejected() {
    let cells = [1];
    assert!(RegionStatistics::from_region_arrays(1, [("SATNUM", &cells[..])], |_| {}).is_err());
    assert!(RegionStatistics::from_region_arrays(1, [("FIP", &cells[..])], |_| {}).is_err());
}

#[test]
fn unknown_set_has_no_regions() {
    let stats = RegionStatistics::from_maxima(5, [("NUM", 2)]);
    assert!(stats.has_set("NUM"));
    assert!(!stats.has_set("XYZ"));
    assert_eq!(stats.max_region_id("XYZ"), 0);
}
