//! Integration tests for the deterministic map builder

use std::collections::{BTreeMap, HashMap};

use deckflow_foundation::{ErrorKind, InsertionMode, MapBuilder, partition};
use indexmap::IndexMap;

#[test]
fn parallel_build_matches_sequential() {
    let parallel: IndexMap<usize, usize> =
        MapBuilder::build_parallel(0..1_000, 8, InsertionMode::LastWins, |i| {
            (i % 3 != 0).then_some((i % 50, i))
        })
        .unwrap();

    let mut sequential = IndexMap::new();
    for i in (0..1_000).filter(|i| i % 3 != 0) {
        sequential.insert(i % 50, i);
    }
    assert_eq!(parallel, sequential);
    assert!(parallel.keys().eq(sequential.keys()));
}

#[test]
fn first_wins_keeps_lowest_index() {
    let map: BTreeMap<usize, usize> =
        MapBuilder::build_parallel(0..100, 4, InsertionMode::FirstWins, |i| Some((i % 10, i)))
            .unwrap();
    for (key, value) in map {
        assert_eq!(key, value);
    }
}

#[test]
fn workers_out_of_order_rejected() {
    let builder = MapBuilder::new(2, InsertionMode::LastWins);
    builder.insert_indexed(0, 10, "b", 2).unwrap();
    builder.insert_indexed(1, 3, "a", 1).unwrap();
    let err = builder.finalize::<HashMap<&str, i32>>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::PartitionViolation(_)));
}

#[test]
fn unknown_worker_rejected() {
    let builder: MapBuilder<i32, i32> = MapBuilder::new(2, InsertionMode::LastWins);
    let err = builder.insert(5, 1, 1).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange(_)));
}

#[test]
fn partition_covers_range() {
    let blocks = partition(3..13, 3);
    assert_eq!(blocks, vec![3..7, 7..10, 10..13]);
    assert_eq!(partition(0..2, 4).iter().map(|b| b.len()).sum::<usize>(), 2);
}
