//! Integration tests for action run bookkeeping

use deckflow_foundation::{DeckRecord, SimTime};
use deckflow_state::{ActionResult, ActionState, ActionX, RstAction, RstState};

fn day(n: i64) -> SimTime {
    SimTime::from_seconds(0).plus_days(n)
}

#[test]
fn run_history_counts_every_run() {
    let action = ActionX::new("ACT", 10, 0, day(0));
    let mut state = ActionState::new();
    for d in [5, 8, 12] {
        state.add_run(&action, day(d), ActionResult::new(true));
    }

    assert_eq!(state.run_count(&action), 3);
    assert_eq!(state.run_time(&action).unwrap(), day(12));
}

#[test]
fn redefinitions_are_counted_separately() {
    let first = ActionX::new("ACT", 10, 0, day(0)).with_id(1);
    let second = ActionX::new("ACT", 10, 0, day(20)).with_id(2);
    let mut state = ActionState::new();
    state.add_run(&first, day(5), ActionResult::new(true));
    state.add_run(&first, day(8), ActionResult::new(true));
    state.add_run(&second, day(25), ActionResult::new(true));

    assert_eq!(state.run_count(&first), 2);
    assert_eq!(state.run_count(&second), 1);
    assert_eq!(state.run_time(&second).unwrap(), day(25));
}

#[test]
fn never_run_action() {
    let action = ActionX::new("IDLE", 1, 0, day(0));
    let state = ActionState::new();
    assert_eq!(state.run_count(&action), 0);
    assert!(state.run_time(&action).is_err());
    assert!(action.ready(&state, day(1)));
}

#[test]
fn readiness_honours_limits() {
    let action = ActionX::new("ACT", 2, 86_400 * 3, day(2));
    let mut state = ActionState::new();
    assert!(!action.ready(&state, day(1)));
    assert!(action.ready(&state, day(2)));

    state.add_run(&action, day(2), ActionResult::new(true));
    assert!(!action.ready(&state, day(4)));
    assert!(action.ready(&state, day(5)));

    state.add_run(&action, day(5), ActionResult::new(true));
    assert!(!action.ready(&state, day(100)));
}

#[test]
fn zero_max_run_is_never_ready() {
    let action = ActionX::new("ACT", 0, 0, day(0));
    let state = ActionState::new();
    assert!(!action.ready(&state, day(0)));
    assert!(!action.ready(&state, day(365)));
}

#[test]
fn result_keeps_matching_wells() {
    let action = ActionX::new("ACT", 5, 0, day(0));
    let mut state = ActionState::new();
    state.add_run(
        &action,
        day(1),
        ActionResult::new(true).with_wells(["OP1", "OP2"]),
    );
    state.add_run(&action, day(2), ActionResult::new(true));

    let result = state.result("ACT").unwrap();
    assert!(result.condition_satisfied());
    assert!(result.has_well("OP2"));
    assert!(!result.has_well("OP3"));
}

#[test]
fn from_record_reads_limits() {
    let record = DeckRecord::from_pairs([("NAME", "ACT"), ("NUM", "4"), ("MIN_WAIT", "3600")]);
    let action = ActionX::from_record(&record, day(1), 7).unwrap();
    assert_eq!(action.name(), "ACT");
    assert_eq!(action.id(), 7);
    assert_eq!(action.max_run(), 4);
    assert_eq!(action.min_wait(), 3_600);
    assert_eq!(action.start_time(), day(1));
}

#[test]
fn restart_history_resumes() {
    let action = ActionX::new("ACT", 10, 0, day(0)).with_id(3);
    let rst = RstState {
        actions: vec![
            RstAction::new("ACT", 3, 4, Some(day(30))),
            RstAction::new("IDLE", 1, 0, None),
        ],
        udqs: Vec::new(),
    };
    let mut state = ActionState::new();
    state.load_rst(&rst);

    assert_eq!(state.run_count(&action), 4);
    assert_eq!(state.run_time(&action).unwrap(), day(30));
    assert_eq!(state.run_count(&ActionX::new("IDLE", 1, 0, day(0)).with_id(1)), 0);

    state.add_run(&action, day(31), ActionResult::new(true));
    assert_eq!(state.run_count(&action), 5);
}
