//! Saving and restoring simulator run state

use deckflow_foundation::{DeckItem, DeckKeyword, DeckRecord, SimTime};
use deckflow_schedule::serialize::{load_from_file, save_to_file};
use deckflow_schedule::{Schedule, ScheduleConfig};
use deckflow_state::{ActionResult, ActionX, RstAction, RstState, RstUdq, UdqSet, UdqVarType};

fn start() -> SimTime {
    SimTime::from_seconds(0)
}

fn action() -> ActionX {
    ActionX::new("ACT", 3, 0, start())
}

fn schedule_with_history() -> Schedule {
    let mut schedule = Schedule::new(ScheduleConfig::new(), start());
    schedule
        .apply_keyword(
            &DeckKeyword::new("WELSPECS")
                .with_record(DeckRecord::from_pairs([("WELL", "OP1"), ("GROUP", "G1")])),
        )
        .unwrap();
    schedule
        .apply_keyword(&DeckKeyword::new("WLIST").with_record(DeckRecord::new(vec![
            DeckItem::new("NAME", ["*PROD"]),
            DeckItem::new("ACTION", ["NEW"]),
            DeckItem::new("WELLS", ["OP1"]),
        ])))
        .unwrap();
    schedule.action_state_mut().add_run(
        &action(),
        start().plus_days(5),
        ActionResult::new(true).with_wells(["OP1"]),
    );
    schedule
        .udq_state_mut()
        .add_assign("FUOPR", &UdqSet::scalar("FUOPR", Some(42.0)))
        .unwrap();
    schedule
}

#[test]
fn state_survives_file_round_trip() {
    let schedule = schedule_with_history();
    let path = std::env::temp_dir().join("deckflow_schedule_persistence.msgpack");
    save_to_file(&schedule.simulator_state(), &path).unwrap();

    let mut resumed = Schedule::new(ScheduleConfig::new(), start());
    resumed.restore(load_from_file(&path).unwrap());
    let _ = std::fs::remove_file(&path);

    assert_eq!(resumed.action_state().run_count(&action()), 1);
    assert!(resumed.action_state().result("ACT").unwrap().has_well("OP1"));
    assert!((resumed.udq_state().get("FUOPR").unwrap() - 42.0).abs() < 1e-12);
    assert_eq!(resumed.current().wlists().wells("*PROD"), vec!["OP1"]);
    assert_eq!(resumed.simulator_state(), schedule.simulator_state());
}

#[test]
fn restart_data_seeds_run_state() {
    let rst = RstState {
        actions: vec![RstAction::new("ACT", 0, 2, Some(start().plus_days(40)))],
        udqs: vec![RstUdq::entities(
            "WUBHP",
            UdqVarType::Well,
            [("OP1", 150.0)],
        )],
    };
    let mut schedule = Schedule::new(ScheduleConfig::new(), start());
    schedule.load_rst(&rst);

    assert_eq!(schedule.action_state().run_count(&action()), 2);
    assert_eq!(
        schedule.action_state().run_time(&action()).unwrap(),
        start().plus_days(40)
    );
    assert!((schedule.udq_state().get_well_var("OP1", "WUBHP").unwrap() - 150.0).abs() < 1e-12);
}
