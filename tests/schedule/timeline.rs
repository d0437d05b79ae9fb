//! End-to-end schedule construction from keyword blocks

use deckflow_foundation::context::SCHEDULE_INVALID_NAME;
use deckflow_foundation::{
    DeckItem, DeckKeyword, DeckRecord, ErrorKind, InputErrorAction, ParseContext, SimTime,
};
use deckflow_matcher::SetDescriptor;
use deckflow_schedule::{Schedule, ScheduleBlock, ScheduleConfig};
use deckflow_state::UdqUpdate;

fn day(n: i64) -> SimTime {
    SimTime::from_seconds(0).plus_days(n)
}

fn welspecs(wells: &[(&str, &str)]) -> DeckKeyword {
    wells
        .iter()
        .fold(DeckKeyword::new("WELSPECS"), |kw, (well, group)| {
            kw.with_record(DeckRecord::from_pairs([("WELL", *well), ("GROUP", *group)]))
        })
}

fn wlist(name: &str, action: &str, wells: &[&str]) -> DeckKeyword {
    DeckKeyword::new("WLIST").with_record(DeckRecord::new(vec![
        DeckItem::new("NAME", [name]),
        DeckItem::new("ACTION", [action]),
        DeckItem::new("WELLS", wells.iter().copied()),
    ]))
}

fn welsegs(well: &str, ranges: &[(&str, &str)]) -> DeckKeyword {
    ranges.iter().fold(
        DeckKeyword::new("WELSEGS").with_record(DeckRecord::from_pairs([("WELL", well)])),
        |kw, (first, last)| {
            kw.with_record(DeckRecord::from_pairs([
                ("SEGMENT1", *first),
                ("SEGMENT2", *last),
            ]))
        },
    )
}

fn tokens(name: &str, tokens: &[&str]) -> DeckKeyword {
    DeckKeyword::new(name)
        .with_location("CASE.DATA", 100)
        .with_tokens(tokens.iter().copied())
}

fn udq_update(quantity: &str, status: &str) -> DeckKeyword {
    DeckKeyword::new("UDQ").with_record(DeckRecord::from_pairs([
        ("ACTION", "UPDATE"),
        ("QUANTITY", quantity),
        ("DATA", status),
    ]))
}

fn blocks() -> Vec<ScheduleBlock> {
    vec![
        ScheduleBlock::new(day(0))
            .with_keyword(welspecs(&[("OP1", "G1"), ("OP2", "G1"), ("WI1", "G2")]))
            .with_keyword(wlist("*PROD", "NEW", &["OP2", "OP1"]))
            .with_keyword(tokens("RPTSCHED", &["WELLS=2", "FIP"])),
        ScheduleBlock::new(day(31))
            .with_keyword(welsegs("OP1", &[("2", "5")]))
            .with_keyword(udq_update("WUOPR", "NEXT")),
        ScheduleBlock::new(day(59))
            .with_keyword(welspecs(&[("OP3", "G2")]))
            .with_keyword(wlist("*PROD", "ADD", &["OP3"]))
            .with_keyword(tokens("RPTSCHED", &["FIP=3"])),
    ]
}

fn schedule() -> Schedule {
    Schedule::from_blocks(ScheduleConfig::new().with_max_groups(4), &[], &blocks()).unwrap()
}

#[test]
fn one_step_per_block() {
    let schedule = schedule();
    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule.step(2).unwrap().start_time(), day(59));
    assert_eq!(schedule.step_at(day(40)), Some(1));
    assert!(schedule.step(3).is_err());
}

#[test]
fn registries_evolve_per_step() {
    let schedule = schedule();
    let first = schedule.step(0).unwrap();
    let last = schedule.current();

    assert_eq!(first.wells().names(), vec!["OP1", "OP2", "WI1"]);
    assert_eq!(last.wells().names(), vec!["OP1", "OP2", "WI1", "OP3"]);
    assert_eq!(first.wlists().wells("*PROD"), vec!["OP2", "OP1"]);
    assert_eq!(last.wlists().wells("*PROD"), vec!["OP2", "OP1", "OP3"]);
    assert_eq!(last.groups().names(), vec!["FIELD", "G1", "G2"]);
}

#[test]
fn well_list_patterns_expand_in_well_order() {
    let schedule = schedule();
    assert_eq!(
        schedule.current().well_matcher().wells("*PROD"),
        vec!["OP1", "OP2", "OP3"]
    );
}

#[test]
fn segments_become_queryable() {
    let schedule = schedule();
    assert!(schedule.step(0).unwrap().well_catalog().get("OP1").unwrap().segments.is_none());

    let state = schedule.step(1).unwrap();
    let request = SetDescriptor::new().with_owner("OP1").with_id(3);
    let found = state.segment_matcher().find_segments(&request);
    assert_eq!(found.entities("OP1"), &[3]);

    let missing = SetDescriptor::new().with_owner("OP1").with_id(99);
    assert!(state.segment_matcher().find_segments(&missing).is_empty());
}

#[test]
fn report_requests_carry_forward() {
    let schedule = schedule();
    let middle = schedule.step(1).unwrap().rpt_config();
    assert_eq!(middle.iter().collect::<Vec<_>>(), vec![("WELLS", 2), ("FIP", 1)]);
    let last = schedule.current().rpt_config();
    assert_eq!(last.iter().collect::<Vec<_>>(), vec![("WELLS", 2), ("FIP", 3)]);
}

#[test]
fn udq_next_expires_at_following_step() {
    let schedule = schedule();
    assert_eq!(
        schedule.udq_state().update_status("WUOPR"),
        (UdqUpdate::Off, 1)
    );
}

#[test]
fn undefined_well_in_list_is_fatal_by_default() {
    let mut blocks = blocks();
    blocks[2] = ScheduleBlock::new(day(59)).with_keyword(wlist("*PROD", "ADD", &["GHOST"]));
    let err = Schedule::from_blocks(ScheduleConfig::new(), &[], &blocks).unwrap_err();
    match err.kind {
        ErrorKind::InputError { key, .. } => assert_eq!(key, SCHEDULE_INVALID_NAME),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn undefined_well_can_be_delayed() {
    let mut blocks = blocks();
    blocks[2] = ScheduleBlock::new(day(59)).with_keyword(wlist("*PROD", "ADD", &["GHOST"]));
    let ctx = ParseContext::new().with(SCHEDULE_INVALID_NAME, InputErrorAction::DelayedExit);
    let config = ScheduleConfig::new().with_parse_context(ctx);
    assert!(Schedule::from_blocks(config, &[], &blocks).is_err());
}

#[test]
fn undefined_well_can_be_ignored() {
    let mut blocks = blocks();
    blocks[2] = ScheduleBlock::new(day(59)).with_keyword(wlist("*PROD", "ADD", &["GHOST"]));
    let ctx = ParseContext::new().with(SCHEDULE_INVALID_NAME, InputErrorAction::Ignore);
    let config = ScheduleConfig::new().with_parse_context(ctx);
    let schedule = Schedule::from_blocks(config, &[], &blocks).unwrap();
    assert_eq!(schedule.current().wlists().wells("*PROD"), vec!["OP2", "OP1"]);
    assert_eq!(schedule.guard().warnings().len(), 1);
}

#[test]
fn mixed_report_style_warns_and_continues() {
    let blocks = vec![
        ScheduleBlock::new(day(0)).with_keyword(tokens("RPTRST", &["BASIC", "=", "2"])),
    ];
    let schedule = Schedule::from_blocks(ScheduleConfig::new(), &[], &blocks).unwrap();
    assert_eq!(schedule.current().rst_config().basic(), Some(2));
    assert_eq!(schedule.guard().warnings().len(), 1);

    assert!(Schedule::from_blocks(ScheduleConfig::strict(), &[], &blocks).is_err());
}

#[test]
fn solution_seeds_first_restart_config() {
    let solution = [tokens("RPTRST", &["BASIC=2", "KRO"])];
    let blocks = vec![ScheduleBlock::new(day(0)), ScheduleBlock::new(day(10))];
    let schedule = Schedule::from_blocks(ScheduleConfig::new(), &solution, &blocks).unwrap();
    for state in schedule.iter() {
        assert_eq!(state.rst_config().basic(), Some(2));
        assert_eq!(state.rst_config().keyword("KRO"), Some(1));
    }
}
