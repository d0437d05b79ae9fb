//! Integration tests for parse context policy and the error guard

use deckflow_foundation::context::{
    RPT_INVALID_VALUE, RPT_MIXED_STYLE, RPT_UNKNOWN_MNEMONIC, SCHEDULE_INVALID_NAME,
};
use deckflow_foundation::{ErrorGuard, ErrorKind, InputErrorAction, KeywordLocation, ParseContext};

#[test]
fn defaults_per_key() {
    let ctx = ParseContext::new();
    assert_eq!(ctx.action(RPT_MIXED_STYLE), InputErrorAction::Warn);
    assert_eq!(ctx.action(RPT_UNKNOWN_MNEMONIC), InputErrorAction::Warn);
    assert_eq!(ctx.action(SCHEDULE_INVALID_NAME), InputErrorAction::Throw);
}

#[test]
fn glob_update_touches_matching_keys() {
    let mut ctx = ParseContext::new();
    let updated = ctx.update("RPT_*", InputErrorAction::Ignore);
    assert_eq!(updated, 3);
    assert_eq!(ctx.action(RPT_INVALID_VALUE), InputErrorAction::Ignore);
    assert_eq!(ctx.action(SCHEDULE_INVALID_NAME), InputErrorAction::Throw);
}

#[test]
fn override_list_is_colon_separated() {
    let mut ctx = ParseContext::new();
    ctx.apply_override_list("RPT_MIXED_STYLE: SCHEDULE_*", InputErrorAction::DelayedExit);
    assert_eq!(ctx.action(RPT_MIXED_STYLE), InputErrorAction::DelayedExit);
    assert_eq!(ctx.action(SCHEDULE_INVALID_NAME), InputErrorAction::DelayedExit);
    assert_eq!(ctx.action(RPT_UNKNOWN_MNEMONIC), InputErrorAction::Warn);
}

#[test]
fn handle_error_routes_by_action() {
    let loc = KeywordLocation::new("RPTSCHED", "CASE.DATA", 200);
    let ctx = ParseContext::new()
        .with(RPT_MIXED_STYLE, InputErrorAction::Ignore)
        .with(RPT_INVALID_VALUE, InputErrorAction::DelayedExit);
    let mut guard = ErrorGuard::new();

    ctx.handle_error(RPT_MIXED_STYLE, "mixed", Some(&loc), &mut guard)
        .unwrap();
    ctx.handle_error(RPT_UNKNOWN_MNEMONIC, "unknown", Some(&loc), &mut guard)
        .unwrap();
    ctx.handle_error(RPT_INVALID_VALUE, "bad value", None, &mut guard)
        .unwrap();
    assert_eq!(guard.warnings().len(), 2);
    assert_eq!(guard.errors().len(), 1);
    assert!(guard.has_errors());

    let err = ctx
        .handle_error(SCHEDULE_INVALID_NAME, "no such well", Some(&loc), &mut guard)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InputError { .. }));
    assert!(guard.is_empty());
}

#[test]
fn unknown_keys_throw() {
    let ctx = ParseContext::new();
    assert!(!ctx.has_key("SUMMARY_UNKNOWN"));
    assert_eq!(ctx.action("SUMMARY_UNKNOWN"), InputErrorAction::Throw);
}
