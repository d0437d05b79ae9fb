//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use deckflow_foundation::{Error, ErrorContext, ErrorKind, KeywordLocation};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_argument() {
    let err = Error::invalid_argument("segment number -1 must be positive");
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    assert!(format!("{err}").contains("-1"));
}

#[test]
fn error_out_of_range() {
    let err = Error::out_of_range("index 4 of 3");
    assert!(matches!(err.kind, ErrorKind::OutOfRange(_)));
}

#[test]
fn error_not_udq() {
    let err = Error::not_udq("FOPR");
    assert!(matches!(err.kind, ErrorKind::NotUdq(ref key) if key == "FOPR"));
    assert!(format!("{err}").contains("FOPR"));
}

#[test]
fn error_input_error_without_location() {
    let err = Error::input_error("RPT_UNKNOWN_MNEMONIC", "unknown mnemonic XYZ", None);
    let msg = format!("{err}");
    assert!(msg.starts_with("RPT_UNKNOWN_MNEMONIC"));
    assert!(!msg.contains(" line "));
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: Error = io.into();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_from_location() {
    let loc = KeywordLocation::new("WLIST", "SCHED.INC", 88);
    let err = Error::invalid_argument("bad list").with_context(ErrorContext::at(&loc));
    let context = err.context.expect("context attached");
    assert_eq!(context.source.as_deref(), Some("SCHED.INC"));
    assert_eq!(context.line, Some(88));
    assert_eq!(context.stack, vec!["WLIST".to_string()]);
}

#[test]
fn context_builder() {
    let context = ErrorContext::new()
        .with_source("CASE.DATA")
        .with_line(3)
        .with_frame("SCHEDULE")
        .with_frame("WELSPECS");
    assert_eq!(context.stack.len(), 2);
    let shown = format!("{context}");
    assert!(shown.contains("CASE.DATA"));
}
