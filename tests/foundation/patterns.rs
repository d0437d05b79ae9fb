//! Integration tests for name patterns

use deckflow_foundation::{NamePattern, has_glob, shmatch};

#[test]
fn plain_names_match_exactly() {
    let pattern = NamePattern::new("PROD1");
    assert!(!pattern.is_glob());
    assert!(pattern.is_match("PROD1"));
    assert!(!pattern.is_match("PROD10"));
}

#[test]
fn star_and_question_mark() {
    assert!(shmatch("PROD*", "PROD12"));
    assert!(shmatch("PROD*", "PROD"));
    assert!(shmatch("W?", "W1"));
    assert!(!shmatch("W?", "W10"));
}

#[test]
fn character_classes() {
    assert!(shmatch("OP_[12]", "OP_1"));
    assert!(!shmatch("OP_[12]", "OP_3"));
}

#[test]
fn unclosed_class_compares_literally() {
    let pattern = NamePattern::new("W[1");
    assert!(!pattern.is_glob());
    assert!(pattern.is_match("W[1"));
}

#[test]
fn filter_keeps_order() {
    let names = ["INJ1", "PROD2", "PROD1", "INJ2"];
    assert_eq!(NamePattern::new("PROD*").filter(names), vec!["PROD2", "PROD1"]);
    assert_eq!(NamePattern::new("*2").filter(names), vec!["PROD2", "INJ2"]);
}

#[test]
fn glob_detection() {
    assert!(has_glob("*LIST"));
    assert!(has_glob("W[0-9]"));
    assert!(!has_glob("FIELD"));
}
