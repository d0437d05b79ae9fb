//! Integration tests for report keyword normalisation

use deckflow_foundation::context::{RPT_MIXED_STYLE, RPT_UNKNOWN_MNEMONIC};
use deckflow_foundation::{DeckKeyword, ErrorGuard, InputErrorAction, KeywordLocation, ParseContext};
use deckflow_report::rptsched::RPTSCHED_INTEGER_CONTROLS;
use deckflow_report::{
    AcceptAll, KeywordShape, MnemonicMap, PositionalTable, RptKeywordNormaliser, ValuePolicy,
    parse_rptrst, rptrst_normaliser, rptsched_normaliser,
};
use proptest::prelude::*;

fn location() -> KeywordLocation {
    KeywordLocation::new("RPTRST", "CASE.DATA", 51)
}

#[test]
fn spaced_equals_is_mixed_style() {
    let normaliser = rptrst_normaliser(false).unwrap();
    let mut guard = ErrorGuard::new();
    let map = normaliser
        .normalise_tokens(
            &["BASIC", "=", "2"],
            &location(),
            &MnemonicMap::new(),
            &ParseContext::new(),
            &mut guard,
        )
        .unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("BASIC"), Some(&2));
    assert_eq!(guard.warnings().len(), 1);
    assert_eq!(guard.warnings()[0].key, RPT_MIXED_STYLE);
}

#[test]
fn mixed_style_can_be_fatal() {
    let normaliser = rptrst_normaliser(false).unwrap();
    let ctx = ParseContext::new().with(RPT_MIXED_STYLE, InputErrorAction::Throw);
    let result = normaliser.normalise_tokens(
        &["BASIC", "=", "2"],
        &location(),
        &MnemonicMap::new(),
        &ctx,
        &mut ErrorGuard::new(),
    );
    assert!(result.is_err());
}

#[test]
fn integer_flags_select_table_positions() {
    let mut tokens = vec!["0"; 79];
    tokens[2] = "1";
    tokens[8] = "3";
    let normaliser = rptsched_normaliser().unwrap();
    let map = normaliser
        .normalise_tokens(
            &tokens,
            &location(),
            &MnemonicMap::new(),
            &ParseContext::new(),
            &mut ErrorGuard::new(),
        )
        .unwrap();

    let entries: Vec<(&str, i32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(entries, vec![("SWAT", 1), ("WELLS", 1)]);
}

#[test]
fn integers_replace_previous_map() {
    let mut previous = MnemonicMap::new();
    previous.insert("FIP".to_string(), 2);
    let normaliser = rptsched_normaliser().unwrap();
    let map = normaliser
        .normalise_tokens(
            &["1"],
            &location(),
            &previous,
            &ParseContext::new(),
            &mut ErrorGuard::new(),
        )
        .unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["PRES"]);
}

#[test]
fn mnemonics_merge_in_place() {
    let mut previous = MnemonicMap::new();
    previous.insert("WELLS".to_string(), 1);
    previous.insert("FIP".to_string(), 1);
    let normaliser = rptsched_normaliser().unwrap();
    let map = normaliser
        .normalise_tokens(
            &["SUMMARY", "FIP=3"],
            &location(),
            &previous,
            &ParseContext::new(),
            &mut ErrorGuard::new(),
        )
        .unwrap();
    let entries: Vec<(&str, i32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(entries, vec![("WELLS", 1), ("FIP", 3), ("SUMMARY", 1)]);
}

#[test]
fn unknown_mnemonics_skipped() {
    let normaliser = rptsched_normaliser().unwrap();
    let mut guard = ErrorGuard::new();
    let map = normaliser
        .normalise_tokens(
            &["WELLS", "MADEUP=2"],
            &location(),
            &MnemonicMap::new(),
            &ParseContext::new(),
            &mut guard,
        )
        .unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(guard.warnings()[0].key, RPT_UNKNOWN_MNEMONIC);
}

#[test]
fn rptrst_integer_controls() {
    let keyword = DeckKeyword::new("RPTRST").with_tokens(["2", "0", "1"]);
    let request = parse_rptrst(&keyword, false, &ParseContext::new(), &mut ErrorGuard::new())
        .unwrap();
    assert_eq!(request.basic, Some(2));
    assert!(!request.mnemonics.is_empty());
}

#[test]
fn shapes() {
    assert_eq!(KeywordShape::classify::<&str>(&[]), KeywordShape::Empty);
    assert!(matches!(
        KeywordShape::classify(&["1", "0"]),
        KeywordShape::IntegerOnly(tokens) if tokens == ["1", "0"]
    ));
    assert!(matches!(
        KeywordShape::classify(&["FIP", "2"]),
        KeywordShape::MixedStyle(_)
    ));
}

fn table_positions() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), RPTSCHED_INTEGER_CONTROLS.len())
}

proptest! {
    #[test]
    fn flags_round_trip_through_table(flags in table_positions()) {
        let tokens: Vec<&str> = flags.iter().map(|f| if *f { "1" } else { "0" }).collect();
        let table = PositionalTable::new(&RPTSCHED_INTEGER_CONTROLS, ValuePolicy::Flag);
        let normaliser = RptKeywordNormaliser::new(table, AcceptAll).unwrap();
        let map = normaliser
            .normalise_tokens(
                &tokens,
                &location(),
                &MnemonicMap::new(),
                &ParseContext::new(),
                &mut ErrorGuard::new(),
            )
            .unwrap();

        let expected: Vec<&str> = flags
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .filter_map(|(i, _)| table.name(i))
            .collect();
        prop_assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), expected);
        prop_assert!(map.values().all(|v| *v == 1));
    }

    #[test]
    fn mnemonic_normalisation_is_idempotent(
        picks in prop::collection::vec((0_usize..40, 0_i32..5), 1..10)
    ) {
        let tokens: Vec<String> = picks
            .iter()
            .filter_map(|(i, v)| {
                let name = RPTSCHED_INTEGER_CONTROLS[*i];
                (!name.is_empty()).then(|| format!("{name}={v}"))
            })
            .collect();
        prop_assume!(!tokens.is_empty());
        let normaliser = rptsched_normaliser().unwrap();
        let ctx = ParseContext::new();
        let mut guard = ErrorGuard::new();
        let previous = MnemonicMap::new();
        let once = normaliser
            .normalise_tokens(&tokens, &location(), &previous, &ctx, &mut guard)
            .unwrap();
        let twice = normaliser
            .normalise_tokens(&tokens, &location(), &previous, &ctx, &mut guard)
            .unwrap();
        prop_assert_eq!(once, twice);
    }
}
