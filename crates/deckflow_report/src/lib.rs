//! Report keyword handling for deckflow.
//!
//! This crate provides:
//! - [`RptKeywordNormaliser`] - Integer or mnemonic report keywords to one mnemonic map
//! - [`KeywordShape`] - Input style classification
//! - [`PositionalTable`], [`RptRstIntegerControls`] - Integer control handlers
//! - [`AllowList`], [`AcceptAll`] - Mnemonic validation
//! - [`RptConfig`] - `RPTSCHED` requests per report step
//! - [`RstConfig`] - Restart output configuration per report step

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod normalise;
pub mod rptrst;
pub mod rptsched;

pub use config::{RptConfig, RstConfig};
pub use normalise::{
    AcceptAll, AllowList, IntegerHandler, KeywordShape, MnemonicFilter, MnemonicMap,
    PositionalTable, RptKeywordNormaliser, ValuePolicy, is_integer_token,
};
pub use rptrst::{
    RptRstIntegerControls, RptRstNormaliser, RptRstRequest, parse_rptrst, rptrst_normaliser,
};
pub use rptsched::{
    RptSchedNormaliser, normalise_after_nothing, normalise_rptsched, rptsched_normaliser,
};
