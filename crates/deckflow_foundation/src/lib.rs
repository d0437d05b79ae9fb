//! Foundation types for deckflow.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`NamePattern`] - Shell-style well/group/list name patterns
//! - [`DeckKeyword`], [`DeckRecord`], [`DeckItem`] - Structured deck input
//! - [`ParseContext`], [`ErrorGuard`] - Policy for recoverable input problems
//! - [`MapBuilder`] - Deterministic map construction from parallel loops
//! - [`SimTime`] - Simulation time points

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod deck;
pub mod error;
pub mod map_builder;
pub mod pattern;
pub mod time;

pub use context::{Diagnostic, ErrorGuard, InputErrorAction, ParseContext};
pub use deck::{DeckItem, DeckKeyword, DeckRecord, KeywordLocation, unquote};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use map_builder::{InsertionMode, MapBuilder, MergeTarget, partition};
pub use pattern::{NamePattern, has_glob, shmatch};
pub use time::SimTime;
