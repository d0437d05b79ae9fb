//! Deckflow - Dynamic schedule configuration engine
//!
//! This crate re-exports all layers of the deckflow system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: deckflow_schedule   - Report step timeline, keyword handlers, persistence
//! Layer 3: deckflow_state      - Action run history, UDA values, UDQ state
//! Layer 2: deckflow_matcher    - Well, segment, region set and well list matchers
//!          deckflow_report     - RPTSCHED / RPTRST normalisation and report state
//! Layer 1: deckflow_registry   - Well/group order, well lists, segments, regions
//! Layer 0: deckflow_foundation - Errors, patterns, deck input, parse context
//! ```

pub use deckflow_foundation as foundation;
pub use deckflow_matcher as matcher;
pub use deckflow_registry as registry;
pub use deckflow_report as report;
pub use deckflow_schedule as schedule;
pub use deckflow_state as state;
