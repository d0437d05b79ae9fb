//! Integration tests for Layer 1: Registry
//!
//! Tests for well/group ordering, well lists, segment layouts and region
//! statistics.

mod lists;
mod names;
mod regions;
