//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, name patterns, parse context policy, and the map builder.

mod context;
mod errors;
mod map_builder;
mod patterns;
