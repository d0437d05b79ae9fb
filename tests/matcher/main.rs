//! Integration tests for Layer 2: Matchers
//!
//! Tests for segment, region set, well and well list resolution.

mod segments;
mod wells;
