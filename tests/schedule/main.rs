//! Integration tests for Layer 4: Schedule
//!
//! End-to-end runs of keyword blocks through the report step timeline.

mod persistence;
mod timeline;
