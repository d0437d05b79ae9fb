//! Schedule timeline for deckflow.
//!
//! This crate provides:
//! - [`ScheduleConfig`] - Run level settings and diagnostic policy
//! - [`ScheduleState`] - Registries and report configuration of one report step
//! - [`Schedule`], [`ScheduleBlock`] - The report step timeline
//! - [`handlers`] - Keyword handlers that mutate a step
//! - [`serialize`] - `MessagePack` persistence of [`SimulatorState`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod handlers;
pub mod schedule;
pub mod serialize;
pub mod state;

pub use config::ScheduleConfig;
pub use handlers::HandlerContext;
pub use schedule::{Schedule, ScheduleBlock};
pub use serialize::SimulatorState;
pub use state::ScheduleState;
