//! Runtime state for deckflow actions and user defined quantities.
//!
//! This crate provides:
//! - [`ActionX`], [`ActionResult`], [`ActionState`] - Action definitions and run bookkeeping
//! - [`UdaValue`] - Numeric or UDQ-valued keyword arguments
//! - [`UdqSet`], [`UdqState`], [`UdqUpdate`], [`UdqVarType`] - UDQ values and update policy
//! - [`RstState`] - Restart data used to warm-start both

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod restart;
pub mod uda;
pub mod udq;

pub use action::{ActionResult, ActionState, ActionX, RunState};
pub use restart::{RstAction, RstState, RstUdq};
pub use uda::UdaValue;
pub use udq::{UdqScalar, UdqSet, UdqState, UdqUpdate, UdqVarType, is_udq};
