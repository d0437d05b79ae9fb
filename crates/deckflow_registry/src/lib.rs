//! Entity registries for deckflow.
//!
//! This crate provides:
//! - [`NameOrder`] - Insertion-ordered, duplicate-free name registry
//! - [`GroupOrder`] - Group registry rooted at `FIELD`
//! - [`WellCatalog`], [`Well`], [`WellSegments`] - Well definitions and segment layouts
//! - [`WListManager`] - Named well lists
//! - [`RegionStatistics`] - Per region set maximum region IDs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod group_order;
pub mod name_order;
pub mod regions;
pub mod wells;
pub mod wlist;

pub use group_order::{FIELD, GroupOrder};
pub use name_order::NameOrder;
pub use regions::RegionStatistics;
pub use wells::{Well, WellCatalog, WellSegments};
pub use wlist::{WListManager, WellList};
