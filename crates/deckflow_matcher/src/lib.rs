//! Entity matchers for deckflow.
//!
//! Every matcher expands a partially specified request (owner pattern plus
//! optional ID) against an ordered registry:
//! - [`WellMatcher`] - Well names, glob patterns and `*LIST` patterns
//! - [`SegmentMatcher`] - Segments of multi-segment wells
//! - [`RegionSetMatcher`] - Region IDs within region sets
//! - [`WellListMatcher`] - Member wells of well lists
//!
//! Results are [`MatchResult`]s: owners in registry order, each with its
//! matching entities.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod descriptor;
pub mod region;
pub mod result;
pub mod segment;
pub mod space;
pub mod well;
pub mod wlist;

pub use descriptor::SetDescriptor;
pub use region::RegionSetMatcher;
pub use result::MatchResult;
pub use segment::SegmentMatcher;
pub use space::{EntitySpace, find};
pub use well::WellMatcher;
pub use wlist::{WellListMatcher, WellListQuery};
