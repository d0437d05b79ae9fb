//! Segment sets of multi-segment wells.

use deckflow_registry::{NameOrder, WListManager, WellCatalog};
use tracing::trace;

use crate::descriptor::SetDescriptor;
use crate::result::MatchResult;
use crate::space::{EntitySpace, find};
use crate::well::WellMatcher;

/// Resolves `(well pattern, segment number)` requests.
///
/// Only multi-segment wells are eligible owners. Without a segment number
/// each well contributes all its segments in definition order; with one it
/// contributes that segment if defined.
#[derive(Debug, Clone, Copy)]
pub struct SegmentMatcher<'a> {
    wells: &'a WellCatalog,
    names: WellMatcher<'a>,
}

impl<'a> SegmentMatcher<'a> {
    /// Creates a matcher over one schedule step's wells.
    #[must_use]
    pub fn new(order: &'a NameOrder, wells: &'a WellCatalog, wlists: &'a WListManager) -> Self {
        Self {
            wells,
            names: WellMatcher::with_wlists(order, wlists),
        }
    }

    /// Finds the segments addressed by `request`.
    #[must_use]
    pub fn find_segments(&self, request: &SetDescriptor) -> MatchResult<i32> {
        let result = find(self, request);
        trace!(
            wells = result.num_owners(),
            segments = result.len(),
            "segment match"
        );
        result
    }
}

impl EntitySpace for SegmentMatcher<'_> {
    type Query = SetDescriptor;
    type Entity = i32;

    fn candidate_owners(&self, query: &SetDescriptor) -> Vec<String> {
        let wells = match query.owner() {
            Some(pattern) => self.names.wells(pattern),
            None => self.names.all(),
        };
        wells
            .into_iter()
            .filter(|well| self.wells.is_multi_segment(well))
            .collect()
    }

    fn entities(&self, owner: &str, query: &SetDescriptor) -> Vec<i32> {
        let Some(segments) = self.wells.segments(owner) else {
            return Vec::new();
        };
        match query.id() {
            Some(number) if segments.has(number) => vec![number],
            Some(_) => Vec::new(),
            None => segments.numbers().to_vec(),
        }
    }
}
