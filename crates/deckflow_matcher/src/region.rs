//! Region IDs within region sets.

use deckflow_registry::RegionStatistics;
use tracing::trace;

use crate::descriptor::SetDescriptor;
use crate::result::MatchResult;
use crate::space::{EntitySpace, find};

/// Resolves `(region set, region ID)` requests.
///
/// A set is eligible only if its observed maximum ID is positive. An ID is
/// in range if it does not exceed either the observed or the declared
/// maximum, and a set's full range is `1..=max(observed, declared)`.
#[derive(Debug, Clone, Copy)]
pub struct RegionSetMatcher<'a> {
    stats: &'a RegionStatistics,
}

impl<'a> RegionSetMatcher<'a> {
    /// Creates a matcher over `stats`.
    #[must_use]
    pub fn new(stats: &'a RegionStatistics) -> Self {
        Self { stats }
    }

    /// Finds the regions addressed by `request`.
    #[must_use]
    pub fn find_regions(&self, request: &SetDescriptor) -> MatchResult<i32> {
        let result = find(self, request);
        trace!(sets = result.num_owners(), regions = result.len(), "region match");
        result
    }
}

impl EntitySpace for RegionSetMatcher<'_> {
    type Query = SetDescriptor;
    type Entity = i32;

    fn candidate_owners(&self, query: &SetDescriptor) -> Vec<String> {
        match query.owner() {
            Some(set) => vec![set.to_string()],
            None => self.stats.region_sets().map(str::to_string).collect(),
        }
    }

    fn entities(&self, owner: &str, query: &SetDescriptor) -> Vec<i32> {
        let observed = self.stats.max_region_id(owner);
        if observed <= 0 {
            return Vec::new();
        }
        let declared = self.stats.declared_max();
        match query.id() {
            Some(id) if id <= observed || id <= declared => vec![id],
            Some(_) => Vec::new(),
            None => (1..=observed.max(declared)).collect(),
        }
    }
}
