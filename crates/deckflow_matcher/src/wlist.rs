//! Wells within well lists.

use deckflow_foundation::NamePattern;
use deckflow_registry::WListManager;

use crate::result::MatchResult;
use crate::space::{EntitySpace, find};

/// A well list request: optional list pattern, optional well pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WellListQuery {
    list: Option<String>,
    well: Option<String>,
}

impl WellListQuery {
    /// Matches every well of every list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to lists matching `pattern` (leading `*` optional).
    #[must_use]
    pub fn with_list(mut self, pattern: &str) -> Self {
        self.list = (!pattern.is_empty()).then(|| pattern.to_string());
        self
    }

    /// Restricts to member wells matching `pattern`.
    #[must_use]
    pub fn with_well(mut self, pattern: &str) -> Self {
        self.well = (!pattern.is_empty()).then(|| pattern.to_string());
        self
    }
}

/// Resolves well list requests; owners are lists, entities member wells.
#[derive(Debug, Clone, Copy)]
pub struct WellListMatcher<'a> {
    wlists: &'a WListManager,
}

impl<'a> WellListMatcher<'a> {
    /// Creates a matcher over `wlists`.
    #[must_use]
    pub fn new(wlists: &'a WListManager) -> Self {
        Self { wlists }
    }

    /// Finds the list members addressed by `query`.
    #[must_use]
    pub fn find_wells(&self, query: &WellListQuery) -> MatchResult<String> {
        find(self, query)
    }
}

fn strip_marker(name: &str) -> &str {
    name.strip_prefix('*').unwrap_or(name)
}

impl EntitySpace for WellListMatcher<'_> {
    type Query = WellListQuery;
    type Entity = String;

    fn candidate_owners(&self, query: &WellListQuery) -> Vec<String> {
        let pattern = query
            .list
            .as_deref()
            .map(|p| NamePattern::new(strip_marker(p)));
        self.wlists
            .lists()
            .filter(|list| {
                pattern
                    .as_ref()
                    .is_none_or(|p| p.is_match(strip_marker(list.name())))
            })
            .map(|list| list.name().to_string())
            .collect()
    }

    fn entities(&self, owner: &str, query: &WellListQuery) -> Vec<String> {
        let Some(list) = self.wlists.get(owner) else {
            return Vec::new();
        };
        let pattern = query.well.as_deref().map(NamePattern::new);
        list.wells()
            .iter()
            .filter(|well| pattern.as_ref().is_none_or(|p| p.is_match(well)))
            .cloned()
            .collect()
    }
}
