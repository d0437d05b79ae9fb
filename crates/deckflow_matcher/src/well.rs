//! Well name resolution.

use deckflow_foundation::has_glob;
use deckflow_registry::{NameOrder, WListManager};

/// Resolves well names, well name patterns and well list patterns against
/// the well order of one schedule step.
#[derive(Debug, Clone, Copy)]
pub struct WellMatcher<'a> {
    order: &'a NameOrder,
    wlists: Option<&'a WListManager>,
}

impl<'a> WellMatcher<'a> {
    /// Matcher without well list support.
    #[must_use]
    pub fn new(order: &'a NameOrder) -> Self {
        Self {
            order,
            wlists: None,
        }
    }

    /// Matcher that also expands `*LIST` patterns.
    #[must_use]
    pub fn with_wlists(order: &'a NameOrder, wlists: &'a WListManager) -> Self {
        Self {
            order,
            wlists: Some(wlists),
        }
    }

    /// True if `pattern` addresses well lists rather than wells.
    #[must_use]
    pub fn is_wlist_pattern(pattern: &str) -> bool {
        pattern.len() > 1 && pattern.starts_with('*')
    }

    /// Wells addressed by `pattern`, in well order.
    ///
    /// * `*LIST` patterns expand through the well lists; list members that are
    ///   not registered wells are dropped.
    /// * Glob patterns select matching registered wells.
    /// * A plain name selects itself if registered.
    #[must_use]
    pub fn wells(&self, pattern: &str) -> Vec<String> {
        if pattern.is_empty() {
            return Vec::new();
        }
        if Self::is_wlist_pattern(pattern) {
            if let Some(wlists) = self.wlists {
                return self.order.sort_by_order(&wlists.wells(pattern));
            }
        }
        if has_glob(pattern) {
            return self
                .order
                .names_matching(pattern)
                .into_iter()
                .map(str::to_string)
                .collect();
        }
        if self.order.has(pattern) {
            return vec![pattern.to_string()];
        }
        Vec::new()
    }

    /// All registered wells.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.order.iter().map(str::to_string).collect()
    }
}
