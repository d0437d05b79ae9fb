//! The shared two-level matching protocol.

use crate::result::MatchResult;

/// An ordered collection of owners, each holding ordered sub-entities.
///
/// Matching first picks candidate owners, then resolves each owner's
/// entities; owners that contribute nothing are skipped. Matching never
/// fails: unknown owners and out of range IDs simply contribute nothing.
pub trait EntitySpace {
    /// Request type.
    type Query;
    /// Sub-entity type.
    type Entity;

    /// Candidate owners for `query`, in registry order.
    fn candidate_owners(&self, query: &Self::Query) -> Vec<String>;

    /// Entities of `owner` selected by `query`, in definition order.
    fn entities(&self, owner: &str, query: &Self::Query) -> Vec<Self::Entity>;
}

/// Runs the protocol for `query` against `space`.
pub fn find<S: EntitySpace>(space: &S, query: &S::Query) -> MatchResult<S::Entity> {
    let mut result = MatchResult::default();
    for owner in space.candidate_owners(query) {
        let entities = space.entities(&owner, query);
        result.push(owner, entities);
    }
    result.finish()
}
