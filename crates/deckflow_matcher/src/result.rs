//! Match results.

/// Owners with their matching entities, in owner order.
///
/// Stored compressed: one flat entity vector plus per-owner start offsets.
/// Owners without entities are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<T> {
    owners: Vec<String>,
    starts: Vec<usize>,
    entities: Vec<T>,
    by_name: Vec<usize>,
}

impl<T> Default for MatchResult<T> {
    fn default() -> Self {
        Self {
            owners: Vec::new(),
            starts: vec![0],
            entities: Vec::new(),
            by_name: Vec::new(),
        }
    }
}

impl<T> MatchResult<T> {
    pub(crate) fn push(&mut self, owner: String, entities: Vec<T>) {
        if entities.is_empty() {
            return;
        }
        self.owners.push(owner);
        self.entities.extend(entities);
        self.starts.push(self.entities.len());
    }

    pub(crate) fn finish(mut self) -> Self {
        let mut by_name: Vec<usize> = (0..self.owners.len()).collect();
        by_name.sort_by(|&a, &b| self.owners[a].cmp(&self.owners[b]));
        self.by_name = by_name;
        self
    }

    /// True if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True if exactly one entity matched overall.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.entities.len() == 1
    }

    /// Number of owners with at least one match.
    #[must_use]
    pub fn num_owners(&self) -> usize {
        self.owners.len()
    }

    /// Total number of matched entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Matching owners, in owner order.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(String::as_str)
    }

    /// Entities of the `index`th owner.
    #[must_use]
    pub fn entities_at(&self, index: usize) -> &[T] {
        match (self.starts.get(index), self.starts.get(index + 1)) {
            (Some(&begin), Some(&end)) => &self.entities[begin..end],
            _ => &[],
        }
    }

    /// Entities of `owner`; empty if it did not match.
    #[must_use]
    pub fn entities(&self, owner: &str) -> &[T] {
        match self
            .by_name
            .binary_search_by(|&i| self.owners[i].as_str().cmp(owner))
        {
            Ok(pos) => self.entities_at(self.by_name[pos]),
            Err(_) => &[],
        }
    }

    /// `(owner, entities)` groups in owner order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.owners
            .iter()
            .enumerate()
            .map(|(i, owner)| (owner.as_str(), self.entities_at(i)))
    }
}
