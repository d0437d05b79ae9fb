//! Insertion-ordered, duplicate-free name registry.
//!
//! Wells are reported in the order they were first introduced, so the
//! registry keeps both the ordered sequence and a name to position index.
//! Both live in `im` collections so that a schedule step can be cloned in
//! O(1) and modified without disturbing the previous step.

use deckflow_foundation::{Error, NamePattern, Result};

/// Ordered set of unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameOrder {
    names: im::Vector<String>,
    index: im::HashMap<String, usize>,
}

impl NameOrder {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from an explicit list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a name appears twice.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Self::new();
        for name in names {
            let name = name.into();
            if order.has(&name) {
                return Err(Error::invalid_argument(format!(
                    "duplicate name {name} in ordered name list"
                )));
            }
            order.add(name);
        }
        Ok(order)
    }

    /// Appends `name` unless it is already present.
    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.index.contains_key(&name) {
            return;
        }
        self.index.insert(name.clone(), self.names.len());
        self.names.push_back(name);
    }

    /// Removes `name`, closing the gap. Returns false if it was not present.
    pub fn erase(&mut self, name: &str) -> bool {
        let Some(pos) = self.index.remove(name) else {
            return false;
        };
        self.names.remove(pos);
        for (offset, later) in self.names.iter().enumerate().skip(pos) {
            self.index.insert(later.clone(), offset);
        }
        true
    }

    /// True if `name` is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// All names in registry order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// Names matching `pattern`, in registry order.
    #[must_use]
    pub fn names_matching(&self, pattern: &str) -> Vec<&str> {
        let pattern = NamePattern::new(pattern);
        if !pattern.is_glob() {
            return self
                .index_of(pattern.as_str())
                .and_then(|pos| self.get(pos))
                .into_iter()
                .collect();
        }
        pattern.filter(self.iter())
    }

    /// Reorders `names` into registry order.
    ///
    /// Unregistered names are dropped and repeats collapse to one entry.
    #[must_use]
    pub fn sort_by_order<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut positions: Vec<usize> = names
            .iter()
            .filter_map(|name| self.index_of(name.as_ref()))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
            .into_iter()
            .filter_map(|pos| self.get(pos).map(str::to_string))
            .collect()
    }
}

impl<S: Into<String>> Extend<S> for NameOrder {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for name in iter {
            self.add(name);
        }
    }
}
