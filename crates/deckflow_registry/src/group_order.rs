//! Group registry with the implicit FIELD root.

use deckflow_foundation::{Error, Result};

use crate::name_order::NameOrder;

/// Name of the root group.
pub const FIELD: &str = "FIELD";

/// Ordered group names. `FIELD` is always present and always first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupOrder {
    order: NameOrder,
    max_groups: usize,
}

impl GroupOrder {
    /// Creates a registry holding only `FIELD`.
    ///
    /// `max_groups` is the declared number of non-FIELD groups and only
    /// affects [`restart_groups`](Self::restart_groups).
    #[must_use]
    pub fn new(max_groups: usize) -> Self {
        let mut order = NameOrder::new();
        order.add(FIELD);
        Self { order, max_groups }
    }

    /// Declared group capacity.
    #[must_use]
    pub fn max_groups(&self) -> usize {
        self.max_groups
    }

    /// Appends a group unless already present.
    pub fn add(&mut self, name: impl Into<String>) {
        self.order.add(name);
    }

    /// Removes a group. `FIELD` cannot be removed.
    pub fn erase(&mut self, name: &str) -> bool {
        if name == FIELD {
            return false;
        }
        self.order.erase(name)
    }

    /// True if the group is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.order.has(name)
    }

    /// Number of groups, `FIELD` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false; `FIELD` is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Group names in registry order, `FIELD` first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.order.names()
    }

    /// Group names matching `pattern`, in registry order.
    #[must_use]
    pub fn names_matching(&self, pattern: &str) -> Vec<&str> {
        self.order.names_matching(pattern)
    }

    /// Underlying ordered registry.
    #[must_use]
    pub fn as_name_order(&self) -> &NameOrder {
        &self.order
    }

    /// Group layout for restart output.
    ///
    /// The result has `max_groups + 1` slots: the non-FIELD groups in registry
    /// order, `None` for unused slots, and `FIELD` in the final slot.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when more groups are registered than declared.
    pub fn restart_groups(&self) -> Result<Vec<Option<String>>> {
        let field_index = self.max_groups;
        let mut groups: Vec<Option<String>> = vec![None; field_index + 1];
        for (slot, name) in self.order.iter().filter(|n| *n != FIELD).enumerate() {
            if slot >= field_index {
                return Err(Error::out_of_range(format!(
                    "group {name} exceeds the declared maximum of {} groups",
                    self.max_groups
                )));
            }
            groups[slot] = Some(name.to_string());
        }
        groups[field_index] = Some(FIELD.to_string());
        Ok(groups)
    }
}
