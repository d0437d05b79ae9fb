//! Named well lists (WLIST).
//!
//! List names start with `*`. A well may belong to several lists, and the
//! manager keeps the reverse mapping current on every edit.

use deckflow_foundation::{Error, NamePattern, Result};

/// One well list; wells in insertion order, no repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WellList {
    name: String,
    wells: Vec<String>,
}

impl WellList {
    /// Creates an empty list.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wells: Vec::new(),
        }
    }

    /// List name, including the leading `*`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member wells in list order.
    #[must_use]
    pub fn wells(&self) -> &[String] {
        &self.wells
    }

    /// True if `well` is a member.
    #[must_use]
    pub fn has(&self, well: &str) -> bool {
        self.wells.iter().any(|w| w == well)
    }

    /// Number of member wells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// True if the list has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    fn add(&mut self, well: &str) -> bool {
        if self.has(well) {
            return false;
        }
        self.wells.push(well.to_string());
        true
    }

    fn del(&mut self, well: &str) -> bool {
        let before = self.wells.len();
        self.wells.retain(|w| w != well);
        self.wells.len() != before
    }
}

/// All well lists of one schedule step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WListManager {
    lists: im::OrdMap<String, WellList>,
    well_lists: im::HashMap<String, Vec<String>>,
}

fn check_list_name(name: &str) -> Result<()> {
    if name.len() < 2 || !name.starts_with('*') {
        return Err(Error::invalid_argument(format!(
            "well list name '{name}' must start with '*'"
        )));
    }
    Ok(())
}

impl WListManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores lists from restart data: `(list name, wells)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed list name.
    pub fn from_restart<'a, I>(lists: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut manager = Self::new();
        for (name, wells) in lists {
            manager.new_list(name, wells)?;
        }
        Ok(manager)
    }

    /// Number of lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// True if no list exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// True if a list of exactly this name exists.
    #[must_use]
    pub fn has_list(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    /// Looks up a list by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WellList> {
        self.lists.get(name)
    }

    /// Lists in name order.
    pub fn lists(&self) -> impl Iterator<Item = &WellList> {
        self.lists.values()
    }

    /// True if some non-empty list matches `pattern`.
    ///
    /// The leading `*` of both pattern and list name is ignored when matching.
    #[must_use]
    pub fn has_well(&self, pattern: &str) -> bool {
        let pattern = NamePattern::new(strip_marker(pattern));
        self.lists
            .iter()
            .any(|(name, list)| !list.is_empty() && pattern.is_match(strip_marker(name)))
    }

    /// Lists `well` belongs to, in the order it joined them.
    #[must_use]
    pub fn lists_of_well(&self, well: &str) -> &[String] {
        self.well_lists
            .get(well)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Creates list `name` holding `wells`, or resets an existing list to
    /// exactly `wells`. An empty `wells` clears the list but keeps it defined.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed list name.
    pub fn new_list<S: AsRef<str>>(&mut self, name: &str, wells: &[S]) -> Result<&WellList> {
        check_list_name(name)?;
        if let Some(existing) = self.lists.get(name) {
            let stale: Vec<String> = existing.wells().to_vec();
            for well in &stale {
                self.del_list_well(well, name);
            }
        } else {
            self.lists.insert(name.to_string(), WellList::new(name));
        }
        for well in wells {
            self.add_list_well(well.as_ref(), name)?;
        }
        self.lists
            .get(name)
            .ok_or_else(|| Error::internal(format!("well list {name} vanished")))
    }

    /// Adds `well` to an existing list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the list does not exist.
    pub fn add_list_well(&mut self, well: &str, list: &str) -> Result<()> {
        let target = self
            .lists
            .get_mut(list)
            .ok_or_else(|| Error::invalid_argument(format!("no such well list {list}")))?;
        if target.add(well) {
            self.well_lists
                .entry(well.to_string())
                .or_insert_with(Vec::new)
                .push(list.to_string());
        }
        Ok(())
    }

    /// Appends `wells` to `list`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed list name.
    pub fn add_or_create<S: AsRef<str>>(&mut self, list: &str, wells: &[S]) -> Result<()> {
        if !self.has_list(list) {
            self.new_list(list, wells)?;
            return Ok(());
        }
        for well in wells {
            self.add_list_well(well.as_ref(), list)?;
        }
        Ok(())
    }

    /// Removes `well` from `list`. Returns true if it was a member.
    pub fn del_list_well(&mut self, well: &str, list: &str) -> bool {
        let removed = self.lists.get_mut(list).is_some_and(|l| l.del(well));
        if removed {
            if let Some(names) = self.well_lists.get_mut(well) {
                names.retain(|n| n != list);
                if names.is_empty() {
                    self.well_lists.remove(well);
                }
            }
        }
        removed
    }

    /// Removes `well` from every list. Returns true if any list changed.
    pub fn del_well(&mut self, well: &str) -> bool {
        let member_of = self.lists_of_well(well).to_vec();
        let mut changed = false;
        for list in member_of {
            changed |= self.del_list_well(well, &list);
        }
        changed
    }

    /// Wells addressed by `pattern`.
    ///
    /// An exact list name yields that list. Otherwise every list whose name
    /// matches (ignoring the leading `*`) contributes its wells, lists in name
    /// order, and repeats keep only their first appearance.
    #[must_use]
    pub fn wells(&self, pattern: &str) -> Vec<String> {
        if let Some(list) = self.lists.get(pattern) {
            return list.wells().to_vec();
        }
        let matcher = NamePattern::new(strip_marker(pattern));
        let mut wells: Vec<String> = Vec::new();
        for (name, list) in &self.lists {
            if !matcher.is_match(strip_marker(name)) {
                continue;
            }
            for well in list.wells() {
                if !wells.contains(well) {
                    wells.push(well.clone());
                }
            }
        }
        wells
    }
}

fn strip_marker(name: &str) -> &str {
    name.strip_prefix('*').unwrap_or(name)
}
