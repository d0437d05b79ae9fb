//! Fluid-in-place region statistics.
//!
//! Each `FIPxxx` array assigns a region ID to every active cell; the set is
//! known by its suffix (`FIPNUM` is set `NUM`). Only each set's maximum ID
//! matters to region matching, together with the declared maximum from the
//! run's dimensions.

use std::collections::BTreeMap;

use deckflow_foundation::{Error, Result};

/// Prefix shared by all region set arrays.
pub const FIP_PREFIX: &str = "FIP";

/// Maximum region ID per region set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionStatistics {
    declared_max: i32,
    max_ids: BTreeMap<String, i32>,
}

impl RegionStatistics {
    /// Creates statistics from known per-set maxima.
    #[must_use]
    pub fn from_maxima<I, S>(declared_max: i32, maxima: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            declared_max,
            max_ids: maxima
                .into_iter()
                .map(|(set, max)| (set.into(), max))
                .collect(),
        }
    }

    /// Computes statistics from per-cell region arrays keyed by keyword name.
    ///
    /// `reduce` sees the per-set maxima in set-name order and may combine them
    /// with other partitions of the grid before they are stored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a keyword that is not a `FIP` array.
    pub fn from_region_arrays<'a, I, F>(declared_max: i32, arrays: I, reduce: F) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [i32])>,
        F: FnOnce(&mut [i32]),
    {
        let mut max_ids = BTreeMap::new();
        for (keyword, cells) in arrays {
            let set = keyword
                .strip_prefix(FIP_PREFIX)
                .filter(|suffix| !suffix.is_empty())
                .ok_or_else(|| {
                    Error::invalid_argument(format!("{keyword} is not a FIP region array"))
                })?;
            let max = cells.iter().copied().max().unwrap_or(0);
            max_ids.insert(set.to_string(), max);
        }

        let mut maxima: Vec<i32> = max_ids.values().copied().collect();
        reduce(&mut maxima);
        for (slot, max) in max_ids.values_mut().zip(maxima) {
            *slot = max;
        }

        Ok(Self {
            declared_max,
            max_ids,
        })
    }

    /// Declared maximum region ID.
    #[must_use]
    pub fn declared_max(&self) -> i32 {
        self.declared_max
    }

    /// Region set names, sorted.
    pub fn region_sets(&self) -> impl Iterator<Item = &str> {
        self.max_ids.keys().map(String::as_str)
    }

    /// Observed maximum region ID of `set`; zero for an unknown set.
    #[must_use]
    pub fn max_region_id(&self, set: &str) -> i32 {
        self.max_ids.get(set).copied().unwrap_or(0)
    }

    /// True if `set` has at least one region.
    #[must_use]
    pub fn has_set(&self, set: &str) -> bool {
        self.max_region_id(set) > 0
    }
}
