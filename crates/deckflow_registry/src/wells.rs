//! Well definitions and multi-segment layouts.

use deckflow_foundation::{Error, Result};

/// Segment numbers of a multi-segment well, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WellSegments {
    numbers: Vec<i32>,
}

impl WellSegments {
    /// Creates a layout from segment numbers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a non-positive or repeated segment number.
    pub fn new(numbers: impl IntoIterator<Item = i32>) -> Result<Self> {
        let mut segments = Self::default();
        for number in numbers {
            segments.push(number)?;
        }
        Ok(segments)
    }

    /// Appends one segment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a non-positive or repeated segment number.
    pub fn push(&mut self, number: i32) -> Result<()> {
        if number <= 0 {
            return Err(Error::invalid_argument(format!(
                "segment number {number} must be positive"
            )));
        }
        if self.numbers.contains(&number) {
            return Err(Error::invalid_argument(format!(
                "segment {number} defined twice"
            )));
        }
        self.numbers.push(number);
        Ok(())
    }

    /// Segment numbers in definition order.
    #[must_use]
    pub fn numbers(&self) -> &[i32] {
        &self.numbers
    }

    /// True if segment `number` exists.
    #[must_use]
    pub fn has(&self, number: i32) -> bool {
        self.numbers.contains(&number)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// True if no segment is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// A well as introduced by WELSPECS.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Well {
    /// Well name.
    pub name: String,
    /// Owning group.
    pub group: String,
    /// Segment layout, present for multi-segment wells.
    pub segments: Option<WellSegments>,
}

impl Well {
    /// Creates a standard (single segment) well.
    #[must_use]
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            segments: None,
        }
    }

    /// Attaches a segment layout.
    #[must_use]
    pub fn with_segments(mut self, segments: WellSegments) -> Self {
        self.segments = Some(segments);
        self
    }

    /// True if the well has a segment layout.
    #[must_use]
    pub fn is_multi_segment(&self) -> bool {
        self.segments.is_some()
    }
}

/// All wells known at one schedule step, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WellCatalog {
    wells: im::OrdMap<String, Well>,
}

impl WellCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a well.
    pub fn insert(&mut self, well: Well) {
        self.wells.insert(well.name.clone(), well);
    }

    /// Defines `name` in `group`, keeping an existing segment layout.
    pub fn define(&mut self, name: &str, group: &str) {
        match self.wells.get_mut(name) {
            Some(well) => group.clone_into(&mut well.group),
            None => self.insert(Well::new(name, group)),
        }
    }

    /// Replaces the segment layout of a known well.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the well is not defined.
    pub fn set_segments(&mut self, name: &str, segments: WellSegments) -> Result<()> {
        let well = self.wells.get_mut(name).ok_or_else(|| {
            Error::invalid_argument(format!("segments given for undefined well {name}"))
        })?;
        well.segments = Some(segments);
        Ok(())
    }

    /// Removes a well.
    pub fn remove(&mut self, name: &str) -> Option<Well> {
        self.wells.remove(name)
    }

    /// Looks up a well.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Well> {
        self.wells.get(name)
    }

    /// Segment layout of `name`, if it is a multi-segment well.
    #[must_use]
    pub fn segments(&self, name: &str) -> Option<&WellSegments> {
        self.get(name).and_then(|well| well.segments.as_ref())
    }

    /// True if `name` is defined and multi-segment.
    #[must_use]
    pub fn is_multi_segment(&self, name: &str) -> bool {
        self.get(name).is_some_and(Well::is_multi_segment)
    }

    /// Number of wells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// True if no well is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}
