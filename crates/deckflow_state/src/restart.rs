//! Restart data consumed when a run is continued from a restart file.

use deckflow_foundation::SimTime;

use crate::udq::UdqVarType;

/// Run history of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RstAction {
    /// Action name.
    pub name: String,
    /// Definition ID of the action.
    pub id: usize,
    /// Number of completed runs.
    pub run_count: usize,
    /// Time of the latest run.
    pub last_run: Option<SimTime>,
}

impl RstAction {
    /// Creates a record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        id: usize,
        run_count: usize,
        last_run: Option<SimTime>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            run_count,
            last_run,
        }
    }
}

/// Values of one UDQ at the restart time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RstUdq {
    /// UDQ name.
    pub name: String,
    /// Level the UDQ is defined at.
    pub category: UdqVarType,
    /// Value of a scalar or field UDQ, if defined.
    pub scalar: Option<f64>,
    /// Per well or per group values.
    pub entities: Vec<(String, f64)>,
    /// Per segment values as `(well, zero-based segment index, value)`.
    pub segments: Vec<(String, usize, f64)>,
}

impl RstUdq {
    /// A scalar or field level UDQ.
    #[must_use]
    pub fn scalar(name: impl Into<String>, category: UdqVarType, value: f64) -> Self {
        Self {
            name: name.into(),
            category,
            scalar: Some(value),
            entities: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// A UDQ with one value per well or group.
    pub fn entities<'a>(
        name: impl Into<String>,
        category: UdqVarType,
        values: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            scalar: None,
            entities: values.into_iter().map(|(n, v)| (n.to_string(), v)).collect(),
            segments: Vec::new(),
        }
    }

    /// A segment level UDQ.
    pub fn segments<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (&'a str, usize, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            category: UdqVarType::Segment,
            scalar: None,
            entities: Vec::new(),
            segments: values
                .into_iter()
                .map(|(w, i, v)| (w.to_string(), i, v))
                .collect(),
        }
    }
}

/// Everything read back from a restart file that the run state needs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RstState {
    /// Action run histories.
    pub actions: Vec<RstAction>,
    /// UDQ values.
    pub udqs: Vec<RstUdq>,
}
