//! User defined quantity values and update policy.
//!
//! UDQ keys name their level in the first letter (`FU…` field, `WU…` well,
//! `GU…` group, `SU…` segment and so on) and always carry `U` second. Values
//! are stored per level; a key that was never assigned reads the configured
//! undefined value rather than zero.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use deckflow_foundation::{Error, Result};
use tracing::debug;

use crate::restart::RstState;

/// Default value reported for undefined quantities.
pub const DEFAULT_UNDEFINED_VALUE: f64 = -1.0e20;

/// True if `key` is shaped like a UDQ name.
#[must_use]
pub fn is_udq(key: &str) -> bool {
    key.len() >= 2 && key.as_bytes()[1] == b'U'
}

/// The level a UDQ is defined at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UdqVarType {
    /// Not tied to an entity (`AU…` and plain scalars).
    Scalar,
    /// Per connection.
    Connection,
    /// Field level.
    Field,
    /// Per region.
    Region,
    /// Per segment.
    Segment,
    /// Per aquifer.
    Aquifer,
    /// Per block.
    Block,
    /// Per well.
    Well,
    /// Per group.
    Group,
}

impl UdqVarType {
    /// Classifies a UDQ key by its first letter.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not shaped like a UDQ name or its level
    /// letter is unknown.
    pub fn from_name(key: &str) -> Result<Self> {
        if !is_udq(key) {
            return Err(Error::not_udq(key));
        }
        match key.as_bytes()[0] {
            b'A' => Ok(Self::Scalar),
            b'B' => Ok(Self::Block),
            b'C' => Ok(Self::Connection),
            b'F' => Ok(Self::Field),
            b'G' => Ok(Self::Group),
            b'R' => Ok(Self::Region),
            b'S' => Ok(Self::Segment),
            b'W' => Ok(Self::Well),
            _ => Err(Error::not_udq(key)),
        }
    }

    /// True if values are a single number rather than per entity.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar | Self::Field)
    }
}

/// When a UDQ definition is re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UdqUpdate {
    /// Never.
    Off,
    /// Every time step.
    #[default]
    On,
    /// Once, at the next opportunity.
    Next,
}

impl UdqUpdate {
    /// Maps a restart integer code.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for codes other than 0, 1 or 2.
    pub fn from_int(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            2 => Ok(Self::Next),
            other => Err(Error::invalid_argument(format!(
                "invalid UDQ update code {other}"
            ))),
        }
    }

    /// Parses `ON`, `OFF` or `NEXT`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for any other text.
    pub fn parse(text: &str) -> Result<Self> {
        text.parse()
    }
}

impl FromStr for UdqUpdate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            "NEXT" => Ok(Self::Next),
            other => Err(Error::invalid_argument(format!(
                "invalid UDQ update '{other}'"
            ))),
        }
    }
}

impl fmt::Display for UdqUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "OFF",
            Self::On => "ON",
            Self::Next => "NEXT",
        })
    }
}

/// One evaluated UDQ value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UdqScalar {
    /// Well or group name; empty for scalars.
    pub wgname: String,
    /// Segment number for segment quantities.
    pub number: Option<usize>,
    /// The value, `None` if undefined.
    pub value: Option<f64>,
}

/// The result of evaluating one UDQ over its entities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UdqSet {
    name: String,
    var_type: UdqVarType,
    values: Vec<UdqScalar>,
}

impl UdqSet {
    /// A field level or scalar result.
    #[must_use]
    pub fn scalar(name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            var_type: UdqVarType::Field,
            values: vec![UdqScalar {
                wgname: String::new(),
                number: None,
                value,
            }],
        }
    }

    /// A per well result.
    pub fn wells<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    ) -> Self {
        Self::entities(name, UdqVarType::Well, values)
    }

    /// A per group result.
    pub fn groups<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    ) -> Self {
        Self::entities(name, UdqVarType::Group, values)
    }

    /// A per segment result; segment numbers are one-based.
    pub fn segments<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (&'a str, usize, Option<f64>)>,
    ) -> Self {
        Self {
            name: name.into(),
            var_type: UdqVarType::Segment,
            values: values
                .into_iter()
                .map(|(well, number, value)| UdqScalar {
                    wgname: well.to_string(),
                    number: Some(number),
                    value,
                })
                .collect(),
        }
    }

    fn entities<'a>(
        name: impl Into<String>,
        var_type: UdqVarType,
        values: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    ) -> Self {
        Self {
            name: name.into(),
            var_type,
            values: values
                .into_iter()
                .map(|(wgname, value)| UdqScalar {
                    wgname: wgname.to_string(),
                    number: None,
                    value,
                })
                .collect(),
        }
    }

    /// UDQ name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level of the values.
    #[must_use]
    pub fn var_type(&self) -> UdqVarType {
        self.var_type
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the set holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values.
    pub fn iter(&self) -> impl Iterator<Item = &UdqScalar> {
        self.values.iter()
    }
}

type EntityValues = BTreeMap<String, BTreeMap<String, f64>>;
type SegmentValues = BTreeMap<String, BTreeMap<String, BTreeMap<usize, f64>>>;

/// Current values of every UDQ plus the bookkeeping that decides when
/// definitions are re-evaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UdqState {
    undefined: f64,
    scalar_values: BTreeMap<String, f64>,
    well_values: EntityValues,
    group_values: EntityValues,
    segment_values: SegmentValues,
    defines: BTreeMap<String, usize>,
    updates: BTreeMap<String, (UdqUpdate, usize)>,
}

impl Default for UdqState {
    fn default() -> Self {
        Self::new(DEFAULT_UNDEFINED_VALUE)
    }
}

impl UdqState {
    /// Creates an empty state reporting `undefined` for missing values.
    #[must_use]
    pub fn new(undefined: f64) -> Self {
        Self {
            undefined,
            scalar_values: BTreeMap::new(),
            well_values: EntityValues::new(),
            group_values: EntityValues::new(),
            segment_values: SegmentValues::new(),
            defines: BTreeMap::new(),
            updates: BTreeMap::new(),
        }
    }

    /// The undefined sentinel.
    #[must_use]
    pub fn undefined_value(&self) -> f64 {
        self.undefined
    }

    /// Stores the result of a `UDQ ASSIGN`.
    ///
    /// Undefined values in `result` remove what was stored for their entity.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not a UDQ name.
    pub fn add_assign(&mut self, key: &str, result: &UdqSet) -> Result<()> {
        self.add(key, result)
    }

    /// Stores the result of a `UDQ DEFINE` evaluated at `report_step`.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not a UDQ name.
    pub fn add_define(&mut self, report_step: usize, key: &str, result: &UdqSet) -> Result<()> {
        self.add(key, result)?;
        self.defines.insert(key.to_string(), report_step);
        Ok(())
    }

    fn add(&mut self, key: &str, result: &UdqSet) -> Result<()> {
        if !is_udq(key) {
            return Err(Error::not_udq(key));
        }
        match result.var_type() {
            UdqVarType::Well => {
                add_entity_results(self.well_values.entry(key.to_string()).or_default(), result);
            }
            UdqVarType::Group => {
                add_entity_results(self.group_values.entry(key.to_string()).or_default(), result);
            }
            UdqVarType::Segment => {
                let wells = self.segment_values.entry(key.to_string()).or_default();
                for scalar in result.iter() {
                    let Some(number) = scalar.number else {
                        continue;
                    };
                    match scalar.value {
                        Some(value) => {
                            wells
                                .entry(scalar.wgname.clone())
                                .or_default()
                                .insert(number, value);
                        }
                        None => {
                            if let Some(segments) = wells.get_mut(&scalar.wgname) {
                                segments.remove(&number);
                            }
                        }
                    }
                }
            }
            _ => match result.iter().next().and_then(|s| s.value) {
                Some(value) => {
                    self.scalar_values.insert(key.to_string(), value);
                }
                None => {
                    self.scalar_values.remove(key);
                }
            },
        }
        Ok(())
    }

    /// True if scalar `key` has a value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.scalar_values.contains_key(key)
    }

    /// True if well quantity `key` has a value for `well`.
    #[must_use]
    pub fn has_well_var(&self, well: &str, key: &str) -> bool {
        has_entity_var(&self.well_values, well, key)
    }

    /// True if group quantity `key` has a value for `group`.
    #[must_use]
    pub fn has_group_var(&self, group: &str, key: &str) -> bool {
        has_entity_var(&self.group_values, group, key)
    }

    /// True if segment quantity `key` has a value for `segment` of `well`.
    #[must_use]
    pub fn has_segment_var(&self, well: &str, key: &str, segment: usize) -> bool {
        self.segment_values
            .get(key)
            .and_then(|wells| wells.get(well))
            .is_some_and(|segments| segments.contains_key(&segment))
    }

    /// Scalar value of `key`, or the undefined value.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not a UDQ name.
    pub fn get(&self, key: &str) -> Result<f64> {
        check_udq(key)?;
        Ok(self.scalar_values.get(key).copied().unwrap_or(self.undefined))
    }

    /// Value of well quantity `key` for `well`, or the undefined value.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not a UDQ name.
    pub fn get_well_var(&self, well: &str, key: &str) -> Result<f64> {
        check_udq(key)?;
        Ok(entity_value(&self.well_values, well, key).unwrap_or(self.undefined))
    }

    /// Value of group quantity `key` for `group`, or the undefined value.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not a UDQ name.
    pub fn get_group_var(&self, group: &str, key: &str) -> Result<f64> {
        check_udq(key)?;
        Ok(entity_value(&self.group_values, group, key).unwrap_or(self.undefined))
    }

    /// Value of segment quantity `key` for `segment` of `well`, or the
    /// undefined value.
    ///
    /// # Errors
    ///
    /// Returns `NotUdq` if `key` is not a UDQ name.
    pub fn get_segment_var(&self, well: &str, key: &str, segment: usize) -> Result<f64> {
        check_udq(key)?;
        Ok(self
            .segment_values
            .get(key)
            .and_then(|wells| wells.get(well))
            .and_then(|segments| segments.get(&segment))
            .copied()
            .unwrap_or(self.undefined))
    }

    /// Records a `UDQ UPDATE` request made at `report_step`.
    pub fn set_update(&mut self, key: &str, status: UdqUpdate, report_step: usize) {
        self.updates.insert(key.to_string(), (status, report_step));
    }

    /// Update policy of `key` and the step it was requested at. Keys without
    /// a request are re-evaluated every step.
    #[must_use]
    pub fn update_status(&self, key: &str) -> (UdqUpdate, usize) {
        self.updates
            .get(key)
            .copied()
            .unwrap_or((UdqUpdate::On, 0))
    }

    /// True if the definition of `key` should be evaluated now.
    ///
    /// `NEXT` asks for one more evaluation: true if the key was never
    /// defined or last defined before the step the request was made at.
    #[must_use]
    pub fn define(&self, key: &str) -> bool {
        match self.update_status(key) {
            (UdqUpdate::On, _) => true,
            (UdqUpdate::Off, _) => false,
            (UdqUpdate::Next, step) => self.defines.get(key).is_none_or(|last| *last < step),
        }
    }

    /// Turns every pending `NEXT` into `OFF`.
    ///
    /// Called once per report step boundary, before that step's
    /// evaluations. Returns true if any key changed.
    pub fn clear_next(&mut self) -> bool {
        let mut changed = false;
        for (key, (status, _)) in &mut self.updates {
            if *status == UdqUpdate::Next {
                debug!(key = %key, "UDQ update NEXT -> OFF");
                *status = UdqUpdate::Off;
                changed = true;
            }
        }
        changed
    }

    /// Loads values written to a restart file.
    pub fn load_rst(&mut self, rst: &RstState) {
        for udq in &rst.udqs {
            match udq.category {
                UdqVarType::Scalar | UdqVarType::Field => {
                    if let Some(value) = udq.scalar {
                        self.scalar_values.insert(udq.name.clone(), value);
                    }
                }
                UdqVarType::Well => {
                    let values = self.well_values.entry(udq.name.clone()).or_default();
                    load_entities(values, &udq.entities);
                }
                UdqVarType::Group => {
                    let values = self.group_values.entry(udq.name.clone()).or_default();
                    load_entities(values, &udq.entities);
                }
                UdqVarType::Segment => {
                    let wells = self.segment_values.entry(udq.name.clone()).or_default();
                    for (well, index, value) in &udq.segments {
                        // restart segment indices are zero-based
                        wells
                            .entry(well.clone())
                            .or_default()
                            .insert(index + 1, *value);
                    }
                }
                other => debug!(name = %udq.name, ?other, "restart UDQ level not loaded"),
            }
        }
    }
}

fn check_udq(key: &str) -> Result<()> {
    if is_udq(key) {
        Ok(())
    } else {
        Err(Error::not_udq(key))
    }
}

fn add_entity_results(values: &mut BTreeMap<String, f64>, result: &UdqSet) {
    for scalar in result.iter() {
        match scalar.value {
            Some(value) => {
                values.insert(scalar.wgname.clone(), value);
            }
            None => {
                values.remove(&scalar.wgname);
            }
        }
    }
}

fn load_entities(values: &mut BTreeMap<String, f64>, entities: &[(String, f64)]) {
    for (name, value) in entities {
        values.insert(name.clone(), *value);
    }
}

fn has_entity_var(values: &EntityValues, wgname: &str, key: &str) -> bool {
    values.get(key).is_some_and(|v| v.contains_key(wgname))
}

fn entity_value(values: &EntityValues, wgname: &str, key: &str) -> Option<f64> {
    values.get(key).and_then(|v| v.get(wgname)).copied()
}
