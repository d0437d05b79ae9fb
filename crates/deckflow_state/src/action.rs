//! Action definitions and run bookkeeping.

use std::collections::BTreeMap;

use deckflow_foundation::{DeckRecord, Error, Result, SimTime};
use tracing::debug;

use crate::restart::RstState;

/// The scheduling parameters of one `ACTIONX` block.
///
/// Redefining an action under the same name creates a new definition with
/// a new `id`; run histories are kept per `(name, id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionX {
    name: String,
    id: usize,
    max_run: usize,
    min_wait: i64,
    start_time: SimTime,
}

impl ActionX {
    /// Creates an action with ID 0.
    ///
    /// `max_run == 0` means the action never runs.
    /// `min_wait` is in seconds.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        max_run: usize,
        min_wait: i64,
        start_time: SimTime,
    ) -> Self {
        Self {
            name: name.into(),
            id: 0,
            max_run,
            min_wait,
            start_time,
        }
    }

    /// Sets the definition ID.
    #[must_use]
    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    /// Reads the header record of an `ACTIONX` keyword.
    ///
    /// Items are `NAME`, `NUM` (maximum runs, default 1) and `MIN_WAIT`
    /// (seconds, default 0).
    ///
    /// # Errors
    ///
    /// Fails when `NAME` is missing or a numeric item is malformed.
    pub fn from_record(record: &DeckRecord, start_time: SimTime, id: usize) -> Result<Self> {
        let name = record.item("NAME")?.get_string(0)?;
        let max_run = match record.item("NUM") {
            Ok(item) if !item.is_empty() => {
                let value = item.get_int(0)?;
                usize::try_from(value).map_err(|_| {
                    Error::invalid_argument(format!("ACTIONX {name}: negative run count {value}"))
                })?
            }
            _ => 1,
        };
        let min_wait = match record.item("MIN_WAIT") {
            Ok(item) if !item.is_empty() => seconds(item.get_double(0)?),
            _ => 0,
        };
        Ok(Self::new(name, max_run, min_wait, start_time).with_id(id))
    }

    /// Action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Definition ID.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum number of runs; 0 means never.
    #[must_use]
    pub fn max_run(&self) -> usize {
        self.max_run
    }

    /// Minimum time between runs, in seconds.
    #[must_use]
    pub fn min_wait(&self) -> i64 {
        self.min_wait
    }

    /// Earliest time the action may run.
    #[must_use]
    pub fn start_time(&self) -> SimTime {
        self.start_time
    }

    /// True if the action may be evaluated at `sim_time`.
    #[must_use]
    pub fn ready(&self, state: &ActionState, sim_time: SimTime) -> bool {
        let run_count = state.run_count(self);
        if run_count >= self.max_run || sim_time < self.start_time {
            return false;
        }
        if run_count == 0 || self.min_wait <= 0 {
            return true;
        }
        state
            .run_time(self)
            .is_ok_and(|last| sim_time - last >= self.min_wait)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn seconds(value: f64) -> i64 {
    value.round() as i64
}

/// Outcome of evaluating an action condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    condition_satisfied: bool,
    wells: Vec<String>,
}

impl ActionResult {
    /// A result with no matched entities.
    #[must_use]
    pub fn new(condition_satisfied: bool) -> Self {
        Self {
            condition_satisfied,
            wells: Vec::new(),
        }
    }

    /// Adds the wells that made the condition true.
    #[must_use]
    pub fn with_wells<I, S>(mut self, wells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wells.extend(wells.into_iter().map(Into::into));
        self
    }

    /// True if the condition held.
    #[must_use]
    pub fn condition_satisfied(&self) -> bool {
        self.condition_satisfied
    }

    /// Matched wells, in evaluation order.
    #[must_use]
    pub fn wells(&self) -> &[String] {
        &self.wells
    }

    /// True if `well` is among the matched wells.
    #[must_use]
    pub fn has_well(&self, well: &str) -> bool {
        self.wells.iter().any(|w| w == well)
    }
}

/// Run count and latest run time of one action definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    /// Completed runs.
    pub run_count: usize,
    /// Time of the latest run.
    pub last_run: SimTime,
}

/// Run history of every action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionState {
    run_state: BTreeMap<String, BTreeMap<usize, RunState>>,
    last_result: BTreeMap<String, ActionResult>,
    python_results: BTreeMap<String, bool>,
}

impl ActionState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a run of `action` at `sim_time`.
    ///
    /// A result with matched wells replaces the match set stored for the
    /// action name; a result without keeps the previous one.
    pub fn add_run(&mut self, action: &ActionX, sim_time: SimTime, result: ActionResult) {
        let state = self
            .run_state
            .entry(action.name().to_string())
            .or_default()
            .entry(action.id())
            .or_insert(RunState {
                run_count: 0,
                last_run: sim_time,
            });
        state.run_count += 1;
        state.last_run = sim_time;
        debug!(
            action = action.name(),
            id = action.id(),
            runs = state.run_count,
            "action run"
        );
        if !result.wells().is_empty() {
            self.last_result.insert(action.name().to_string(), result);
        }
    }

    /// Records the outcome of a scripted action.
    pub fn add_python_run(&mut self, name: &str, result: bool) {
        self.python_results.insert(name.to_string(), result);
    }

    /// Number of runs of `action`; 0 if it never ran.
    #[must_use]
    pub fn run_count(&self, action: &ActionX) -> usize {
        self.state(action).map_or(0, |s| s.run_count)
    }

    /// Time of the latest run of `action`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the action if it never ran.
    pub fn run_time(&self, action: &ActionX) -> Result<SimTime> {
        self.state(action).map(|s| s.last_run).ok_or_else(|| {
            Error::invalid_argument(format!("action {} has not been run", action.name()))
        })
    }

    /// Latest result with matched wells for the action called `name`.
    #[must_use]
    pub fn result(&self, name: &str) -> Option<&ActionResult> {
        self.last_result.get(name)
    }

    /// Latest outcome of the scripted action called `name`.
    #[must_use]
    pub fn python_result(&self, name: &str) -> Option<bool> {
        self.python_results.get(name).copied()
    }

    /// Restores run histories from a restart file.
    pub fn load_rst(&mut self, rst: &RstState) {
        for action in &rst.actions {
            let Some(last_run) = action.last_run else {
                continue;
            };
            if action.run_count == 0 {
                continue;
            }
            self.run_state
                .entry(action.name.clone())
                .or_default()
                .insert(
                    action.id,
                    RunState {
                        run_count: action.run_count,
                        last_run,
                    },
                );
        }
    }

    fn state(&self, action: &ActionX) -> Option<&RunState> {
        self.run_state
            .get(action.name())
            .and_then(|ids| ids.get(&action.id()))
    }
}
