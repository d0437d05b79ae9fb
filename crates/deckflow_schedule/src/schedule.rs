//! The report step timeline.

use std::iter;
use std::mem;

use deckflow_foundation::{
    DeckKeyword, Error, ErrorContext, ErrorGuard, KeywordLocation, Result, SimTime,
};
use deckflow_matcher::RegionSetMatcher;
use deckflow_registry::RegionStatistics;
use deckflow_report::RstConfig;
use deckflow_state::{ActionState, RstState, UdqState};
use tracing::debug;

use crate::config::ScheduleConfig;
use crate::handlers::{HandlerContext, handle_keyword};
use crate::serialize::SimulatorState;
use crate::state::ScheduleState;

/// Keywords of one report step, in deck order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    /// Time the report step starts.
    pub start_time: SimTime,
    /// Keywords that apply from `start_time`.
    pub keywords: Vec<DeckKeyword>,
}

impl ScheduleBlock {
    /// Creates an empty block.
    #[must_use]
    pub fn new(start_time: SimTime) -> Self {
        Self {
            start_time,
            keywords: Vec::new(),
        }
    }

    /// Builder method to append a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: DeckKeyword) -> Self {
        self.keywords.push(keyword);
        self
    }
}

/// Snapshots of every report step plus the run state shared across steps.
///
/// Only the latest step accepts keywords; earlier steps are frozen once the
/// next one starts.
#[derive(Debug, Clone)]
pub struct Schedule {
    config: ScheduleConfig,
    regions: RegionStatistics,
    history: Vec<ScheduleState>,
    current: ScheduleState,
    action_state: ActionState,
    udq_state: UdqState,
    guard: ErrorGuard,
}

impl Schedule {
    /// Creates a schedule whose step 0 starts at `start_time`.
    #[must_use]
    pub fn new(config: ScheduleConfig, start_time: SimTime) -> Self {
        let current = ScheduleState::new(start_time, config.max_groups, config.compositional);
        Self {
            regions: RegionStatistics::from_maxima(
                config.declared_max_region_id,
                iter::empty::<(String, i32)>(),
            ),
            udq_state: UdqState::new(config.udq_undefined_value),
            config,
            history: Vec::new(),
            current,
            action_state: ActionState::new(),
            guard: ErrorGuard::new(),
        }
    }

    /// Builds a schedule from the SOLUTION section and the SCHEDULE blocks.
    ///
    /// The first block is report step 0; every further block starts a new
    /// step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `blocks` is empty or out of time
    /// order, and fails on the first fatal input problem. Diagnostics
    /// configured as delayed errors fail once all blocks are applied.
    pub fn from_blocks(
        config: ScheduleConfig,
        solution: &[DeckKeyword],
        blocks: &[ScheduleBlock],
    ) -> Result<Self> {
        let (first, rest) = blocks
            .split_first()
            .ok_or_else(|| Error::invalid_argument("schedule without any report step"))?;
        let mut schedule = Self::new(config, first.start_time);
        schedule.apply_solution(solution)?;
        schedule.apply_keywords(&first.keywords)?;
        for block in rest {
            schedule.apply_block(block)?;
        }
        schedule.check_delayed_errors()?;
        Ok(schedule)
    }

    /// Builder method to attach region statistics.
    #[must_use]
    pub fn with_regions(mut self, regions: RegionStatistics) -> Self {
        self.regions = regions;
        self
    }

    /// Seeds the restart configuration of step 0 from SOLUTION keywords.
    ///
    /// # Errors
    ///
    /// Fails when a diagnostic is fatal.
    pub fn apply_solution(&mut self, keywords: &[DeckKeyword]) -> Result<()> {
        let solution = RstConfig::from_solution(
            keywords,
            self.config.compositional,
            &self.config.parse_context,
            &mut self.guard,
        )?;
        self.current.set_rst_config(RstConfig::first(&solution));
        Ok(())
    }

    /// Starts the next report step at `start_time`. Returns its index.
    ///
    /// Pending UDQ `NEXT` requests expire at the boundary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `start_time` is before the current step.
    pub fn create_next(&mut self, start_time: SimTime) -> Result<usize> {
        if start_time < self.current.start_time() {
            return Err(Error::invalid_argument(format!(
                "report step starting at {}s precedes step {} at {}s",
                start_time.seconds(),
                self.current.step(),
                self.current.start_time().seconds()
            )));
        }
        let next = self.current.next(start_time);
        self.history.push(mem::replace(&mut self.current, next));
        self.udq_state.clear_next();
        debug!(
            step = self.current.step(),
            start = start_time.seconds(),
            "new report step"
        );
        Ok(self.current.step())
    }

    /// Starts a new report step and applies the block's keywords to it.
    ///
    /// # Errors
    ///
    /// See [`create_next`](Self::create_next) and
    /// [`apply_keyword`](Self::apply_keyword).
    pub fn apply_block(&mut self, block: &ScheduleBlock) -> Result<()> {
        self.create_next(block.start_time)?;
        self.apply_keywords(&block.keywords)
    }

    /// Applies `keyword` to the current step. Returns false if it has no
    /// handler.
    ///
    /// # Errors
    ///
    /// Fails on a malformed record or a fatal diagnostic; the error carries
    /// the keyword location.
    pub fn apply_keyword(&mut self, keyword: &DeckKeyword) -> Result<bool> {
        let mut ctx = HandlerContext {
            keyword,
            state: &mut self.current,
            udq_state: &mut self.udq_state,
            parse_context: &self.config.parse_context,
            guard: &mut self.guard,
        };
        handle_keyword(&mut ctx).map_err(|err| located(err, keyword.location()))
    }

    fn apply_keywords(&mut self, keywords: &[DeckKeyword]) -> Result<()> {
        for keyword in keywords {
            self.apply_keyword(keyword)?;
        }
        Ok(())
    }

    /// Fails if a diagnostic was recorded as a delayed error.
    ///
    /// # Errors
    ///
    /// Returns the first delayed error as an `InputError`.
    pub fn check_delayed_errors(&self) -> Result<()> {
        let Some(first) = self.guard.errors().first() else {
            return Ok(());
        };
        self.guard.dump();
        Err(Error::input_error(
            first.key.clone(),
            format!(
                "{} ({} delayed errors in total)",
                first.message,
                self.guard.errors().len()
            ),
            first.location.clone(),
        ))
    }

    /// Number of report steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len() + 1
    }

    /// Always false: a schedule has at least step 0.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Snapshot of report step `step`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` past the last step.
    pub fn step(&self, step: usize) -> Result<&ScheduleState> {
        if step == self.current.step() {
            return Ok(&self.current);
        }
        self.history.get(step).ok_or_else(|| {
            Error::out_of_range(format!(
                "report step {step} requested, schedule has {} steps",
                self.len()
            ))
        })
    }

    /// Snapshot of the latest report step.
    #[must_use]
    pub fn current(&self) -> &ScheduleState {
        &self.current
    }

    /// All snapshots in step order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduleState> {
        self.history.iter().chain(iter::once(&self.current))
    }

    /// Index of the step in force at `time`, if the schedule has started.
    #[must_use]
    pub fn step_at(&self, time: SimTime) -> Option<usize> {
        self.iter()
            .take_while(|state| state.start_time() <= time)
            .last()
            .map(ScheduleState::step)
    }

    /// Run configuration.
    #[must_use]
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Region statistics.
    #[must_use]
    pub fn regions(&self) -> &RegionStatistics {
        &self.regions
    }

    /// Region set matcher over the attached statistics.
    #[must_use]
    pub fn region_matcher(&self) -> RegionSetMatcher<'_> {
        RegionSetMatcher::new(&self.regions)
    }

    /// Action run history.
    #[must_use]
    pub fn action_state(&self) -> &ActionState {
        &self.action_state
    }

    /// Mutable action run history.
    pub fn action_state_mut(&mut self) -> &mut ActionState {
        &mut self.action_state
    }

    /// UDQ values and update policies.
    #[must_use]
    pub fn udq_state(&self) -> &UdqState {
        &self.udq_state
    }

    /// Mutable UDQ state.
    pub fn udq_state_mut(&mut self) -> &mut UdqState {
        &mut self.udq_state
    }

    /// Diagnostics collected so far.
    #[must_use]
    pub fn guard(&self) -> &ErrorGuard {
        &self.guard
    }

    /// Loads action and UDQ state from restart data.
    pub fn load_rst(&mut self, rst: &RstState) {
        self.action_state.load_rst(rst);
        self.udq_state.load_rst(rst);
        debug!(
            actions = rst.actions.len(),
            udqs = rst.udqs.len(),
            "restart state loaded"
        );
    }

    /// Copies out the state a simulator persists between runs.
    #[must_use]
    pub fn simulator_state(&self) -> SimulatorState {
        SimulatorState {
            action_state: self.action_state.clone(),
            udq_state: self.udq_state.clone(),
            wlists: self.current.wlists().clone(),
        }
    }

    /// Replaces run state and the current step's well lists.
    pub fn restore(&mut self, state: SimulatorState) {
        self.action_state = state.action_state;
        self.udq_state = state.udq_state;
        *self.current.wlists_mut() = state.wlists;
    }
}

fn located(err: Error, location: &KeywordLocation) -> Error {
    if err.context.is_some() {
        return err;
    }
    err.with_context(ErrorContext::at(location))
}
