//! Snapshot of the schedule at one report step.
//!
//! Starting a report step copies the previous snapshot. The registries are
//! `im` collections and the report configurations sit behind `Arc`, so the
//! copy is O(1) and the first write to a configuration clones only that
//! configuration.

use std::sync::Arc;

use deckflow_foundation::{Result, SimTime};
use deckflow_matcher::{SegmentMatcher, WellListMatcher, WellMatcher};
use deckflow_registry::{GroupOrder, NameOrder, WListManager, WellCatalog};
use deckflow_report::{RptConfig, RstConfig};
use serde::{Deserialize, Serialize};

/// Registries and report configuration in force during one report step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    step: usize,
    start_time: SimTime,
    wells: NameOrder,
    groups: GroupOrder,
    well_catalog: WellCatalog,
    wlists: WListManager,
    rpt_config: Arc<RptConfig>,
    rst_config: Arc<RstConfig>,
}

impl ScheduleState {
    /// Creates the state of report step 0.
    #[must_use]
    pub fn new(start_time: SimTime, max_groups: usize, compositional: bool) -> Self {
        Self {
            step: 0,
            start_time,
            wells: NameOrder::new(),
            groups: GroupOrder::new(max_groups),
            well_catalog: WellCatalog::new(),
            wlists: WListManager::new(),
            rpt_config: Arc::new(RptConfig::new()),
            rst_config: Arc::new(RstConfig::new(compositional)),
        }
    }

    /// State of the following report step, starting at `start_time`.
    #[must_use]
    pub fn next(&self, start_time: SimTime) -> Self {
        Self {
            step: self.step + 1,
            start_time,
            ..self.clone()
        }
    }

    /// Report step index.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Time the report step starts.
    #[must_use]
    pub fn start_time(&self) -> SimTime {
        self.start_time
    }

    /// Wells in order of introduction.
    #[must_use]
    pub fn wells(&self) -> &NameOrder {
        &self.wells
    }

    /// Mutable well order.
    pub fn wells_mut(&mut self) -> &mut NameOrder {
        &mut self.wells
    }

    /// Groups in order of introduction, `FIELD` first.
    #[must_use]
    pub fn groups(&self) -> &GroupOrder {
        &self.groups
    }

    /// Mutable group order.
    pub fn groups_mut(&mut self) -> &mut GroupOrder {
        &mut self.groups
    }

    /// Well definitions.
    #[must_use]
    pub fn well_catalog(&self) -> &WellCatalog {
        &self.well_catalog
    }

    /// Mutable well definitions.
    pub fn well_catalog_mut(&mut self) -> &mut WellCatalog {
        &mut self.well_catalog
    }

    /// Well lists.
    #[must_use]
    pub fn wlists(&self) -> &WListManager {
        &self.wlists
    }

    /// Mutable well lists.
    pub fn wlists_mut(&mut self) -> &mut WListManager {
        &mut self.wlists
    }

    /// Current `RPTSCHED` mnemonics.
    #[must_use]
    pub fn rpt_config(&self) -> &RptConfig {
        &self.rpt_config
    }

    /// Replaces the `RPTSCHED` mnemonics.
    pub fn set_rpt_config(&mut self, config: RptConfig) {
        self.rpt_config = Arc::new(config);
    }

    /// Current restart output configuration.
    #[must_use]
    pub fn rst_config(&self) -> &RstConfig {
        &self.rst_config
    }

    /// Mutable restart output configuration, detached from earlier steps.
    pub fn rst_config_mut(&mut self) -> &mut RstConfig {
        Arc::make_mut(&mut self.rst_config)
    }

    /// Replaces the restart output configuration.
    pub fn set_rst_config(&mut self, config: RstConfig) {
        self.rst_config = Arc::new(config);
    }

    /// Registers `well` under `group`, registering the group as well.
    pub fn define_well(&mut self, well: &str, group: &str) {
        self.groups.add(group);
        self.wells.add(well);
        self.well_catalog.define(well, group);
    }

    /// Group layout for restart output.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when more groups exist than were declared.
    pub fn restart_groups(&self) -> Result<Vec<Option<String>>> {
        self.groups.restart_groups()
    }

    /// Well name matcher that expands `*LIST` patterns.
    #[must_use]
    pub fn well_matcher(&self) -> WellMatcher<'_> {
        WellMatcher::with_wlists(&self.wells, &self.wlists)
    }

    /// Segment matcher over the multi-segment wells of this step.
    #[must_use]
    pub fn segment_matcher(&self) -> SegmentMatcher<'_> {
        SegmentMatcher::new(&self.wells, &self.well_catalog, &self.wlists)
    }

    /// Well list membership matcher.
    #[must_use]
    pub fn wlist_matcher(&self) -> WellListMatcher<'_> {
        WellListMatcher::new(&self.wlists)
    }
}
