//! Run level configuration of a schedule.

use deckflow_foundation::context::{RPT_INVALID_VALUE, RPT_MIXED_STYLE, RPT_UNKNOWN_MNEMONIC};
use deckflow_foundation::{InputErrorAction, ParseContext};
use deckflow_state::udq::DEFAULT_UNDEFINED_VALUE;

/// Report keyword diagnostic keys.
const RPT_KEYS: [&str; 3] = [RPT_MIXED_STYLE, RPT_UNKNOWN_MNEMONIC, RPT_INVALID_VALUE];

/// Settings that stay fixed for the whole schedule.
///
/// The dimensions normally come from the run's `WELLDIMS` and `REGDIMS`
/// keywords; the parse context decides how recoverable input problems are
/// reported.
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Declared number of non-FIELD groups.
    pub max_groups: usize,

    /// Declared maximum region ID.
    pub declared_max_region_id: i32,

    /// Value reported for UDQs that have not been assigned.
    pub udq_undefined_value: f64,

    /// Whether restart mnemonics of compositional runs are accepted.
    pub compositional: bool,

    /// Action per diagnostic key.
    pub parse_context: ParseContext,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_groups: 10,
            declared_max_region_id: 1,
            udq_undefined_value: DEFAULT_UNDEFINED_VALUE,
            compositional: false,
            parse_context: ParseContext::new(),
        }
    }
}

impl ScheduleConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every report keyword diagnostic aborts the schedule.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_report_action(InputErrorAction::Throw)
    }

    /// Report keyword diagnostics are recorded but never logged.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default().with_report_action(InputErrorAction::Ignore)
    }

    /// Creates a default configuration whose parse context honours the
    /// `DECKFLOW_ERRORS_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            parse_context: ParseContext::from_env(),
            ..Self::default()
        }
    }

    /// Builder method to set the declared group count.
    #[must_use]
    pub const fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }

    /// Builder method to set the declared maximum region ID.
    #[must_use]
    pub const fn with_declared_max_region_id(mut self, max_id: i32) -> Self {
        self.declared_max_region_id = max_id;
        self
    }

    /// Builder method to set the UDQ undefined value.
    #[must_use]
    pub const fn with_udq_undefined_value(mut self, value: f64) -> Self {
        self.udq_undefined_value = value;
        self
    }

    /// Builder method to enable compositional restart mnemonics.
    #[must_use]
    pub const fn with_compositional(mut self, compositional: bool) -> Self {
        self.compositional = compositional;
        self
    }

    /// Builder method to replace the parse context.
    #[must_use]
    pub fn with_parse_context(mut self, parse_context: ParseContext) -> Self {
        self.parse_context = parse_context;
        self
    }

    /// Builder method to set the action of every report keyword diagnostic.
    #[must_use]
    pub fn with_report_action(mut self, action: InputErrorAction) -> Self {
        for key in RPT_KEYS {
            self.parse_context.update(key, action);
        }
        self
    }
}
