//! Policy for recoverable input problems.
//!
//! Handlers that find something questionable in the deck (an unknown report
//! mnemonic, a mixed-style keyword) do not decide themselves whether that is
//! fatal. They look up the problem's key in a [`ParseContext`] and route the
//! diagnostic through [`ParseContext::handle_error`], which logs, records into
//! an [`ErrorGuard`], or fails according to the configured action.

use std::env;
use std::fmt;

use indexmap::IndexMap;
use tracing::{error, warn};

use crate::deck::KeywordLocation;
use crate::error::{Error, Result};
use crate::pattern::NamePattern;

/// Report keyword mixes integer and mnemonic items.
pub const RPT_MIXED_STYLE: &str = "RPT_MIXED_STYLE";
/// Report keyword names a mnemonic outside the keyword's allow list.
pub const RPT_UNKNOWN_MNEMONIC: &str = "RPT_UNKNOWN_MNEMONIC";
/// Report mnemonic carries a value that is not a non-negative integer.
pub const RPT_INVALID_VALUE: &str = "RPT_INVALID_VALUE";
/// Schedule keyword references an entity name that cannot be resolved.
pub const SCHEDULE_INVALID_NAME: &str = "SCHEDULE_INVALID_NAME";
/// WLIST record uses an unknown operation.
pub const SCHEDULE_UNKNOWN_WLIST_OP: &str = "SCHEDULE_UNKNOWN_WLIST_OP";

/// What to do when an input problem is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputErrorAction {
    /// Record silently.
    Ignore,
    /// Log a warning and record.
    Warn,
    /// Fail immediately.
    Throw,
    /// Log and record as an error; the caller aborts after the deck is read.
    DelayedExit,
}

impl fmt::Display for InputErrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ignore => "IGNORE",
            Self::Warn => "WARN",
            Self::Throw => "THROW",
            Self::DelayedExit => "DELAYED_EXIT",
        };
        f.write_str(name)
    }
}

/// A diagnostic recorded by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Parse context key.
    pub key: String,
    /// Message text.
    pub message: String,
    /// Deck location, when known.
    pub location: Option<KeywordLocation>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

/// Accumulates warnings and deferred errors while a deck is processed.
#[derive(Debug, Clone, Default)]
pub struct ErrorGuard {
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
}

impl ErrorGuard {
    /// Creates an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add_warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    /// Records a deferred error.
    pub fn add_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Recorded warnings, oldest first.
    #[must_use]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Recorded errors, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// True if any deferred error is pending.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True if anything at all was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.warnings.clear();
        self.errors.clear();
    }

    /// Logs all recorded diagnostics.
    pub fn dump(&self) {
        for diagnostic in &self.warnings {
            warn!(key = %diagnostic.key, "{diagnostic}");
        }
        for diagnostic in &self.errors {
            error!(key = %diagnostic.key, "{diagnostic}");
        }
    }
}

/// Maps diagnostic keys to actions.
#[derive(Debug, Clone)]
pub struct ParseContext {
    actions: IndexMap<String, InputErrorAction>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseContext {
    /// Environment variables holding colon separated key patterns.
    pub const ENV_OVERRIDES: [(&'static str, InputErrorAction); 4] = [
        ("DECKFLOW_ERRORS_IGNORE", InputErrorAction::Ignore),
        ("DECKFLOW_ERRORS_WARN", InputErrorAction::Warn),
        ("DECKFLOW_ERRORS_EXCEPTION", InputErrorAction::Throw),
        ("DECKFLOW_ERRORS_DELAYED_EXIT", InputErrorAction::DelayedExit),
    ];

    /// Creates a context with the default action for every known key.
    #[must_use]
    pub fn new() -> Self {
        let actions = [
            (RPT_MIXED_STYLE, InputErrorAction::Warn),
            (RPT_UNKNOWN_MNEMONIC, InputErrorAction::Warn),
            (RPT_INVALID_VALUE, InputErrorAction::Warn),
            (SCHEDULE_INVALID_NAME, InputErrorAction::Throw),
            (SCHEDULE_UNKNOWN_WLIST_OP, InputErrorAction::Throw),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();
        Self { actions }
    }

    /// Creates a context where every key uses `action`.
    #[must_use]
    pub fn uniform(action: InputErrorAction) -> Self {
        let mut ctx = Self::new();
        ctx.update("*", action);
        ctx
    }

    /// Creates a default context with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut ctx = Self::new();
        for (var, action) in Self::ENV_OVERRIDES {
            if let Ok(value) = env::var(var) {
                ctx.apply_override_list(&value, action);
            }
        }
        ctx
    }

    /// Applies `action` to each colon separated key pattern in `list`.
    pub fn apply_override_list(&mut self, list: &str, action: InputErrorAction) {
        for pattern in list.split(':').map(str::trim).filter(|p| !p.is_empty()) {
            self.update(pattern, action);
        }
    }

    /// Sets the action for every key matching `pattern`.
    ///
    /// A plain name that is not yet known is added. Returns the number of keys
    /// updated.
    pub fn update(&mut self, pattern: &str, action: InputErrorAction) -> usize {
        let pattern = NamePattern::new(pattern);
        if !pattern.is_glob() {
            self.actions.insert(pattern.as_str().to_string(), action);
            return 1;
        }
        let mut updated = 0;
        for (key, value) in &mut self.actions {
            if pattern.is_match(key) {
                *value = action;
                updated += 1;
            }
        }
        updated
    }

    /// Builder form of [`update`](Self::update).
    #[must_use]
    pub fn with(mut self, pattern: &str, action: InputErrorAction) -> Self {
        self.update(pattern, action);
        self
    }

    /// True if `key` has a configured action.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    /// Action for `key`; unknown keys throw.
    #[must_use]
    pub fn action(&self, key: &str) -> InputErrorAction {
        self.actions
            .get(key)
            .copied()
            .unwrap_or(InputErrorAction::Throw)
    }

    /// Routes a diagnostic according to its key's action.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` when the action is [`InputErrorAction::Throw`].
    /// The guard is cleared first so that the failure is not reported twice.
    pub fn handle_error(
        &self,
        key: &str,
        message: impl Into<String>,
        location: Option<&KeywordLocation>,
        guard: &mut ErrorGuard,
    ) -> Result<()> {
        let diagnostic = Diagnostic {
            key: key.to_string(),
            message: message.into(),
            location: location.cloned(),
        };
        match self.action(key) {
            InputErrorAction::Ignore => {
                guard.add_warning(diagnostic);
                Ok(())
            }
            InputErrorAction::Warn => {
                warn!(key, "{diagnostic}");
                guard.add_warning(diagnostic);
                Ok(())
            }
            InputErrorAction::Throw => {
                error!(key, "{diagnostic}");
                guard.clear();
                Err(Error::input_error(
                    diagnostic.key,
                    diagnostic.message,
                    diagnostic.location,
                ))
            }
            InputErrorAction::DelayedExit => {
                error!(key, "{diagnostic}");
                guard.add_error(diagnostic);
                Ok(())
            }
        }
    }
}
