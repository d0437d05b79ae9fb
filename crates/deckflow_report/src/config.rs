//! Report configuration carried from one report step to the next.

use std::collections::{BTreeMap, BTreeSet};

use deckflow_foundation::{DeckKeyword, Error, ErrorGuard, ParseContext, Result};
use tracing::{debug, trace};

use crate::normalise::MnemonicMap;
use crate::rptrst::parse_rptrst;
use crate::rptsched::{normalise_after_nothing, normalise_rptsched};

/// `RPTSCHED` requests in force at one report step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RptConfig {
    mnemonics: MnemonicMap,
}

impl RptConfig {
    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an `RPTSCHED` keyword on top of `previous`.
    ///
    /// `NOTHING` discards the carried requests and every mnemonic that
    /// precedes it in the keyword.
    ///
    /// # Errors
    ///
    /// Fails when a diagnostic is fatal under `ctx`.
    pub fn from_keyword(
        keyword: &DeckKeyword,
        previous: Option<&RptConfig>,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<Self> {
        let carried = previous.map(|config| config.mnemonics.clone()).unwrap_or_default();
        let (_, mnemonics) = normalise_after_nothing(keyword, &carried, ctx, guard)?;
        Ok(Self { mnemonics })
    }

    /// True if `mnemonic` is requested.
    #[must_use]
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.mnemonics.contains_key(mnemonic)
    }

    /// Value of `mnemonic`, if requested.
    #[must_use]
    pub fn get(&self, mnemonic: &str) -> Option<i32> {
        self.mnemonics.get(mnemonic).copied()
    }

    /// The `index`-th request in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<(&str, i32)> {
        self.mnemonics
            .get_index(index)
            .map(|(name, value)| (name.as_str(), *value))
            .ok_or_else(|| {
                Error::out_of_range(format!(
                    "report request {index} of {}",
                    self.mnemonics.len()
                ))
            })
    }

    /// Number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mnemonics.len()
    }

    /// True if nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mnemonics.is_empty()
    }

    /// Requests in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.mnemonics.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The underlying map.
    #[must_use]
    pub fn mnemonics(&self) -> &MnemonicMap {
        &self.mnemonics
    }
}

/// Restart output configuration at one report step.
///
/// `basic` selects when restart files are written: 0 never, 1 and 2 at
/// this step, 3 and above on a frequency governed by `freq`, in which case
/// `write_rst_file` is left undecided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RstConfig {
    basic: Option<i32>,
    freq: Option<i32>,
    write_rst_file: Option<bool>,
    compositional: bool,
    keywords: BTreeMap<String, i32>,
    solution_only_keywords: BTreeSet<String>,
}

impl RstConfig {
    /// An empty configuration.
    #[must_use]
    pub fn new(compositional: bool) -> Self {
        Self {
            compositional,
            ..Self::default()
        }
    }

    /// Builds the configuration described by SOLUTION section keywords.
    ///
    /// Only `RPTRST` and `RPTSOL` are considered.
    ///
    /// # Errors
    ///
    /// Fails when a diagnostic is fatal under `ctx`.
    pub fn from_solution<'k>(
        keywords: impl IntoIterator<Item = &'k DeckKeyword>,
        compositional: bool,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<Self> {
        let mut config = Self {
            write_rst_file: Some(true),
            ..Self::new(compositional)
        };
        for keyword in keywords {
            match keyword.name() {
                "RPTRST" => config.handle_solution_rptrst(keyword, ctx, guard)?,
                "RPTSOL" => config.handle_rptsol(keyword, ctx, guard)?,
                other => trace!(keyword = other, "not a restart keyword"),
            }
        }
        Ok(config)
    }

    /// Derives the first SCHEDULE configuration from a SOLUTION one.
    ///
    /// Solution-only mnemonics are dropped and `write_rst_file` is
    /// recomputed from `basic`.
    #[must_use]
    pub fn first(solution: &RstConfig) -> RstConfig {
        let mut config = solution.clone();
        for keyword in &solution.solution_only_keywords {
            config.keywords.remove(keyword);
        }
        config.solution_only_keywords.clear();
        config.write_rst_file = match config.basic {
            None | Some(..=0) => Some(false),
            Some(1 | 2) => Some(true),
            Some(_) => None,
        };
        config
    }

    /// Applies a SCHEDULE section `RPTRST` or `RPTSCHED` keyword.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for any other keyword, or fails when a
    /// diagnostic is fatal under `ctx`.
    pub fn update(
        &mut self,
        keyword: &DeckKeyword,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<()> {
        match keyword.name() {
            "RPTRST" => self.handle_rptrst(keyword, ctx, guard),
            "RPTSCHED" => self.handle_rptsched(keyword, ctx, guard),
            other => Err(Error::invalid_argument(format!(
                "restart configuration cannot use {other}"
            ))),
        }
    }

    /// `BASIC` setting.
    #[must_use]
    pub fn basic(&self) -> Option<i32> {
        self.basic
    }

    /// `FREQ` setting.
    #[must_use]
    pub fn freq(&self) -> Option<i32> {
        self.freq
    }

    /// Whether this step writes a restart file; `None` when frequency
    /// based output decides.
    #[must_use]
    pub fn write_rst_file(&self) -> Option<bool> {
        self.write_rst_file
    }

    /// True for compositional runs.
    #[must_use]
    pub fn compositional(&self) -> bool {
        self.compositional
    }

    /// Requested restart mnemonics.
    #[must_use]
    pub fn keywords(&self) -> &BTreeMap<String, i32> {
        &self.keywords
    }

    /// Value of one restart mnemonic.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<i32> {
        self.keywords.get(name).copied()
    }

    /// Mnemonics requested only for the initial restart file.
    #[must_use]
    pub fn solution_only_keywords(&self) -> &BTreeSet<String> {
        &self.solution_only_keywords
    }

    fn update_schedule(&mut self, basic: Option<i32>, freq: Option<i32>) {
        if basic.is_some() {
            self.basic = basic;
        }
        if freq.is_some() {
            self.freq = freq;
        }
        if let Some(basic) = self.basic {
            self.write_rst_file = match basic {
                0 => Some(false),
                1 | 2 => Some(true),
                _ => None,
            };
        }
    }

    fn handle_rptrst(
        &mut self,
        keyword: &DeckKeyword,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<()> {
        let request = parse_rptrst(keyword, self.compositional, ctx, guard)?;
        self.update_schedule(request.basic, request.freq);
        self.keywords.extend(request.mnemonics);
        debug!(basic = ?self.basic, freq = ?self.freq, "RPTRST applied");
        Ok(())
    }

    fn handle_solution_rptrst(
        &mut self,
        keyword: &DeckKeyword,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<()> {
        let request = parse_rptrst(keyword, self.compositional, ctx, guard)?;
        if request.basic.is_some() {
            self.basic = request.basic;
        }
        if request.freq.is_some() {
            self.freq = request.freq;
        }
        for (name, value) in request.mnemonics {
            // explicit RPTRST requests outlive the SOLUTION section
            self.solution_only_keywords.remove(&name);
            self.keywords.insert(name, value);
        }
        if self.basic == Some(0) {
            self.write_rst_file = Some(false);
        }
        Ok(())
    }

    fn handle_rptsol(
        &mut self,
        keyword: &DeckKeyword,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<()> {
        let mut mnemonics: BTreeMap<String, i32> =
            normalise_rptsched(keyword, ctx, guard)?.into_iter().collect();
        let restart = mnemonics.remove("RESTART");
        let request_restart = restart.is_some_and(|r| r > 1);
        self.write_rst_file = Some(self.write_rst_file == Some(true) || request_restart);
        if request_restart {
            self.solution_only_keywords.extend(mnemonics.keys().cloned());
            for (name, value) in std::mem::take(&mut self.keywords) {
                mnemonics.entry(name).or_insert(value);
            }
            self.keywords = mnemonics;
        }
        Ok(())
    }

    fn handle_rptsched(
        &mut self,
        keyword: &DeckKeyword,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<()> {
        let (reset, mnemonics) =
            normalise_after_nothing(keyword, &MnemonicMap::new(), ctx, guard)?;
        if reset {
            self.basic = None;
            self.keywords.clear();
        }
        let mut mnemonics: BTreeMap<String, i32> = mnemonics.into_iter().collect();
        if self.basic.unwrap_or(2) <= 2 {
            if let Some(restart) = mnemonics.remove("RESTART") {
                self.update_schedule(Some(restart.min(2)), Some(1));
            }
        }
        self.keywords.extend(mnemonics);
        Ok(())
    }
}
