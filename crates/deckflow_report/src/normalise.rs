//! Report keyword normalisation.
//!
//! Report keywords accept two input styles. Old decks list positional
//! integer controls (`0 0 1 0 2`), newer decks list mnemonics with optional
//! values (`FIP=2 WELLS`). [`RptKeywordNormaliser`] classifies the items of a
//! keyword once into a [`KeywordShape`] and turns every shape into a single
//! insertion-ordered [`MnemonicMap`].
//!
//! The normaliser holds no carry-forward state. The map from the previous
//! report step goes in, the merged map comes out.

use deckflow_foundation::context::{RPT_INVALID_VALUE, RPT_MIXED_STYLE, RPT_UNKNOWN_MNEMONIC};
use deckflow_foundation::{
    DeckKeyword, Error, ErrorGuard, KeywordLocation, ParseContext, Result, unquote,
};
use indexmap::IndexMap;
use regex::Regex;
use tracing::trace;

/// Mnemonic to value, in first-seen order.
pub type MnemonicMap = IndexMap<String, i32>;

/// The input style of a report keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordShape {
    /// No items at all.
    Empty,
    /// Every item is integer shaped. Tokens are kept as written so that
    /// out of range values can be reported.
    IntegerOnly(Vec<String>),
    /// No item is an integer.
    MnemonicOnly(Vec<String>),
    /// Integers and mnemonics side by side.
    MixedStyle(Vec<String>),
}

impl KeywordShape {
    /// Classifies raw item tokens. Quotes are stripped and blank tokens are
    /// dropped first.
    #[must_use]
    pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Self {
        let tokens: Vec<String> = tokens
            .iter()
            .map(|t| unquote(t.as_ref().trim()).trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Self::Empty;
        }
        let integers = tokens.iter().filter(|t| is_integer_token(t)).count();
        if integers == tokens.len() {
            Self::IntegerOnly(tokens)
        } else if integers == 0 {
            Self::MnemonicOnly(tokens)
        } else {
            Self::MixedStyle(tokens)
        }
    }
}

/// True if `token` is an optional `-` followed by at least one digit.
#[must_use]
pub fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Reads integer controls. Negative or oversized controls are reported as
/// `RPT_INVALID_VALUE` and read as 0, which keeps later positions in place.
fn integer_controls(
    tokens: &[String],
    location: &KeywordLocation,
    ctx: &ParseContext,
    guard: &mut ErrorGuard,
) -> Result<Vec<i64>> {
    let mut values = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<i32>() {
            Ok(value) if value >= 0 => values.push(i64::from(value)),
            _ => {
                ctx.handle_error(
                    RPT_INVALID_VALUE,
                    format!(
                        "{} integer control '{token}' is not a non-negative 32-bit value; read as 0",
                        location.keyword
                    ),
                    Some(location),
                    guard,
                )?;
                values.push(0);
            }
        }
    }
    Ok(values)
}

pub(crate) fn to_value(value: i64) -> Result<i32> {
    if value < 0 {
        return Err(Error::out_of_range(format!(
            "integer control {value} is negative"
        )));
    }
    i32::try_from(value)
        .map_err(|_| Error::out_of_range(format!("integer control {value} is too large")))
}

/// Expands positional integer controls into mnemonics.
pub trait IntegerHandler {
    /// Maps the integers of an `IntegerOnly` keyword. The result replaces
    /// whatever the previous step carried.
    ///
    /// # Errors
    ///
    /// Implementation specific; the stock handlers fail only on values that
    /// do not fit an `i32`.
    fn expand(&self, values: &[i64]) -> Result<MnemonicMap>;
}

impl<F> IntegerHandler for F
where
    F: Fn(&[i64]) -> Result<MnemonicMap>,
{
    fn expand(&self, values: &[i64]) -> Result<MnemonicMap> {
        self(values)
    }
}

/// Decides which mnemonics a keyword recognises.
pub trait MnemonicFilter {
    /// True if `mnemonic` is valid for the keyword.
    fn accepts(&self, mnemonic: &str) -> bool;
}

/// Accepts every mnemonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl MnemonicFilter for AcceptAll {
    fn accepts(&self, _mnemonic: &str) -> bool {
        true
    }
}

/// A sorted, static list of valid mnemonics.
#[derive(Debug, Clone, Copy)]
pub struct AllowList {
    names: &'static [&'static str],
}

impl AllowList {
    /// Wraps `names`, which must be sorted.
    #[must_use]
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// The listed mnemonics.
    #[must_use]
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }
}

impl MnemonicFilter for AllowList {
    fn accepts(&self, mnemonic: &str) -> bool {
        self.names.binary_search(&mnemonic).is_ok()
    }
}

/// How a positional table turns an integer into a mnemonic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Non-zero integers yield the value 1, zeros yield nothing.
    Flag,
    /// Every integer is kept as written.
    Verbatim,
}

/// Index to mnemonic table for positional integer controls.
///
/// Blank table entries are reserved positions and never produce a mnemonic.
/// Integers beyond the end of the table are ignored.
#[derive(Debug, Clone, Copy)]
pub struct PositionalTable {
    names: &'static [&'static str],
    policy: ValuePolicy,
}

impl PositionalTable {
    /// Creates a table.
    #[must_use]
    pub const fn new(names: &'static [&'static str], policy: ValuePolicy) -> Self {
        Self { names, policy }
    }

    /// Mnemonic at `index`, if the position is not reserved.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).copied().filter(|n| !n.is_empty())
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the table has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl IntegerHandler for PositionalTable {
    fn expand(&self, values: &[i64]) -> Result<MnemonicMap> {
        let mut map = MnemonicMap::new();
        for (index, value) in values.iter().enumerate().take(self.names.len()) {
            let Some(name) = self.name(index) else {
                continue;
            };
            match self.policy {
                ValuePolicy::Flag if *value != 0 => {
                    map.insert(name.to_string(), 1);
                }
                ValuePolicy::Flag => {}
                ValuePolicy::Verbatim => {
                    map.insert(name.to_string(), to_value(*value)?);
                }
            }
        }
        Ok(map)
    }
}

/// Normalises one report keyword against a previous mnemonic map.
#[derive(Debug, Clone)]
pub struct RptKeywordNormaliser<H, F> {
    integers: H,
    filter: F,
    equals: Regex,
}

impl<H: IntegerHandler, F: MnemonicFilter> RptKeywordNormaliser<H, F> {
    /// Creates a normaliser from an integer handler and a mnemonic filter.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the token pattern fails to compile.
    pub fn new(integers: H, filter: F) -> Result<Self> {
        let equals = Regex::new(r"\s*=\s*").map_err(|e| Error::internal(e.to_string()))?;
        Ok(Self {
            integers,
            filter,
            equals,
        })
    }

    /// The mnemonic filter.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Normalises every token of `keyword`.
    ///
    /// # Errors
    ///
    /// Fails when a diagnostic is configured as fatal in `ctx`, or when the
    /// integer handler fails.
    pub fn normalise(
        &self,
        keyword: &DeckKeyword,
        previous: &MnemonicMap,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<MnemonicMap> {
        self.normalise_tokens(&keyword.tokens(), keyword.location(), previous, ctx, guard)
    }

    /// Normalises raw tokens read at `location`.
    ///
    /// * `Empty` returns `previous` unchanged.
    /// * `IntegerOnly` returns a fresh map from the integer handler.
    /// * `MnemonicOnly` merges into `previous`. New keys are appended, known
    ///   keys are updated in place.
    /// * `MixedStyle` reports `RPT_MIXED_STYLE`, then merges as mnemonics.
    ///
    /// # Errors
    ///
    /// See [`normalise`](Self::normalise).
    pub fn normalise_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
        location: &KeywordLocation,
        previous: &MnemonicMap,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<MnemonicMap> {
        self.normalise_shape(tokens, location, previous, None, ctx, guard)
            .map(|(_, map)| map)
    }

    /// Like [`normalise_tokens`](Self::normalise_tokens), but a `reset`
    /// mnemonic drops `previous` together with every entry up to and
    /// including its first occurrence. Every token is validated first, so
    /// entries before the reset still raise their diagnostics.
    ///
    /// Returns whether the reset mnemonic was present.
    ///
    /// # Errors
    ///
    /// See [`normalise`](Self::normalise).
    pub fn normalise_with_reset<S: AsRef<str>>(
        &self,
        tokens: &[S],
        location: &KeywordLocation,
        previous: &MnemonicMap,
        reset: &str,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<(bool, MnemonicMap)> {
        self.normalise_shape(tokens, location, previous, Some(reset), ctx, guard)
    }

    fn normalise_shape<S: AsRef<str>>(
        &self,
        tokens: &[S],
        location: &KeywordLocation,
        previous: &MnemonicMap,
        reset: Option<&str>,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<(bool, MnemonicMap)> {
        let tokens = match KeywordShape::classify(tokens) {
            KeywordShape::Empty => return Ok((false, previous.clone())),
            KeywordShape::IntegerOnly(tokens) => {
                let values = integer_controls(&tokens, location, ctx, guard)?;
                trace!(keyword = %location.keyword, count = values.len(), "integer controls");
                return Ok((false, self.integers.expand(&values)?));
            }
            KeywordShape::MnemonicOnly(tokens) => tokens,
            KeywordShape::MixedStyle(tokens) => {
                ctx.handle_error(
                    RPT_MIXED_STYLE,
                    format!(
                        "{} mixes integer controls and mnemonics; all items are read as mnemonics",
                        location.keyword
                    ),
                    Some(location),
                    guard,
                )?;
                tokens
            }
        };

        let mut entries = self.mnemonic_entries(&tokens, location, ctx, guard)?;
        let cut = reset.and_then(|name| entries.iter().position(|(m, _)| m == name));
        let mut merged = match cut {
            Some(pos) => {
                entries.drain(..=pos);
                MnemonicMap::new()
            }
            None => previous.clone(),
        };
        merged.extend(entries);
        Ok((cut.is_some(), merged))
    }

    /// Splits tokens into `(mnemonic, value)` entries.
    ///
    /// Tokens are rejoined and whitespace around `=` is removed, so
    /// `BASIC = 2`, `BASIC= 2` and `BASIC=2` are the same entry.
    #[must_use]
    pub fn entries<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<(String, Option<String>)> {
        let joined = tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        let collapsed = self.equals.replace_all(&joined, "=");
        collapsed
            .split_whitespace()
            .map(|entry| match entry.split_once('=') {
                Some((mnemonic, value)) => (mnemonic.to_string(), Some(value.to_string())),
                None => (entry.to_string(), None),
            })
            .collect()
    }

    /// Recognised `(mnemonic, value)` entries in deck order. Unknown
    /// mnemonics and invalid values are reported and skipped.
    fn mnemonic_entries(
        &self,
        tokens: &[String],
        location: &KeywordLocation,
        ctx: &ParseContext,
        guard: &mut ErrorGuard,
    ) -> Result<Vec<(String, i32)>> {
        let mut accepted = Vec::new();
        for (mnemonic, value) in self.entries(tokens) {
            if !self.filter.accepts(&mnemonic) {
                ctx.handle_error(
                    RPT_UNKNOWN_MNEMONIC,
                    format!("unknown {} mnemonic {mnemonic}", location.keyword),
                    Some(location),
                    guard,
                )?;
                continue;
            }
            let value = match value.as_deref() {
                None => 1,
                Some(text) => match text.parse::<u32>().ok().and_then(|v| i32::try_from(v).ok()) {
                    Some(v) => v,
                    None => {
                        ctx.handle_error(
                            RPT_INVALID_VALUE,
                            format!(
                                "{} mnemonic {mnemonic} has invalid value '{text}'",
                                location.keyword
                            ),
                            Some(location),
                            guard,
                        )?;
                        continue;
                    }
                },
            };
            accepted.push((mnemonic, value));
        }
        Ok(accepted)
    }
}
