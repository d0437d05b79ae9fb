//! Structured deck input.
//!
//! The tokenizer and keyword grammar live upstream; by the time keywords reach
//! deckflow they are already split into records of named items. Item values are
//! kept as raw tokens and converted on access.

use std::fmt;

use crate::error::{Error, Result};

/// Where a keyword was read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordLocation {
    /// Keyword name as written in the deck.
    pub keyword: String,
    /// File the keyword was read from.
    pub filename: String,
    /// 1-based line number of the keyword.
    pub lineno: usize,
}

impl KeywordLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(keyword: impl Into<String>, filename: impl Into<String>, lineno: usize) -> Self {
        Self {
            keyword: keyword.into(),
            filename: filename.into(),
            lineno,
        }
    }
}

impl fmt::Display for KeywordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} line {}", self.keyword, self.filename, self.lineno)
    }
}

/// A named item within a record. An empty value list means the item was defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckItem {
    name: String,
    values: Vec<String>,
}

impl DeckItem {
    /// Creates an item holding the given raw tokens.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a defaulted item.
    #[must_use]
    pub fn defaulted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no value was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw tokens.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at `index` as a string, with surrounding quotes removed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the item has no value at `index`.
    pub fn get_string(&self, index: usize) -> Result<String> {
        self.raw(index).map(|raw| unquote(raw).to_string())
    }

    /// Value at `index` as an integer.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for a missing value and `InvalidArgument` when the
    /// token is not an integer.
    pub fn get_int(&self, index: usize) -> Result<i64> {
        let raw = self.raw(index)?;
        raw.trim().parse::<i64>().map_err(|_| {
            Error::invalid_argument(format!(
                "item {} value '{raw}' is not an integer",
                self.name
            ))
        })
    }

    /// Value at `index` as a floating point number.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for a missing value and `InvalidArgument` when the
    /// token is not numeric.
    pub fn get_double(&self, index: usize) -> Result<f64> {
        let raw = self.raw(index)?;
        raw.trim().parse::<f64>().map_err(|_| {
            Error::invalid_argument(format!("item {} value '{raw}' is not a number", self.name))
        })
    }

    fn raw(&self, index: usize) -> Result<&str> {
        self.values.get(index).map(String::as_str).ok_or_else(|| {
            Error::out_of_range(format!(
                "item {} has {} values, index {index} requested",
                self.name,
                self.values.len()
            ))
        })
    }
}

/// Strips one pair of enclosing single quotes.
#[must_use]
pub fn unquote(token: &str) -> &str {
    token
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(token)
}

/// One slash-terminated record of a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckRecord {
    items: Vec<DeckItem>,
}

impl DeckRecord {
    /// Creates a record from its items.
    #[must_use]
    pub fn new(items: Vec<DeckItem>) -> Self {
        Self { items }
    }

    /// Builds a record whose items each hold a single value.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            items: pairs
                .into_iter()
                .map(|(name, value)| DeckItem::new(name, [value]))
                .collect(),
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the record holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DeckItem> {
        self.items.get(index)
    }

    /// Item by name.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the record has no item of that name.
    pub fn item(&self, name: &str) -> Result<&DeckItem> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .ok_or_else(|| Error::out_of_range(format!("record has no item {name}")))
    }

    /// True if the record has a non-defaulted item of that name.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.name == name && !item.is_empty())
    }

    /// All items, in record order.
    #[must_use]
    pub fn items(&self) -> &[DeckItem] {
        &self.items
    }
}

/// A keyword with its records and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckKeyword {
    name: String,
    location: KeywordLocation,
    records: Vec<DeckRecord>,
}

impl DeckKeyword {
    /// Creates a keyword with no records and an anonymous location.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            location: KeywordLocation::new(name.clone(), "<memory>", 0),
            name,
            records: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_location(mut self, filename: impl Into<String>, lineno: usize) -> Self {
        self.location = KeywordLocation::new(self.name.clone(), filename, lineno);
        self
    }

    /// Appends a record.
    #[must_use]
    pub fn with_record(mut self, record: DeckRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Convenience for report keywords: a single record with one item holding
    /// every token.
    #[must_use]
    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records
            .push(DeckRecord::new(vec![DeckItem::new("MNEMONIC_LIST", tokens)]));
        self
    }

    /// Keyword name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source location.
    #[must_use]
    pub fn location(&self) -> &KeywordLocation {
        &self.location
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the keyword has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the keyword has fewer records.
    pub fn record(&self, index: usize) -> Result<&DeckRecord> {
        self.records.get(index).ok_or_else(|| {
            Error::out_of_range(format!(
                "{} has {} records, index {index} requested",
                self.name,
                self.records.len()
            ))
        })
    }

    /// All records.
    pub fn records(&self) -> impl Iterator<Item = &DeckRecord> {
        self.records.iter()
    }

    /// Every raw token of every item of every record, in deck order.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|record| record.items.iter())
            .flat_map(|item| item.values.iter().cloned())
            .collect()
    }
}
