//! Match requests.

use deckflow_foundation::{Error, Result};

/// Characters of a region summary vector name before the region set suffix,
/// e.g. `ROPR_` in `ROPR_NUM`.
const REGION_VECTOR_PAD: usize = 5;

/// A partially specified request: optional owner pattern and optional
/// numeric ID. A missing owner means every owner, a missing ID the full range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDescriptor {
    owner: Option<String>,
    id: Option<i32>,
}

impl SetDescriptor {
    /// Matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to owners matching `pattern`. An empty pattern means all.
    #[must_use]
    pub fn with_owner(mut self, pattern: &str) -> Self {
        self.owner = (!pattern.is_empty()).then(|| pattern.to_string());
        self
    }

    /// Restricts to one ID. Non-positive values mean the full range.
    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = (id > 0).then_some(id);
        self
    }

    /// Restricts to the ID written in `text`.
    ///
    /// Only the text inside the first pair of single quotes is read, if the
    /// text is quoted. An empty string or `*` means the full range; otherwise
    /// the whole string must be an optionally negative run of ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unterminated quote or a string that is
    /// not exactly an integer (surrounding blanks included).
    pub fn parse_id(self, text: &str) -> Result<Self> {
        let body = dequote(text)?;
        if body.is_empty() || body.trim() == "*" {
            return Ok(Self { id: None, ..self });
        }
        let invalid = || Error::invalid_argument(format!("'{text}' is not a valid ID"));
        let digits = body.strip_prefix('-').unwrap_or(body);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let id = body.parse::<i32>().map_err(|_| invalid())?;
        Ok(self.with_id(id))
    }

    /// Derives the region set from a region summary vector name.
    ///
    /// `ROPR_NUM` addresses set `NUM`; a bare `ROPR` addresses every set.
    #[must_use]
    pub fn with_vector_name(mut self, vector: &str) -> Self {
        self.owner = vector
            .get(REGION_VECTOR_PAD..)
            .filter(|set| !set.is_empty())
            .map(str::to_string);
        self
    }

    /// Owner pattern, if restricted.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// ID, if restricted.
    #[must_use]
    pub fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Text between the first quote and the quote that closes it.
fn dequote(text: &str) -> Result<&str> {
    let Some((_, rest)) = text.split_once('\'') else {
        return Ok(text);
    };
    rest.split_once('\'')
        .map(|(body, _)| body)
        .ok_or_else(|| Error::invalid_argument(format!("unterminated quote in '{text}'")))
}
