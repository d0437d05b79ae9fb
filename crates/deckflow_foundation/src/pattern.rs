//! Shell-style name patterns.
//!
//! Deck keywords address wells, groups and lists with `fnmatch` style patterns:
//! `*` matches any run of characters, `?` a single character and `[...]` a
//! character class. Matching is case sensitive and `/` is an ordinary
//! character. Braces are literal; there is no `{a,b}` alternation.

use std::borrow::Cow;
use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

/// Returns true if `text` contains any glob metacharacter.
#[must_use]
pub fn has_glob(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// One-shot match of `name` against `pattern`.
#[must_use]
pub fn shmatch(pattern: &str, name: &str) -> bool {
    NamePattern::new(pattern).is_match(name)
}

/// Escapes `{` and `}` outside character classes so the glob compiler
/// reads them as plain characters.
fn literal_braces(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains(['{', '}']) {
        return Cow::Borrowed(pattern);
    }
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                out.extend(chars.next());
            }
            '[' => {
                out.push(c);
                out.extend(chars.next_if(|&n| n == '!' || n == '^'));
                // a leading `]` is part of the class
                out.extend(chars.next_if_eq(&']'));
                for n in chars.by_ref() {
                    out.push(n);
                    if n == ']' {
                        break;
                    }
                }
            }
            '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// A compiled name pattern.
///
/// Patterns without metacharacters, and patterns that do not compile (for
/// example an unclosed `[`), compare by exact equality.
#[derive(Clone)]
pub struct NamePattern {
    source: String,
    matcher: Option<GlobMatcher>,
}

impl NamePattern {
    /// Compiles `pattern`.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let matcher = if has_glob(pattern) {
            GlobBuilder::new(&literal_braces(pattern))
                .literal_separator(false)
                .case_insensitive(false)
                .backslash_escape(true)
                .build()
                .ok()
                .map(|glob| glob.compile_matcher())
        } else {
            None
        };
        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    /// The pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the pattern uses wildcards.
    #[must_use]
    pub fn is_glob(&self) -> bool {
        self.matcher.is_some()
    }

    /// Tests `name` against the pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(name),
            None => self.source == name,
        }
    }

    /// Filters `names`, keeping order and multiplicity.
    #[must_use]
    pub fn filter<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> Vec<&'n str> {
        names
            .into_iter()
            .filter(|name| self.is_match(name))
            .collect()
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for NamePattern {}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.source).finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for NamePattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}
