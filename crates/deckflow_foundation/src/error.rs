//! Error types for deckflow.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::deck::KeywordLocation;

/// The main error type for deckflow operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an out of range error.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfRange(message.into()))
    }

    /// Creates an error for a key that does not name a user defined quantity.
    #[must_use]
    pub fn not_udq(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotUdq(key.into()))
    }

    /// Creates an input error raised through a parse context.
    #[must_use]
    pub fn input_error(
        key: impl Into<String>,
        message: impl Into<String>,
        location: Option<KeywordLocation>,
    ) -> Self {
        Self::new(ErrorKind::InputError {
            key: key.into(),
            message: message.into(),
            location,
        })
    }

    /// Creates a map builder partition violation error.
    #[must_use]
    pub fn partition_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PartitionViolation(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::IoError(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed literal or argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup outside the stored range.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Key is not a user defined quantity.
    #[error("key {0} does not correspond to a UDQ")]
    NotUdq(String),

    /// Input problem escalated by the parse context.
    #[error("{key}: {message}{}", location_suffix(.location))]
    InputError {
        /// Parse context key which classified the problem.
        key: String,
        /// Human readable description.
        message: String,
        /// Where in the deck the problem was found.
        location: Option<KeywordLocation>,
    },

    /// Map builder workers did not cover contiguous, ordered index ranges.
    #[error("partition violation: {0}")]
    PartitionViolation(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

fn location_suffix(location: &Option<KeywordLocation>) -> String {
    location
        .as_ref()
        .map(|loc| format!(" ({loc})"))
        .unwrap_or_default()
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Deck file name.
    pub source: Option<String>,
    /// Line number in the deck.
    pub line: Option<usize>,
    /// Keyword / handler frames, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context pointing at a keyword location.
    #[must_use]
    pub fn at(location: &KeywordLocation) -> Self {
        Self::new()
            .with_source(location.filename.clone())
            .with_line(location.lineno)
            .with_frame(location.keyword.clone())
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias using the deckflow error.
pub type Result<T> = std::result::Result<T, Error>;
