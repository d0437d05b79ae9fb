//! UDA values: keyword arguments that are either a number or a UDQ name.

use std::fmt;

use deckflow_foundation::{Error, Result};

const UDQ_LEVELS: &[u8] = b"ABCFGRSW";

/// A numeric literal or a reference to a UDQ.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UdaValue {
    /// A plain number.
    Numeric(f64),
    /// The name of a UDQ evaluated at run time.
    Udq(String),
}

impl Default for UdaValue {
    fn default() -> Self {
        Self::Numeric(0.0)
    }
}

impl UdaValue {
    /// Parses a deck token.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `text` is neither a finite number nor a
    /// UDQ name.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Ok(value) = text.parse::<f64>() {
            if !value.is_finite() {
                return Err(Error::invalid_argument(format!(
                    "UDA value '{text}' is not a finite number"
                )));
            }
            return Ok(Self::Numeric(value));
        }
        let bytes = text.as_bytes();
        if bytes.len() >= 2 && UDQ_LEVELS.contains(&bytes[0]) && bytes[1] == b'U' {
            return Ok(Self::Udq(text.to_string()));
        }
        Err(Error::invalid_argument(format!(
            "'{text}' is neither a number nor a UDQ name"
        )))
    }

    /// True for numeric values.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// The numeric value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the value is a UDQ reference, which
    /// has no value until evaluated.
    pub fn get(&self) -> Result<f64> {
        match self {
            Self::Numeric(value) => Ok(*value),
            Self::Udq(name) => Err(Error::invalid_argument(format!(
                "UDA value {name} is a UDQ and has no numeric value"
            ))),
        }
    }

    /// The referenced UDQ, if any.
    #[must_use]
    pub fn udq(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Udq(name) => Some(name),
        }
    }
}

impl From<f64> for UdaValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl fmt::Display for UdaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Udq(name) => f.write_str(name),
        }
    }
}
