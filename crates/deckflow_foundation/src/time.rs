//! Simulation time points.
//!
//! Schedule instants are whole seconds since the Unix epoch, UTC. Arithmetic
//! stays in integer seconds; `chrono` is used for construction and display.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{Error, Result};

/// One instant on the simulation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(i64);

impl SimTime {
    /// Creates a time point from seconds since the epoch.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Creates a time point at midnight of the given calendar day.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an impossible date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| Error::invalid_argument(format!("invalid date {year}-{month}-{day}")))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::internal("midnight out of range"))?;
        Ok(Self::from_naive(midnight))
    }

    /// Creates a time point from a naive UTC date-time.
    #[must_use]
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime.and_utc().timestamp())
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.0
    }

    /// The time point as a `chrono` date-time, if representable.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// Adds whole days.
    #[must_use]
    pub const fn plus_days(self, days: i64) -> Self {
        Self(self.0 + days * 86_400)
    }
}

impl Add<i64> for SimTime {
    type Output = Self;

    fn add(self, seconds: i64) -> Self {
        Self(self.0 + seconds)
    }
}

impl Sub for SimTime {
    type Output = i64;

    /// Difference in seconds.
    fn sub(self, other: Self) -> i64 {
        self.0 - other.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%d-%b-%Y %H:%M:%S")),
            None => write!(f, "{}s", self.0),
        }
    }
}
