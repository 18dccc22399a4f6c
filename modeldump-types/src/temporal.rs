//! Temporal values and their ISO-8601 rendering.
//!
//! Rendering rules:
//! - offset-aware datetimes use RFC 3339, with `Z` for a zero offset
//! - fractional seconds are printed as six digits, or nine when the value
//!   has sub-microsecond precision, and omitted when zero
//! - naive datetimes use the same layout without an offset

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc,
};
use std::fmt;

use crate::{Error, Result};

const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Precision for a sub-second value: none, microseconds or nanoseconds.
fn seconds_format(nanos: u32) -> SecondsFormat {
    if nanos == 0 {
        SecondsFormat::Secs
    } else if nanos % 1_000 == 0 {
        SecondsFormat::Micros
    } else {
        SecondsFormat::Nanos
    }
}

fn format_time(t: &NaiveTime) -> String {
    let pattern = match seconds_format(t.nanosecond()) {
        SecondsFormat::Secs => "%H:%M:%S",
        SecondsFormat::Micros => "%H:%M:%S%.6f",
        _ => "%H:%M:%S%.9f",
    };
    t.format(pattern).to_string()
}

/// A date, time or datetime field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
}

impl Temporal {
    /// Renders the value as an ISO-8601 string.
    #[must_use]
    pub fn to_iso(&self) -> String {
        match self {
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Time(t) => format_time(t),
            Self::DateTime(dt) => dt.to_rfc3339_opts(seconds_format(dt.nanosecond()), true),
            Self::NaiveDateTime(dt) => format!(
                "{}T{}",
                dt.date().format("%Y-%m-%d"),
                format_time(&dt.time())
            ),
        }
    }

    /// Parses a calendar date (`2025-04-18`).
    pub fn parse_date(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
    }

    /// Parses a wall-clock time (`22:21:43` or `22:21:43.609831`).
    pub fn parse_time(s: &str) -> Result<Self> {
        NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self::Time)
            .map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
    }

    /// Parses a datetime. RFC 3339 input keeps its offset; input without an
    /// offset is kept naive rather than guessed into a timezone.
    pub fn parse_datetime(s: &str) -> Result<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::DateTime(dt));
        }
        NaiveDateTime::parse_from_str(s, NAIVE_DATETIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .map(Self::NaiveDateTime)
            .map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
    }
}

impl From<DateTime<Utc>> for Temporal {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Temporal {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDate> for Temporal {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveTime> for Temporal {
    fn from(t: NaiveTime) -> Self {
        Self::Time(t)
    }
}

impl From<NaiveDateTime> for Temporal {
    fn from(dt: NaiveDateTime) -> Self {
        Self::NaiveDateTime(dt)
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}
