//! Timestamp type used on results and batches.
//!
//! Timestamps are UTC instants. They serialize as ISO-8601 strings with
//! millisecond precision (`2023-06-15T10:30:00.000Z`), which is also the form
//! written into exported CSV files.

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A point in time (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from Unix epoch milliseconds.
    ///
    /// Out-of-range values clamp to the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(
            Utc.timestamp_millis_opt(millis)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// ISO-8601 with milliseconds and a `Z` suffix.
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Short calendar date in the local time zone, used for auto-generated
    /// batch names, e.g. `6/15/2023`.
    pub fn date_label(&self) -> String {
        self.0.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
    }

    /// `YYYY-MM-DD`, used in default export file names.
    pub fn date_stamp(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl FromStr for Timestamp {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TypesError::InvalidTimestamp(format!("{s}: {e}")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}
