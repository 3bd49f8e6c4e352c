//! History range queries
//!
//! Dashboards ask for the last day, week or month of readings. Records are
//! kept when `now - range <= timestamp <= now`; records stamped in the future
//! (device clock ahead of the server) are dropped.

use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use crate::{
    constants::time::{RANGE_DAY_MS, RANGE_MONTH_MS, RANGE_WEEK_MS},
    time::Timestamp,
    traits::Timestamped,
};

/// Look-back window for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeRange {
    /// Last 24 hours
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "24h"))]
    Day,
    /// Last 7 days
    #[cfg_attr(feature = "serde", serde(rename = "7d"))]
    Week,
    /// Last 30 days
    #[cfg_attr(feature = "serde", serde(rename = "30d"))]
    Month,
}

impl TimeRange {
    /// Window length in milliseconds
    pub const fn duration_ms(&self) -> u64 {
        match self {
            TimeRange::Day => RANGE_DAY_MS,
            TimeRange::Week => RANGE_WEEK_MS,
            TimeRange::Month => RANGE_MONTH_MS,
        }
    }

    /// Query-string form
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "24h",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
        }
    }

    /// Parse a query parameter; anything unrecognised means the last 24 hours
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Oldest timestamp still inside the window
    pub const fn cutoff(&self, now: Timestamp) -> Timestamp {
        now.saturating_sub(self.duration_ms())
    }

    /// Whether `timestamp` falls inside the window ending at `now`
    pub const fn contains(&self, timestamp: Timestamp, now: Timestamp) -> bool {
        timestamp >= self.cutoff(now) && timestamp <= now
    }
}

/// Error for an unrecognised range string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRange;

impl fmt::Display for UnknownRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown time range (expected 24h, 7d or 30d)")
    }
}

impl FromStr for TimeRange {
    type Err = UnknownRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(TimeRange::Day),
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            _ => Err(UnknownRange),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records inside `range` ending at `now`, in input order
pub fn filter_by_time_range<R>(records: &[R], range: TimeRange, now: Timestamp) -> Vec<R>
where
    R: Timestamped + Clone,
{
    records
        .iter()
        .filter(|r| range.contains(r.timestamp(), now))
        .cloned()
        .collect()
}
