//! Time-Related Constants

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = MS_PER_SECOND * 60;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u64 = MS_PER_MINUTE * 60;

/// Milliseconds per day.
pub const MS_PER_DAY: u64 = MS_PER_HOUR * 24;

// ===== SENSOR TIMING =====

/// Heater warmup after boot before MQ readings are trusted (ms).
///
/// MQ-series sensors drift heavily while the heater element settles.
/// Three minutes is the shortest interval the devices were observed to
/// stabilise in.
pub const SENSOR_WARMUP_MS: u64 = 3 * MS_PER_MINUTE;

/// Interval between device reports (ms).
///
/// Source: device firmware push interval
pub const DEVICE_REPORT_INTERVAL_MS: u64 = 2 * MS_PER_SECOND;

// ===== HISTORY RANGES =====

/// Span of the `24h` history range (ms).
pub const RANGE_DAY_MS: u64 = MS_PER_DAY;

/// Span of the `7d` history range (ms).
pub const RANGE_WEEK_MS: u64 = 7 * MS_PER_DAY;

/// Span of the `30d` history range (ms).
pub const RANGE_MONTH_MS: u64 = 30 * MS_PER_DAY;
