//! History, alarm and notification records as JSON
//!
//! Records are written with numeric millisecond timestamps. Records read back
//! from the store may carry other timestamp forms; [`record_timestamp`]
//! accepts:
//!
//! - a number of milliseconds since the epoch
//! - an RFC 3339 string (`2024-03-01T12:00:00.000Z`)
//! - an extended-JSON date (`{"$date": ...}` wrapping either of the above)

use chrono::DateTime;
use serde_json::Value;

use firewatch_core::{
    history::TimeRange, time::Timestamp, AlarmEvent, HistoryRecord, Notification,
};

use crate::SchemaError;

/// Gas-history document for one reading
pub fn history_record_to_json(record: &HistoryRecord) -> Result<Value, SchemaError> {
    Ok(serde_json::to_value(record)?)
}

/// Alarm-history document
pub fn alarm_event_to_json(event: &AlarmEvent) -> Result<Value, SchemaError> {
    Ok(serde_json::to_value(event)?)
}

/// Push payload as handed to the delivery service
pub fn notification_to_json(notification: &Notification) -> Result<Value, SchemaError> {
    Ok(serde_json::to_value(notification)?)
}

/// Timestamp of a stored record, if it has a readable one
pub fn record_timestamp(record: &Value) -> Option<Timestamp> {
    parse_timestamp(record.get("timestamp")?)
}

fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .and_then(|dt| u64::try_from(dt.timestamp_millis()).ok()),
        Value::Object(map) => map.get("$date").and_then(parse_timestamp),
        _ => None,
    }
}

/// Stored records inside `range` ending at `now`
///
/// Anything other than an array yields an empty list. Records without a
/// readable timestamp are dropped.
pub fn filter_history_json(records: &Value, range: TimeRange, now: Timestamp) -> Vec<Value> {
    let Some(items) = records.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|r| record_timestamp(r).is_some_and(|ts| range.contains(ts, now)))
        .cloned()
        .collect()
}
