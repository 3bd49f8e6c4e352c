//! JSON Wire Formats for FireWatch
//!
//! ## Overview
//!
//! `firewatch-core` works on typed values. Everything that crosses the
//! backend boundary is JSON: devices POST a payload every couple of seconds,
//! the device document store keeps a `current` / `commands` pair per device,
//! and history collections hold one object per reading or alarm. This crate
//! owns those shapes and the conversions in both directions.
//!
//! ## Field Naming
//!
//! The documents predate this crate and dashboards read them directly, so
//! every field keeps its stored camelCase name (`coPpm`, `aqiRaw`,
//! `sensorWarmup`, `tempThreshold`). Enum values keep their snake_case
//! names (`unhealthy_sensitive`, `fire_risk`).
//!
//! ## Leniency
//!
//! Device payloads are parsed leniently: every field is optional and unknown
//! fields are ignored, so older firmware keeps working. An unknown status
//! string is dropped (the status is then recomputed from the concentration)
//! rather than rejecting the whole update.
//!
//! ## Update Flow
//!
//! ```text
//! request body ──► DevicePayload ──► SensorSnapshot ─┐
//!                                                    ├─► AlertOrchestrator::evaluate
//! StoredDevice ──► ThresholdSet, Calibration,        │
//!                  DeviceState (previous) ───────────┘
//!                                                    │
//!                  merge_current(stored, payload, evaluation) ──► StoredDevice.current
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use firewatch_schemas::{parse_payload, StoredDevice};
//!
//! let payload = parse_payload(r#"{"coPpm": 120, "temperature": 24.5, "gas": 12}"#)?;
//! let device = StoredDevice::default();
//!
//! let evaluation = device.orchestrator(&payload).evaluate(
//!     "kitchen",
//!     &device.previous_state(),
//!     &payload.to_snapshot(),
//!     1_700_000_000_000,
//! );
//! assert_eq!(evaluation.co_status.as_str(), "danger");
//! # Ok::<(), firewatch_schemas::SchemaError>(())
//! ```

pub mod device;
pub mod records;

pub use device::{
    merge_current, parse_payload, CoThresholdUpdate, CurrentState, DeviceCommands, DevicePayload,
    StoredDevice,
};
pub use records::{
    alarm_event_to_json, filter_history_json, history_record_to_json, notification_to_json,
    record_timestamp,
};

/// Wire-format errors
#[derive(Debug, Clone, PartialEq, thiserror_no_std::Error)]
pub enum SchemaError {
    /// Malformed JSON or a field of the wrong type
    #[error("Invalid JSON: {0}")]
    Json(String),

    /// A document that must be an object was not
    #[error("Expected a JSON object")]
    NotAnObject,

    /// Status string outside the known set
    #[error("Unknown status value: {0}")]
    UnknownStatus(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err.to_string())
    }
}
