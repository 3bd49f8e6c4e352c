//! Core evaluation engine for FireWatch
//!
//! Turns raw gas-sensor readings into concentrations, severity levels,
//! fire-risk flags and the alerts a household alarm backend has to send.
//! Every function is pure; the only outside input is the current time.
//!
//! Key constraints:
//! - Usable on the device (ESP32) as well as in the backend (`no_std` + `alloc`)
//! - A flaky or uninitialised sensor never panics and never raises an alarm
//! - Fixed-capacity collections for per-update outputs
//!
//! ```no_run
//! use firewatch_core::{AlertOrchestrator, DeviceState, SensorSnapshot};
//!
//! let orchestrator = AlertOrchestrator::default();
//! let snapshot = SensorSnapshot {
//!     co_ppm: Some(120.0),
//!     ..Default::default()
//! };
//!
//! let eval = orchestrator.evaluate("kitchen", &DeviceState::default(), &snapshot, 0);
//! for notification in &eval.notifications {
//!     // hand over to push delivery
//!     let _ = notification.title;
//! }
//! let _store_me = eval.next_state();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod logging;

pub mod buffer;
pub mod classify;
pub mod config;
pub mod constants;
pub mod detect;
pub mod errors;
pub mod estimators;
pub mod events;
pub mod history;
pub mod orchestrator;
pub mod time;
pub mod traits;

// Public API
pub use classify::{aqi_status, co_status, AqiStatus, CoStatus, SeverityBand};
pub use config::{Calibration, CoThresholds, FireRiskThresholds, ThresholdSet};
pub use detect::{
    apply_moving_average, detect_fire_risk, is_sensor_stuck, is_warming_up, SensorHealth,
};
pub use errors::{EvaluationError, EvaluationResult};
pub use estimators::{calculate_aqi, calculate_co_ppm, AqiEstimator, CoEstimator, RawReading};
pub use events::{AlarmEvent, AlarmTrigger, AlertLevel, AlertTrigger, HistoryRecord, Notification};
pub use history::{filter_by_time_range, TimeRange};
pub use orchestrator::{AlertOrchestrator, DeviceState, Evaluation, SensorSnapshot};
pub use traits::{Classifier, Estimator, Timestamped};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
