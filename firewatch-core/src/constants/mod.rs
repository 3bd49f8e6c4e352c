//! Constants for FireWatch Core
//!
//! Centralised numeric values used throughout the evaluation pipeline. Each
//! constant carries its unit in the name and a note on where the value comes
//! from (datasheet, device firmware default, or household safety guidance).
//!
//! ## Organization
//!
//! - **Sensors**: ADC resolution, circuit parameters, MQ-7/MQ-135 curves
//! - **Thresholds**: CO, AQI, gas and temperature cut-points
//! - **Time**: unit conversions, warmup period, report ranges
//! - **Buffers**: sample-window sizes for anomaly detection

/// ADC, circuit and gas-sensor characteristics.
pub mod sensors;

/// Classification cut-points and per-device threshold bounds.
pub mod thresholds;

/// Time conversions, warmup duration and history ranges.
pub mod time;

/// Sample-window sizes for stuck detection and smoothing.
pub mod buffers;

pub use sensors::{
    ADC_MAX, DEFAULT_LOAD_RESISTANCE_KOHM, DEFAULT_SUPPLY_VOLTAGE,
    CO_PPM_MAX, AQI_MAX, DEFAULT_REFERENCE_RESISTANCE_KOHM,
};

pub use thresholds::{
    CO_WARNING_PPM, CO_DANGER_PPM, CO_CRITICAL_PPM,
    AQI_GOOD_MAX, AQI_MODERATE_MAX, AQI_UNHEALTHY_SENSITIVE_MAX,
    DEFAULT_GAS_ALARM_PCT, DEFAULT_TEMP_ALARM_C, FIRE_RISK_MARGIN,
};

pub use time::{MS_PER_SECOND, MS_PER_HOUR, MS_PER_DAY, SENSOR_WARMUP_MS};

pub use buffers::{STUCK_SENSOR_MIN_READINGS, MOVING_AVERAGE_WINDOW, ADC_HISTORY_CAPACITY};
