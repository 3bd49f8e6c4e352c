//! Cross-Sensor Correlation and Sensor Anomaly Detection
//!
//! ## Fire Risk
//!
//! A single MQ sensor is noisy: cooking fumes push the gas reading up, a
//! sunny window pushes the temperature up, a gas heater nudges CO. A fire
//! moves all three at once. Fire risk is therefore a plain conjunction:
//!
//! ```text
//! fire_risk = co   >= co_warning
//!           ∧ temp >= temp_warning
//!           ∧ gas  >= gas_warning
//! ```
//!
//! There is no weighting or scoring. Any one condition missing means no
//! fire risk.
//!
//! ## Sensor Anomalies
//!
//! ### Stuck Sensors
//! A live MQ sensor never reports a perfectly flat signal for a full minute.
//! When the last [`STUCK_SENSOR_MIN_READINGS`] samples are all identical the
//! sensor is reported stuck, whether it is pinned at 0, at 4095, or anywhere
//! in between. With fewer samples there is no evidence either way and the
//! answer is "not stuck".
//!
//! ### Warmup
//! MQ heaters need [`SENSOR_WARMUP_MS`] after boot before readings settle.
//! Missing timestamps are treated as "still warming up" so that an
//! uninitialised device cannot raise alarms.
//!
//! ```text
//! elapsed = now - boot
//! warming = elapsed < duration      (exactly `duration` => warmup complete)
//! ```
//!
//! ## Smoothing
//! [`apply_moving_average`] averages the newest `window` samples. It is the
//! same filter the devices apply before reporting percentages.

use crate::{
    config::FireRiskThresholds,
    constants::{
        buffers::{MOVING_AVERAGE_WINDOW, STUCK_SENSOR_MIN_READINGS},
        time::SENSOR_WARMUP_MS,
    },
    errors::{EvaluationError, EvaluationResult},
    time::{elapsed_ms, Timestamp},
};

/// True iff CO, temperature and gas all meet their warning levels
pub fn detect_fire_risk(
    co_ppm: f32,
    temperature_c: f32,
    gas_pct: f32,
    thresholds: &FireRiskThresholds,
) -> bool {
    co_ppm >= thresholds.co_warning
        && temperature_c >= thresholds.temp_warning
        && gas_pct >= thresholds.gas_warning
}

/// Strict stuck-sensor check
///
/// Returns [`EvaluationError::InsufficientData`] when fewer than
/// `min_readings` samples are available.
pub fn check_stuck(readings: &[f32], min_readings: usize) -> EvaluationResult<bool> {
    if readings.len() < min_readings {
        return Err(EvaluationError::InsufficientData {
            required: min_readings,
            available: readings.len(),
        });
    }

    let recent = &readings[readings.len() - min_readings..];
    Ok(match recent.first() {
        Some(first) => recent.iter().all(|r| r == first),
        // min_readings == 0: nothing to compare
        None => false,
    })
}

/// Whether the newest `min_readings` samples are all identical
///
/// Insufficient data means "not stuck".
pub fn is_sensor_stuck(readings: &[f32], min_readings: usize) -> bool {
    match check_stuck(readings, min_readings) {
        Ok(stuck) => {
            if stuck {
                log_warn!(
                    "Sensor stuck at {:?} for {} samples",
                    readings.last(),
                    min_readings
                );
            }
            stuck
        }
        Err(_) => false,
    }
}

/// [`is_sensor_stuck`] with the default one-minute window
pub fn is_sensor_stuck_default(readings: &[f32]) -> bool {
    is_sensor_stuck(readings, STUCK_SENSOR_MIN_READINGS)
}

/// Strict warmup check
///
/// Returns [`EvaluationError::MissingTimestamp`] if either timestamp is absent.
/// A `now` before `boot` counts as zero elapsed time.
pub fn check_warmup(
    boot_ms: Option<Timestamp>,
    now_ms: Option<Timestamp>,
    duration_ms: u64,
) -> EvaluationResult<bool> {
    match (boot_ms, now_ms) {
        (Some(boot), Some(now)) => Ok(elapsed_ms(boot, now) < duration_ms),
        _ => Err(EvaluationError::MissingTimestamp),
    }
}

/// Whether the sensor heater is still settling
///
/// Missing timestamps mean "still warming up".
pub fn is_warming_up(
    boot_ms: Option<Timestamp>,
    now_ms: Option<Timestamp>,
    duration_ms: u64,
) -> bool {
    check_warmup(boot_ms, now_ms, duration_ms).unwrap_or(true)
}

/// [`is_warming_up`] with the default three-minute warmup
pub fn is_warming_up_default(boot_ms: Option<Timestamp>, now_ms: Option<Timestamp>) -> bool {
    is_warming_up(boot_ms, now_ms, SENSOR_WARMUP_MS)
}

/// Mean of the newest `window` readings (all of them if fewer)
///
/// A zero window averages every reading. Empty input gives `0.0`.
pub fn apply_moving_average(readings: &[f32], window: usize) -> f32 {
    let take = match window {
        0 => readings.len(),
        w => w.min(readings.len()),
    };
    if take == 0 {
        return 0.0;
    }

    let recent = &readings[readings.len() - take..];
    let sum: f32 = recent.iter().sum();
    sum / take as f32
}

/// [`apply_moving_average`] over the firmware's ten-sample window
pub fn apply_moving_average_default(readings: &[f32]) -> f32 {
    apply_moving_average(readings, MOVING_AVERAGE_WINDOW)
}

/// Overall sensor condition as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum SensorHealth {
    /// Readings usable
    #[default]
    Ok,
    /// Readings not yet trustworthy (warmup)
    Warning,
    /// Readings frozen
    Error,
}

impl SensorHealth {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorHealth::Ok => "ok",
            SensorHealth::Warning => "warning",
            SensorHealth::Error => "error",
        }
    }
}

/// Combine the anomaly flags; a stuck sensor outranks warmup
pub fn sensor_health(stuck: bool, warming_up: bool) -> SensorHealth {
    if stuck {
        SensorHealth::Error
    } else if warming_up {
        SensorHealth::Warning
    } else {
        SensorHealth::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spec_thresholds() -> FireRiskThresholds {
        FireRiskThresholds {
            co_warning: 35.0,
            temp_warning: 50.0,
            gas_warning: 30.0,
        }
    }

    #[test]
    fn fire_risk_needs_all_three() {
        let t = spec_thresholds();
        assert!(!detect_fire_risk(30.0, 60.0, 50.0, &t));
        assert!(!detect_fire_risk(50.0, 40.0, 50.0, &t));
        assert!(!detect_fire_risk(50.0, 60.0, 20.0, &t));
        assert!(detect_fire_risk(50.0, 60.0, 50.0, &t));
    }

    #[test]
    fn fire_risk_thresholds_are_inclusive() {
        let t = spec_thresholds();
        assert!(detect_fire_risk(35.0, 50.0, 30.0, &t));
    }

    #[test]
    fn warmup_boundary_is_strict() {
        assert!(is_warming_up(Some(0), Some(179_999), 180_000));
        assert!(!is_warming_up(Some(0), Some(180_000), 180_000));
        assert!(!is_warming_up(Some(0), Some(180_001), 180_000));
    }

    #[test]
    fn missing_timestamps_mean_warming() {
        assert!(is_warming_up(None, Some(1_000_000), 180_000));
        assert!(is_warming_up(Some(0), None, 180_000));
        assert_eq!(
            check_warmup(None, None, 180_000),
            Err(EvaluationError::MissingTimestamp)
        );
    }

    #[test]
    fn clock_behind_boot_is_still_warming() {
        assert!(is_warming_up_default(Some(10_000), Some(5_000)));
    }

    #[test]
    fn stuck_at_any_constant() {
        for value in [0.0, 4095.0, 1234.0] {
            let readings = [value; 60];
            assert!(is_sensor_stuck(&readings, 60), "stuck at {}", value);
        }
    }

    #[test]
    fn variation_is_not_stuck() {
        let mut readings = [500.0; 60];
        readings[30] = 501.0;
        assert!(!is_sensor_stuck(&readings, 60));
    }

    #[test]
    fn only_newest_window_counts() {
        let mut readings = alloc::vec![1.0, 2.0, 3.0];
        readings.extend(core::iter::repeat(7.0).take(60));
        assert!(is_sensor_stuck_default(&readings));
    }

    #[test]
    fn too_few_samples_is_not_stuck() {
        let readings = [0.0; 59];
        assert!(!is_sensor_stuck(&readings, 60));
        assert_eq!(
            check_stuck(&readings, 60),
            Err(EvaluationError::InsufficientData { required: 60, available: 59 })
        );
    }

    #[test]
    fn moving_average_edge_cases() {
        assert_eq!(apply_moving_average(&[], 10), 0.0);
        assert_eq!(apply_moving_average(&[], 0), 0.0);
        assert!((apply_moving_average(&[1.0, 2.0, 3.0], 0) - 2.0).abs() < 1e-6);
        assert!((apply_moving_average(&[1.0, 2.0, 3.0], 10) - 2.0).abs() < 1e-6);
        assert!((apply_moving_average_default(&[4.0; 25]) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn health_priority() {
        assert_eq!(sensor_health(true, true), SensorHealth::Error);
        assert_eq!(sensor_health(false, true), SensorHealth::Warning);
        assert_eq!(sensor_health(false, false), SensorHealth::Ok);
    }

    proptest! {
        #[test]
        fn moving_average_is_mean_of_last_ten(
            readings in proptest::collection::vec(-1000.0f32..1000.0, 10..200)
        ) {
            let last: f32 = readings[readings.len() - 10..].iter().sum::<f32>() / 10.0;
            let avg = apply_moving_average(&readings, 10);
            prop_assert!((avg - last).abs() < 1e-4, "{} vs {}", avg, last);
        }

        #[test]
        fn short_input_averages_everything(
            readings in proptest::collection::vec(0.0f32..4095.0, 1..10)
        ) {
            let mean: f32 = readings.iter().sum::<f32>() / readings.len() as f32;
            prop_assert!((apply_moving_average(&readings, 10) - mean).abs() < 1e-2);
        }

        #[test]
        fn fire_risk_is_conjunction(
            co in 0.0f32..1000.0,
            temp in 0.0f32..100.0,
            gas in 0.0f32..100.0,
        ) {
            let t = spec_thresholds();
            let expected = co >= 35.0 && temp >= 50.0 && gas >= 30.0;
            prop_assert_eq!(detect_fire_risk(co, temp, gas, &t), expected);
        }
    }
}
