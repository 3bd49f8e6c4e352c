//! Per-Device Threshold Configuration
//!
//! ## Overview
//!
//! Every threshold that influences an evaluation is gathered into one
//! [`ThresholdSet`] value, built once per device update:
//!
//! ```text
//! ThresholdSet
//! ├── co: CoThresholds          warning / danger / critical PPM (tunable, bounded)
//! ├── gas_alarm_pct             primary gas alarm threshold (percent)
//! ├── temp_alarm_c              primary temperature alarm threshold (°C)
//! └── fire_risk()               FireRiskThresholds derived from the above
//! ```
//!
//! AQI boundaries are fixed constants and deliberately not part of the set.
//!
//! ## Defaulting Rules
//!
//! Stored device commands may be missing or zero. Both mean "use the
//! default", matching how older device documents were written:
//!
//! | Field | Default | Allowed band |
//! |-------|---------|--------------|
//! | CO warning | 35 PPM | 10..=50 |
//! | CO danger | 100 PPM | 50..=200 |
//! | CO critical | 400 PPM | 200..=800 |
//! | Gas alarm | 40 % | - |
//! | Temperature alarm | 60 °C | - |
//!
//! Out-of-band CO values are clamped into their band by
//! [`CoThresholds::new`], or rejected by [`CoThresholds::try_new`].
//!
//! ## Fire-Risk Coupling
//!
//! Fire risk uses "warning" levels for gas and temperature that sit a fixed
//! [`FIRE_RISK_MARGIN`] below the alarm thresholds. Raising a device's
//! temperature alarm therefore also raises its fire-risk temperature. The
//! coupling lives in one place, [`FireRiskThresholds::derive`].
//!
//! ```rust
//! use firewatch_core::config::{ThresholdSet, FireRiskThresholds};
//!
//! let mut set = ThresholdSet::default();
//! set.temp_alarm_c = 70.0;
//!
//! let fire = set.fire_risk();
//! assert_eq!(fire.temp_warning, 60.0);
//! assert_eq!(fire.gas_warning, 30.0);
//! assert_eq!(fire.co_warning, 35.0);
//! ```

use crate::{
    constants::{
        sensors::DEFAULT_REFERENCE_RESISTANCE_KOHM,
        sensors::OHMS_PER_KOHM,
        thresholds::{
            CO_CRITICAL_MAX_PPM, CO_CRITICAL_MIN_PPM, CO_CRITICAL_PPM, CO_DANGER_MAX_PPM,
            CO_DANGER_MIN_PPM, CO_DANGER_PPM, CO_WARNING_MAX_PPM, CO_WARNING_MIN_PPM,
            CO_WARNING_PPM, DEFAULT_GAS_ALARM_PCT, DEFAULT_TEMP_ALARM_C, FIRE_RISK_GAS_PCT,
            FIRE_RISK_MARGIN, FIRE_RISK_TEMP_C,
        },
    },
    errors::{EvaluationError, EvaluationResult},
};

/// CO classification cut-points (PPM)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CoThresholds {
    /// At or above: warning
    pub warning: f32,
    /// At or above: danger
    pub danger: f32,
    /// At or above: critical
    pub critical: f32,
}

impl Default for CoThresholds {
    fn default() -> Self {
        Self {
            warning: CO_WARNING_PPM,
            danger: CO_DANGER_PPM,
            critical: CO_CRITICAL_PPM,
        }
    }
}

impl CoThresholds {
    /// Build from requested values, clamping each into its allowed band
    ///
    /// Non-finite values fall back to the default for that level.
    pub fn new(warning: f32, danger: f32, critical: f32) -> Self {
        Self {
            warning: clamp_or(warning, CO_WARNING_MIN_PPM, CO_WARNING_MAX_PPM, CO_WARNING_PPM),
            danger: clamp_or(danger, CO_DANGER_MIN_PPM, CO_DANGER_MAX_PPM, CO_DANGER_PPM),
            critical: clamp_or(critical, CO_CRITICAL_MIN_PPM, CO_CRITICAL_MAX_PPM, CO_CRITICAL_PPM),
        }
    }

    /// Build from requested values, rejecting anything outside its band
    pub fn try_new(warning: f32, danger: f32, critical: f32) -> EvaluationResult<Self> {
        Ok(Self {
            warning: check_band(warning, CO_WARNING_MIN_PPM, CO_WARNING_MAX_PPM)?,
            danger: check_band(danger, CO_DANGER_MIN_PPM, CO_DANGER_MAX_PPM)?,
            critical: check_band(critical, CO_CRITICAL_MIN_PPM, CO_CRITICAL_MAX_PPM)?,
        })
    }

    /// Build from optional stored overrides; missing or zero means default
    pub fn from_overrides(warning: Option<f32>, danger: Option<f32>, critical: Option<f32>) -> Self {
        Self::new(
            or_default(warning, CO_WARNING_PPM),
            or_default(danger, CO_DANGER_PPM),
            or_default(critical, CO_CRITICAL_PPM),
        )
    }
}

/// All thresholds that apply to one device evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ThresholdSet {
    /// CO classification cut-points
    pub co: CoThresholds,

    /// Primary gas alarm threshold (percent)
    pub gas_alarm_pct: f32,

    /// Primary temperature alarm threshold (°C)
    pub temp_alarm_c: f32,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            co: CoThresholds::default(),
            gas_alarm_pct: DEFAULT_GAS_ALARM_PCT,
            temp_alarm_c: DEFAULT_TEMP_ALARM_C,
        }
    }
}

impl ThresholdSet {
    /// Build from optional stored values; missing or zero means default
    pub fn from_overrides(co: CoThresholds, gas_alarm_pct: Option<f32>, temp_alarm_c: Option<f32>) -> Self {
        Self {
            co,
            gas_alarm_pct: or_default(gas_alarm_pct, DEFAULT_GAS_ALARM_PCT),
            temp_alarm_c: or_default(temp_alarm_c, DEFAULT_TEMP_ALARM_C),
        }
    }

    /// Fire-risk thresholds derived from this set
    pub fn fire_risk(&self) -> FireRiskThresholds {
        FireRiskThresholds::derive(self)
    }
}

/// Warning levels that must all be met for fire risk
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FireRiskThresholds {
    /// CO at or above (PPM)
    pub co_warning: f32,
    /// Temperature at or above (°C)
    pub temp_warning: f32,
    /// Gas/smoke at or above (percent)
    pub gas_warning: f32,
}

impl Default for FireRiskThresholds {
    fn default() -> Self {
        Self {
            co_warning: CO_WARNING_PPM,
            temp_warning: FIRE_RISK_TEMP_C,
            gas_warning: FIRE_RISK_GAS_PCT,
        }
    }
}

impl FireRiskThresholds {
    /// CO warning as configured; gas and temperature [`FIRE_RISK_MARGIN`]
    /// below their alarm thresholds
    pub fn derive(set: &ThresholdSet) -> Self {
        Self {
            co_warning: set.co.warning,
            temp_warning: set.temp_alarm_c - FIRE_RISK_MARGIN,
            gas_warning: set.gas_alarm_pct - FIRE_RISK_MARGIN,
        }
    }
}

/// Clean-air reference resistances from the last calibration (kΩ)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Calibration {
    /// MQ-7 Ro
    pub co_ro_kohm: f32,
    /// MQ-135 Ro
    pub aqi_ro_kohm: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            co_ro_kohm: DEFAULT_REFERENCE_RESISTANCE_KOHM,
            aqi_ro_kohm: DEFAULT_REFERENCE_RESISTANCE_KOHM,
        }
    }
}

impl Calibration {
    /// From Ro values stored in ohms, as device documents keep them
    pub fn from_ohms(co_ro_ohms: f32, aqi_ro_ohms: f32) -> Self {
        Self {
            co_ro_kohm: co_ro_ohms / OHMS_PER_KOHM,
            aqi_ro_kohm: aqi_ro_ohms / OHMS_PER_KOHM,
        }
    }
}

fn or_default(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => default,
    }
}

fn clamp_or(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}

fn check_band(value: f32, min: f32, max: f32) -> EvaluationResult<f32> {
    if !value.is_finite() {
        return Err(EvaluationError::InvalidValue);
    }
    if value < min || value > max {
        return Err(EvaluationError::ThresholdOutOfBounds { value, min, max });
    }
    Ok(value)
}
