//! Severity Classification
//!
//! ## Overview
//!
//! Maps concentrations and raw percentages onto ordered severity scales.
//! Every scale is a monotonic step function of its cut-points.
//!
//! | Scale | Levels | Boundary rule |
//! |-------|--------|---------------|
//! | CO (PPM) | normal < warning < danger < critical | `>=` : a value on a cut-point belongs to the **higher** band |
//! | AQI | good < moderate < unhealthy_sensitive < unhealthy | `<=` : a value on a cut-point belongs to the **lower** band |
//! | Gas % / °C | safe < low < medium < high < danger < critical | `<=` : lower band |
//!
//! The CO and AQI rules disagree. Stored history and deployed dashboards
//! depend on exactly these boundaries, so both are reproduced as-is: CO
//! alarms trip at the cut-point, AQI only above it.
//!
//! The six-band gas and temperature scales drive dashboard colouring only;
//! alarm decisions never consult them.
//!
//! ```rust
//! use firewatch_core::classify::{co_status, aqi_status, CoStatus, AqiStatus};
//! use firewatch_core::config::CoThresholds;
//!
//! let thresholds = CoThresholds::default();
//! assert_eq!(co_status(35.0, &thresholds), CoStatus::Warning);
//! assert_eq!(aqi_status(50.0), AqiStatus::Good);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::{
    config::CoThresholds,
    constants::thresholds::{
        AQI_GOOD_MAX, AQI_MODERATE_MAX, AQI_UNHEALTHY_SENSITIVE_MAX, GAS_BAND_EDGES_PCT,
        TEMP_BAND_EDGES_C,
    },
    traits::Classifier,
};

/// Carbon monoxide severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum CoStatus {
    /// Below the warning threshold
    #[default]
    Normal,
    /// Prolonged exposure causes symptoms
    Warning,
    /// Ventilate immediately
    Danger,
    /// Evacuate
    Critical,
}

impl CoStatus {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            CoStatus::Normal => "normal",
            CoStatus::Warning => "warning",
            CoStatus::Danger => "danger",
            CoStatus::Critical => "critical",
        }
    }

    /// Anything above normal
    pub fn is_alert(&self) -> bool {
        *self > CoStatus::Normal
    }
}

/// Air quality severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum AqiStatus {
    /// AQI up to 50
    #[default]
    Good,
    /// AQI up to 100
    Moderate,
    /// AQI up to 150
    UnhealthySensitive,
    /// AQI above 150
    Unhealthy,
}

impl AqiStatus {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            AqiStatus::Good => "good",
            AqiStatus::Moderate => "moderate",
            AqiStatus::UnhealthySensitive => "unhealthy_sensitive",
            AqiStatus::Unhealthy => "unhealthy",
        }
    }

    /// Unhealthy for at least sensitive groups
    pub fn is_alert(&self) -> bool {
        *self >= AqiStatus::UnhealthySensitive
    }
}

/// Six-band dashboard scale for gas percentage and temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum SeverityBand {
    /// At or below the first edge
    Safe,
    /// Second band
    Low,
    /// Third band
    Medium,
    /// Fourth band
    High,
    /// At or below the last edge
    Danger,
    /// Above every edge
    Critical,
}

impl SeverityBand {
    const ORDERED: [SeverityBand; 6] = [
        SeverityBand::Safe,
        SeverityBand::Low,
        SeverityBand::Medium,
        SeverityBand::High,
        SeverityBand::Danger,
        SeverityBand::Critical,
    ];

    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::Safe => "safe",
            SeverityBand::Low => "low",
            SeverityBand::Medium => "medium",
            SeverityBand::High => "high",
            SeverityBand::Danger => "danger",
            SeverityBand::Critical => "critical",
        }
    }

    /// Band for `value` given five inclusive upper edges
    fn from_edges(value: f32, edges: &[f32; 5]) -> Self {
        edges
            .iter()
            .position(|edge| value <= *edge)
            .map(|idx| Self::ORDERED[idx])
            .unwrap_or(SeverityBand::Critical)
    }
}

/// A status string that matched no level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownLevel;

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown severity level")
    }
}

macro_rules! wire_name_impls {
    ($ty:ty, [$($variant:path),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownLevel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == $variant.as_str() {
                        return Ok($variant);
                    }
                )+
                Err(UnknownLevel)
            }
        }
    };
}

wire_name_impls!(CoStatus, [CoStatus::Normal, CoStatus::Warning, CoStatus::Danger, CoStatus::Critical]);
wire_name_impls!(AqiStatus, [AqiStatus::Good, AqiStatus::Moderate, AqiStatus::UnhealthySensitive, AqiStatus::Unhealthy]);
wire_name_impls!(SeverityBand, [
    SeverityBand::Safe, SeverityBand::Low, SeverityBand::Medium,
    SeverityBand::High, SeverityBand::Danger, SeverityBand::Critical
]);

/// Classify a CO concentration; cut-points belong to the higher band
pub fn co_status(ppm: f32, thresholds: &CoThresholds) -> CoStatus {
    if ppm >= thresholds.critical {
        CoStatus::Critical
    } else if ppm >= thresholds.danger {
        CoStatus::Danger
    } else if ppm >= thresholds.warning {
        CoStatus::Warning
    } else {
        CoStatus::Normal
    }
}

/// Classify an AQI value; cut-points belong to the lower band
pub fn aqi_status(aqi: f32) -> AqiStatus {
    if aqi <= AQI_GOOD_MAX {
        AqiStatus::Good
    } else if aqi <= AQI_MODERATE_MAX {
        AqiStatus::Moderate
    } else if aqi <= AQI_UNHEALTHY_SENSITIVE_MAX {
        AqiStatus::UnhealthySensitive
    } else {
        AqiStatus::Unhealthy
    }
}

/// Dashboard band for a gas/smoke percentage
pub fn gas_level(percent: f32) -> SeverityBand {
    SeverityBand::from_edges(percent, &GAS_BAND_EDGES_PCT)
}

/// Dashboard band for a temperature
pub fn temperature_level(celsius: f32) -> SeverityBand {
    SeverityBand::from_edges(celsius, &TEMP_BAND_EDGES_C)
}

/// [`Classifier`] wrapper around [`co_status`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CoClassifier {
    /// Cut-points to classify against
    pub thresholds: CoThresholds,
}

impl Classifier for CoClassifier {
    type Level = CoStatus;

    fn classify(&self, value: f32) -> CoStatus {
        co_status(value, &self.thresholds)
    }
}

/// [`Classifier`] wrapper around [`aqi_status`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AqiClassifier;

impl Classifier for AqiClassifier {
    type Level = AqiStatus;

    fn classify(&self, value: f32) -> AqiStatus {
        aqi_status(value)
    }
}
