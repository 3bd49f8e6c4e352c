//! Concentration Estimators for MQ-Series Gas Sensors
//!
//! ## Overview
//!
//! MQ sensors are heated metal-oxide resistors. Reducing gases lower the
//! element's resistance `Rs`; the device reads it indirectly through a voltage
//! divider with a fixed load resistor `RL` and reports the raw 12-bit ADC
//! sample. This module turns that sample, together with the clean-air
//! resistance `Ro` measured during calibration, into a concentration.
//!
//! ## Signal Chain
//!
//! ```text
//!   Vcc ──[ Rs ]──┬──[ RL ]── GND
//!                 │
//!               Vout ──► ADC (0..4095)
//!
//! Vout = adc / 4095 × Vcc
//! Rs   = (Vcc × RL / Vout) − RL
//! ratio = Rs / Ro
//! ```
//!
//! Two degenerate cases short-circuit the chain:
//!
//! - `Vout <= 0`: no signal at all, the estimate is `0`.
//! - `Rs <= 0`: the element conducts as hard as the divider allows. The
//!   sensor is saturated, which is a meaningful "maximum reading" rather
//!   than a fault, so the estimate is the top of the output range.
//!
//! ## Sensors
//!
//! ### MQ-7 (carbon monoxide)
//! The datasheet sensitivity curve is close to a straight line in log-log
//! space. With reference point `(x, y)` and slope `m`:
//!
//! ```text
//! log10(ratio) = m × (log10(ppm) − x) + y
//! ppm = 10^((log10(ratio) − y) / m + x)
//! ```
//!
//! clamped to `[0, 1000]` PPM.
//!
//! ### MQ-135 (air quality)
//! The MQ-135 responds to a mix of gases with no single curve, so the AQI
//! here is a linear proxy: `round((1 − min(ratio, 1)) × 625)` clamped to
//! `[0, 500]`. It is *not* the EPA breakpoint formula and should only be
//! compared against other readings from the same device.
//!
//! ## Invalid Input Policy
//!
//! Sensors report transient garbage. An ADC value outside `[0, 4095]` or a
//! non-positive `Ro` yields `0` instead of an error, so one bad sample never
//! stops the alerting pipeline. [`RawReading::validate`] exposes the strict
//! check for callers that want the reason.
//!
//! ## Usage Example
//!
//! ```rust
//! use firewatch_core::estimators::{calculate_co_ppm, calculate_aqi};
//!
//! let ppm = calculate_co_ppm(2048, 10.0);
//! assert!((0.0..=1000.0).contains(&ppm));
//!
//! // Out-of-range samples collapse to zero
//! assert_eq!(calculate_aqi(-1, 10.0), 0.0);
//! assert_eq!(calculate_aqi(2048, 0.0), 0.0);
//! ```

mod carbon_monoxide;
mod air_quality;
mod utils;

pub use carbon_monoxide::CoEstimator;
pub use air_quality::AqiEstimator;
pub use utils::SensorResponse;

use crate::{
    constants::sensors::{
        ADC_MAX, DEFAULT_LOAD_RESISTANCE_KOHM, DEFAULT_SUPPLY_VOLTAGE,
    },
    errors::{EvaluationError, EvaluationResult},
    traits::{Estimator, Validatable},
};

/// One instantaneous analog sample plus the parameters needed to interpret it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    /// Raw ADC sample, valid in `[0, 4095]`
    pub adc_value: i32,

    /// Clean-air sensor resistance Ro from calibration
    pub reference_resistance: f32,

    /// Divider load resistor RL (kΩ)
    pub load_resistance_kohm: f32,

    /// ADC reference / supply voltage (V)
    pub supply_voltage: f32,
}

impl RawReading {
    /// Reading with the standard ESP32 circuit (RL = 10 kΩ, 3.3 V)
    pub fn new(adc_value: i32, reference_resistance: f32) -> Self {
        Self {
            adc_value,
            reference_resistance,
            load_resistance_kohm: DEFAULT_LOAD_RESISTANCE_KOHM,
            supply_voltage: DEFAULT_SUPPLY_VOLTAGE,
        }
    }

    /// Override the divider parameters
    pub fn with_circuit(mut self, load_resistance_kohm: f32, supply_voltage: f32) -> Self {
        self.load_resistance_kohm = load_resistance_kohm;
        self.supply_voltage = supply_voltage;
        self
    }

    /// Strict input check used by the estimators before any arithmetic
    pub fn validate(&self) -> EvaluationResult<()> {
        if !(0..=ADC_MAX).contains(&self.adc_value) {
            return Err(EvaluationError::InvalidAdc {
                value: self.adc_value,
            });
        }

        // `!(x > 0.0)` also rejects NaN
        if !(self.reference_resistance > 0.0) {
            return Err(EvaluationError::InvalidReference {
                value: self.reference_resistance,
            });
        }

        if !self.reference_resistance.is_valid()
            || !self.load_resistance_kohm.is_valid()
            || !self.supply_voltage.is_valid()
        {
            return Err(EvaluationError::InvalidValue);
        }

        Ok(())
    }
}

/// Straight-line fit of a sensitivity curve in log-log space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorCurve {
    /// log10 of the concentration at the reference point
    pub x: f32,
    /// log10 of Rs/Ro at the reference point
    pub y: f32,
    /// Slope of log10(Rs/Ro) against log10(concentration)
    pub slope: f32,
}

/// CO concentration (PPM) for the standard circuit
pub fn calculate_co_ppm(adc_value: i32, reference_resistance: f32) -> f32 {
    CoEstimator::default().estimate(&RawReading::new(adc_value, reference_resistance))
}

/// CO concentration (PPM) with explicit load resistance (kΩ) and reference voltage
pub fn calculate_co_ppm_with(
    adc_value: i32,
    reference_resistance: f32,
    load_resistance_kohm: f32,
    supply_voltage: f32,
) -> f32 {
    let reading = RawReading::new(adc_value, reference_resistance)
        .with_circuit(load_resistance_kohm, supply_voltage);
    CoEstimator::default().estimate(&reading)
}

/// Synthetic air quality index for the standard circuit
pub fn calculate_aqi(adc_value: i32, reference_resistance: f32) -> f32 {
    AqiEstimator::default().estimate(&RawReading::new(adc_value, reference_resistance))
}

/// Synthetic air quality index with explicit load resistance (kΩ) and reference voltage
pub fn calculate_aqi_with(
    adc_value: i32,
    reference_resistance: f32,
    load_resistance_kohm: f32,
    supply_voltage: f32,
) -> f32 {
    let reading = RawReading::new(adc_value, reference_resistance)
        .with_circuit(load_resistance_kohm, supply_voltage);
    AqiEstimator::default().estimate(&reading)
}
