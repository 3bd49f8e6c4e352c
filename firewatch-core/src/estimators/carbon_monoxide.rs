//! MQ-7 carbon monoxide estimator
//!
//! Inverts the datasheet log-log sensitivity curve to get PPM from the
//! Rs/Ro ratio.

use libm::{log10f, powf};

use crate::{
    constants::sensors::{CO_PPM_MAX, MQ7_CURVE_SLOPE, MQ7_CURVE_X, MQ7_CURVE_Y},
    traits::Estimator,
};

use super::{utils::{self, SensorResponse}, RawReading, SensorCurve};

/// Carbon monoxide estimator (PPM)
#[derive(Debug, Clone, Copy)]
pub struct CoEstimator {
    /// Sensitivity curve to invert
    curve: SensorCurve,

    /// Output ceiling, also returned for a saturated sensor
    max_ppm: f32,
}

impl Default for CoEstimator {
    fn default() -> Self {
        Self {
            curve: SensorCurve {
                x: MQ7_CURVE_X,
                y: MQ7_CURVE_Y,
                slope: MQ7_CURVE_SLOPE,
            },
            max_ppm: CO_PPM_MAX,
        }
    }
}

impl CoEstimator {
    /// Estimator with a custom curve, e.g. from a per-batch calibration sheet
    ///
    /// A zero slope cannot be inverted; it falls back to the MQ-7 slope.
    pub fn with_curve(curve: SensorCurve) -> Self {
        let slope = if curve.slope == 0.0 || !curve.slope.is_finite() {
            MQ7_CURVE_SLOPE
        } else {
            curve.slope
        };

        Self {
            curve: SensorCurve { slope, ..curve },
            max_ppm: CO_PPM_MAX,
        }
    }

    /// The curve this estimator inverts
    pub fn curve(&self) -> SensorCurve {
        self.curve
    }

    fn ppm_from_ratio(&self, ratio: f32) -> f32 {
        let exponent = (log10f(ratio) - self.curve.y) / self.curve.slope + self.curve.x;
        let ppm = powf(10.0, exponent);

        if ppm.is_nan() {
            return 0.0;
        }
        ppm.clamp(0.0, self.max_ppm)
    }
}

impl Estimator for CoEstimator {
    fn estimate(&self, reading: &RawReading) -> f32 {
        match utils::sensor_response(reading) {
            Ok(SensorResponse::Ratio(ratio)) => self.ppm_from_ratio(ratio),
            Ok(SensorResponse::Saturated) => {
                log_debug!("MQ-7 saturated at adc={}", reading.adc_value);
                self.max_ppm
            }
            Ok(SensorResponse::NoSignal) => 0.0,
            Err(e) => {
                log_debug!("MQ-7 reading rejected: {}", e);
                0.0
            }
        }
    }

    fn max_value(&self) -> f32 {
        self.max_ppm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_air_ratio_reads_low() {
        // ratio == 10^y puts us exactly on the reference point: 10^x PPM
        let estimator = CoEstimator::default();
        let ppm = estimator.ppm_from_ratio(powf(10.0, MQ7_CURVE_Y));
        assert!((ppm - powf(10.0, MQ7_CURVE_X)).abs() < 0.5);
    }

    #[test]
    fn lower_resistance_means_more_co() {
        let estimator = CoEstimator::default();
        let low = estimator.estimate(&RawReading::new(1000, 10.0));
        let high = estimator.estimate(&RawReading::new(3000, 10.0));
        assert!(high > low, "{} should exceed {}", high, low);
    }

    #[test]
    fn zero_adc_reads_zero() {
        assert_eq!(CoEstimator::default().estimate(&RawReading::new(0, 10.0)), 0.0);
    }

    #[test]
    fn full_scale_reads_max() {
        let estimator = CoEstimator::default();
        assert_eq!(estimator.estimate(&RawReading::new(4095, 10.0)), CO_PPM_MAX);
        assert_eq!(estimator.max_value(), CO_PPM_MAX);
    }

    #[test]
    fn zero_slope_falls_back() {
        let estimator = CoEstimator::with_curve(SensorCurve { x: 2.0, y: 0.5, slope: 0.0 });
        assert_eq!(estimator.curve().slope, MQ7_CURVE_SLOPE);
        assert_eq!(estimator.curve().x, 2.0);
    }
}
