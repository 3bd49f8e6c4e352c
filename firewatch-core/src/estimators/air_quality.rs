//! MQ-135 air quality estimator
//!
//! Linear proxy from the Rs/Ro ratio to a 0-500 index. Clean air sits at a
//! ratio of about 1.0 (index 0); a ratio of 0.2 already saturates the scale.

use libm::roundf;

use crate::{
    constants::sensors::{AQI_MAX, AQI_RATIO_SCALE},
    traits::Estimator,
};

use super::{utils::{self, SensorResponse}, RawReading};

/// Synthetic air quality index estimator
#[derive(Debug, Clone, Copy)]
pub struct AqiEstimator {
    /// Index units per unit of `(1 - ratio)`
    scale: f32,

    /// Output ceiling, also returned for a saturated sensor
    max_index: f32,
}

impl Default for AqiEstimator {
    fn default() -> Self {
        Self {
            scale: AQI_RATIO_SCALE,
            max_index: AQI_MAX,
        }
    }
}

impl AqiEstimator {
    fn index_from_ratio(&self, ratio: f32) -> f32 {
        let aqi = roundf((1.0 - ratio.min(1.0)) * self.scale);
        aqi.clamp(0.0, self.max_index)
    }
}

impl Estimator for AqiEstimator {
    fn estimate(&self, reading: &RawReading) -> f32 {
        match utils::sensor_response(reading) {
            Ok(SensorResponse::Ratio(ratio)) => self.index_from_ratio(ratio),
            Ok(SensorResponse::Saturated) => {
                log_debug!("MQ-135 saturated at adc={}", reading.adc_value);
                self.max_index
            }
            Ok(SensorResponse::NoSignal) => 0.0,
            Err(e) => {
                log_debug!("MQ-135 reading rejected: {}", e);
                0.0
            }
        }
    }

    fn max_value(&self) -> f32 {
        self.max_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_air_is_zero() {
        let estimator = AqiEstimator::default();
        assert_eq!(estimator.index_from_ratio(1.0), 0.0);
        assert_eq!(estimator.index_from_ratio(3.5), 0.0);
    }

    #[test]
    fn linear_between_clean_and_saturated() {
        let estimator = AqiEstimator::default();
        assert_eq!(estimator.index_from_ratio(0.8), 125.0);
        assert_eq!(estimator.index_from_ratio(0.5), 313.0); // 312.5 rounds up
        assert_eq!(estimator.index_from_ratio(0.1), AQI_MAX);
    }

    #[test]
    fn saturated_sensor_reads_max() {
        let estimator = AqiEstimator::default();
        assert_eq!(estimator.estimate(&RawReading::new(4095, 10.0)), AQI_MAX);
    }

    #[test]
    fn result_is_whole_number() {
        let estimator = AqiEstimator::default();
        for adc in (0..=4095).step_by(97) {
            let aqi = estimator.estimate(&RawReading::new(adc, 12.5));
            assert_eq!(aqi, roundf(aqi));
        }
    }
}
