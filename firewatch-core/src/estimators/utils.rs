//! Shared divider arithmetic for the MQ estimators

use crate::{
    constants::sensors::ADC_MAX,
    errors::EvaluationResult,
};

use super::RawReading;

/// What the divider tells us about the sensing element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorResponse {
    /// Output voltage at or below zero
    NoSignal,
    /// Rs computed as zero or negative
    Saturated,
    /// Rs / Ro, strictly positive
    Ratio(f32),
}

/// Run the divider equations for a validated reading
pub fn sensor_response(reading: &RawReading) -> EvaluationResult<SensorResponse> {
    reading.validate()?;

    let voltage = (reading.adc_value as f32 / ADC_MAX as f32) * reading.supply_voltage;
    if voltage <= 0.0 {
        return Ok(SensorResponse::NoSignal);
    }

    let load = reading.load_resistance_kohm;
    let rs = (reading.supply_voltage * load / voltage) - load;
    if rs <= 0.0 {
        return Ok(SensorResponse::Saturated);
    }

    Ok(SensorResponse::Ratio(rs / reading.reference_resistance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvaluationError;

    #[test]
    fn zero_adc_is_no_signal() {
        let response = sensor_response(&RawReading::new(0, 10.0));
        assert_eq!(response, Ok(SensorResponse::NoSignal));
    }

    #[test]
    fn mid_scale_ratio() {
        // Half scale: Vout = Vcc/2, so Rs == RL == 10 kΩ
        let reading = RawReading::new(2048, 10.0);
        match sensor_response(&reading) {
            Ok(SensorResponse::Ratio(ratio)) => assert!((ratio - 1.0).abs() < 1e-3),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn negative_load_saturates() {
        let reading = RawReading::new(1000, 10.0).with_circuit(-10.0, 3.3);
        assert_eq!(sensor_response(&reading), Ok(SensorResponse::Saturated));
    }

    #[test]
    fn invalid_reading_propagates() {
        let reading = RawReading::new(5000, 10.0);
        assert_eq!(
            sensor_response(&reading),
            Err(EvaluationError::InvalidAdc { value: 5000 })
        );
    }
}
