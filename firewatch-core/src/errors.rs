//! Error Types for Sensor Evaluation
//!
//! ## Design Philosophy
//!
//! The evaluation pipeline runs on every inbound device update, so a flaky or
//! freshly booted sensor must never abort it. Public evaluation functions
//! therefore substitute safe defaults (`0`, `false`, "still warming up")
//! instead of returning errors. The error type below exists for the strict
//! helpers underneath them:
//!
//! - [`RawReading::validate`](crate::estimators::RawReading::validate)
//! - [`check_stuck`](crate::detect::check_stuck)
//! - [`CoThresholds::try_new`](crate::config::CoThresholds::try_new)
//!
//! Callers that want to know *why* a reading collapsed to zero can use those
//! directly.
//!
//! Like the rest of the crate, errors are small, `Copy`, and carry only
//! `&'static str` or numeric context so they can be returned from hot paths
//! on embedded targets without allocation.
//!
//! ## Error Categories
//!
//! ### Invalid Input
//! - `InvalidAdc`: raw sample outside the 12-bit ADC range
//! - `InvalidReference`: clean-air calibration resistance not positive
//! - `InvalidValue`: NaN or infinite circuit parameter
//! - `ThresholdOutOfBounds`: per-device cut-point outside its allowed band
//!
//! ### Insufficient Data
//! - `InsufficientData`: not enough samples to judge a sensor
//! - `MissingTimestamp`: boot or current time not supplied
//!
//! ```rust
//! use firewatch_core::errors::EvaluationError;
//! use firewatch_core::estimators::RawReading;
//!
//! let reading = RawReading::new(5000, 10_000.0);
//! match reading.validate() {
//!     Ok(()) => {}
//!     Err(EvaluationError::InvalidAdc { value }) => assert_eq!(value, 5000),
//!     Err(_) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for strict evaluation helpers
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Evaluation errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EvaluationError {
    /// ADC sample outside `[0, ADC_MAX]`
    #[error("ADC value {value} outside [0, 4095]")]
    InvalidAdc {
        /// The raw sample as reported by the device
        value: i32,
    },

    /// Calibration resistance must be strictly positive
    #[error("Reference resistance {value} must be positive")]
    InvalidReference {
        /// The rejected Ro value
        value: f32,
    },

    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Configured threshold outside the band the device may use
    #[error("Threshold {value} outside allowed range [{min}, {max}]")]
    ThresholdOutOfBounds {
        /// Requested threshold
        value: f32,
        /// Lowest allowed value
        min: f32,
        /// Highest allowed value
        max: f32,
    },

    /// Not enough samples to reach a verdict
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of samples needed
        required: usize,
        /// Actual number of samples available
        available: usize,
    },

    /// Boot time or current time was not supplied
    #[error("Timestamp missing")]
    MissingTimestamp,
}

#[cfg(feature = "defmt")]
impl defmt::Format for EvaluationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidAdc { value } =>
                defmt::write!(fmt, "ADC {} outside [0, 4095]", value),
            Self::InvalidReference { value } =>
                defmt::write!(fmt, "Ro {} not positive", value),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::ThresholdOutOfBounds { value, min, max } =>
                defmt::write!(fmt, "Threshold {} outside [{}, {}]", value, min, max),
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} samples, have {}", required, available),
            Self::MissingTimestamp =>
                defmt::write!(fmt, "Timestamp missing"),
        }
    }
}
