//! Core traits
//!
//! Seams between the pipeline stages. Keep them small - every implementation
//! in this crate is a plain value type.

use crate::estimators::RawReading;
use crate::time::Timestamp;

/// Converts a raw analog sample into a physical concentration
pub trait Estimator {
    /// Estimate the concentration for one reading
    ///
    /// Never fails: invalid readings produce `0.0`, saturated sensors produce
    /// [`Estimator::max_value`].
    fn estimate(&self, reading: &RawReading) -> f32;

    /// Upper end of the output range
    fn max_value(&self) -> f32;
}

/// Maps a concentration onto an ordered severity scale
pub trait Classifier {
    /// Severity scale produced by this classifier
    type Level: Copy + Ord;

    /// Classify one value
    fn classify(&self, value: f32) -> Self::Level;
}

/// Records that carry a timestamp and can be range-filtered
pub trait Timestamped {
    /// Milliseconds since the Unix epoch
    fn timestamp(&self) -> Timestamp;
}

impl Timestamped for Timestamp {
    fn timestamp(&self) -> Timestamp {
        *self
    }
}

/// Trait for values that can be checked for numeric sanity
pub trait Validatable {
    /// Check if the value is a usable number (not NaN or infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
