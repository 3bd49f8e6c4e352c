//! Sample-Window Sizes
//!
//! Window lengths used by the anomaly detector. Devices sample once per
//! second, so sample counts read as seconds.

/// Identical samples required before a sensor is declared stuck.
///
/// One minute of a perfectly flat signal. Real MQ sensors always show some
/// ADC noise, so a flat minute means a wiring fault or a frozen reading.
pub const STUCK_SENSOR_MIN_READINGS: usize = 60;

/// Default moving-average window (samples).
pub const MOVING_AVERAGE_WINDOW: usize = 10;

/// Capacity of a per-device ADC history buffer (samples).
///
/// Large enough for one stuck-sensor window plus headroom for smoothing.
pub const ADC_HISTORY_CAPACITY: usize = 100;
