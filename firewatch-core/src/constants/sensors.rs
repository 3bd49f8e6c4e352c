//! Sensor Specifications and Circuit Parameters
//!
//! Values for the ESP32 12-bit ADC front end and the two Hanwei MQ-series
//! metal-oxide sensors the devices carry (MQ-7 for carbon monoxide, MQ-135
//! for general air quality).

// ===== ADC FRONT END =====

/// Maximum raw value of the ESP32 12-bit ADC.
///
/// Samples outside `[0, ADC_MAX]` are treated as transport garbage.
pub const ADC_MAX: i32 = 4095;

/// ADC reference / sensor supply voltage (V).
///
/// Source: ESP32 3.3 V rail
pub const DEFAULT_SUPPLY_VOLTAGE: f32 = 3.3;

/// Load resistor in the sensor divider (kΩ).
///
/// Source: MQ-series breakout boards ship with a 10 kΩ RL
pub const DEFAULT_LOAD_RESISTANCE_KOHM: f32 = 10.0;

/// Clean-air reference resistance used until a device is calibrated (kΩ).
///
/// Must share the unit of the load resistor, since Rs is derived from it.
/// Device documents store Ro in ohms (`coRo: 10000`), see [`OHMS_PER_KOHM`].
pub const DEFAULT_REFERENCE_RESISTANCE_KOHM: f32 = 10.0;

/// Conversion factor for Ro values stored in ohms.
pub const OHMS_PER_KOHM: f32 = 1000.0;

// ===== MQ-7 (CARBON MONOXIDE) =====

/// Upper end of the MQ-7 measurable range (PPM).
///
/// Also reported for a saturated sensor (Rs <= 0).
pub const CO_PPM_MAX: f32 = 1000.0;

/// MQ-7 Rs/Ro curve: log10(PPM) of the reference point.
///
/// Source: MQ-7 datasheet sensitivity curve, straight-line fit in log-log space
pub const MQ7_CURVE_X: f32 = 2.3;

/// MQ-7 Rs/Ro curve: log10(Rs/Ro) at the reference point.
pub const MQ7_CURVE_Y: f32 = 0.72;

/// MQ-7 Rs/Ro curve slope in log-log space.
pub const MQ7_CURVE_SLOPE: f32 = -0.34;

// ===== MQ-135 (AIR QUALITY) =====

/// Upper end of the synthetic AQI scale.
pub const AQI_MAX: f32 = 500.0;

/// Linear scale factor from `(1 - Rs/Ro)` to AQI.
///
/// Clean air (ratio ~1.0) maps to ~0, heavy pollution (ratio ~0.2) to 500.
/// This is a simplified proxy, not the EPA AQI breakpoint formula.
pub const AQI_RATIO_SCALE: f32 = 625.0;
