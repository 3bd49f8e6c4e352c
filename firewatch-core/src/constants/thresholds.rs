//! Classification Thresholds
//!
//! Cut-points for every severity scale in the pipeline. CO cut-points are
//! per-device defaults that an administrator may tune inside the `*_MIN` /
//! `*_MAX` bands below; AQI and the dashboard bands are fixed.

// ===== CARBON MONOXIDE (PPM) =====

/// CO warning level (PPM).
///
/// Source: OSHA 8-hour exposure limit
pub const CO_WARNING_PPM: f32 = 35.0;

/// CO danger level (PPM).
pub const CO_DANGER_PPM: f32 = 100.0;

/// CO critical level (PPM). Evacuation territory.
pub const CO_CRITICAL_PPM: f32 = 400.0;

/// Lower bound for a per-device warning threshold (PPM).
pub const CO_WARNING_MIN_PPM: f32 = 10.0;
/// Upper bound for a per-device warning threshold (PPM).
pub const CO_WARNING_MAX_PPM: f32 = 50.0;

/// Lower bound for a per-device danger threshold (PPM).
pub const CO_DANGER_MIN_PPM: f32 = 50.0;
/// Upper bound for a per-device danger threshold (PPM).
pub const CO_DANGER_MAX_PPM: f32 = 200.0;

/// Lower bound for a per-device critical threshold (PPM).
pub const CO_CRITICAL_MIN_PPM: f32 = 200.0;
/// Upper bound for a per-device critical threshold (PPM).
pub const CO_CRITICAL_MAX_PPM: f32 = 800.0;

// ===== AIR QUALITY INDEX =====

/// Highest AQI still considered good (inclusive).
pub const AQI_GOOD_MAX: f32 = 50.0;

/// Highest AQI still considered moderate (inclusive).
pub const AQI_MODERATE_MAX: f32 = 100.0;

/// Highest AQI still considered unhealthy for sensitive groups (inclusive).
pub const AQI_UNHEALTHY_SENSITIVE_MAX: f32 = 150.0;

// ===== PRIMARY ALARM =====

/// Gas alarm threshold used when a device has none configured (percent).
///
/// Source: device firmware `DEFAULT_THRESHOLD`
pub const DEFAULT_GAS_ALARM_PCT: f32 = 40.0;

/// Temperature alarm threshold used when a device has none configured (°C).
///
/// Source: device firmware `TEMP_ALARM_THRESHOLD`
pub const DEFAULT_TEMP_ALARM_C: f32 = 60.0;

/// Distance below the alarm thresholds at which gas and temperature count
/// towards fire risk.
pub const FIRE_RISK_MARGIN: f32 = 10.0;

/// Fire-risk temperature threshold when no alarm threshold is known (°C).
pub const FIRE_RISK_TEMP_C: f32 = DEFAULT_TEMP_ALARM_C - FIRE_RISK_MARGIN;

/// Fire-risk gas threshold when no alarm threshold is known (percent).
pub const FIRE_RISK_GAS_PCT: f32 = DEFAULT_GAS_ALARM_PCT - FIRE_RISK_MARGIN;

// ===== DASHBOARD BANDS =====

/// Inclusive upper edges of the safe/low/medium/high/danger gas bands (percent).
/// Anything above the last edge is critical.
pub const GAS_BAND_EDGES_PCT: [f32; 5] = [20.0, 35.0, 50.0, 70.0, 85.0];

/// Inclusive upper edges of the safe/low/medium/high/danger temperature bands (°C).
pub const TEMP_BAND_EDGES_C: [f32; 5] = [45.0, 52.0, 60.0, 68.0, 75.0];
