//! Device payloads and stored device documents
//!
//! Threshold precedence when building the per-update [`ThresholdSet`]:
//!
//! | Value | First | Then | Default |
//! |-------|-------|------|---------|
//! | gas alarm (%) | stored `current.threshold` | payload `threshold` | 40 |
//! | temperature alarm (°C) | stored `current.tempThreshold` | payload `tempThreshold` | 60 |
//! | CO cut-points | `commands.co*Threshold` | | 35 / 100 / 400 |
//!
//! A stored value of `0` counts as unset for the CO cut-points, matching the
//! documents written by older backends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use firewatch_core::{
    constants::{
        sensors::OHMS_PER_KOHM,
        thresholds::{
            CO_CRITICAL_MAX_PPM, CO_CRITICAL_MIN_PPM, CO_DANGER_MAX_PPM, CO_DANGER_MIN_PPM,
            CO_WARNING_MAX_PPM, CO_WARNING_MIN_PPM, DEFAULT_GAS_ALARM_PCT, DEFAULT_TEMP_ALARM_C,
        },
        DEFAULT_REFERENCE_RESISTANCE_KOHM,
    },
    detect::SensorHealth,
    AlertOrchestrator, AqiStatus, Calibration, CoStatus, CoThresholds, DeviceState, Evaluation,
    SensorSnapshot, ThresholdSet,
};

use crate::SchemaError;

/// Body of a device data POST
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePayload {
    pub gas: Option<f32>,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub voltage: Option<f32>,
    /// Gas alarm threshold the device is currently using (%)
    pub threshold: Option<f32>,
    pub temp_threshold: Option<f32>,
    pub alarm: Option<bool>,
    pub temp_warning: Option<String>,
    pub siren_enabled: Option<bool>,
    /// Free heap on the device (bytes)
    pub heap: Option<u32>,
    pub co_ppm: Option<f32>,
    pub co_raw: Option<f32>,
    pub co_status: Option<String>,
    pub aqi: Option<f32>,
    pub aqi_raw: Option<f32>,
    pub aqi_status: Option<String>,
    pub sensor_warmup: Option<bool>,
    pub boot_time_ms: Option<u64>,
    pub adc_history: Option<Vec<f32>>,
}

impl DevicePayload {
    /// Device-reported CO status, if any
    pub fn co_status(&self) -> Result<Option<CoStatus>, SchemaError> {
        parse_status(self.co_status.as_deref())
    }

    /// Device-reported AQI status, if any
    pub fn aqi_status(&self) -> Result<Option<AqiStatus>, SchemaError> {
        parse_status(self.aqi_status.as_deref())
    }

    /// Core view of this update
    ///
    /// Unknown status strings are dropped so the status gets recomputed.
    pub fn to_snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            gas: self.gas,
            temperature: self.temperature,
            humidity: self.humidity,
            alarm: self.alarm.unwrap_or(false),
            co_ppm: self.co_ppm,
            co_raw: self.co_raw.map(adc_sample),
            co_status: lenient(self.co_status()),
            aqi: self.aqi,
            aqi_raw: self.aqi_raw.map(adc_sample),
            aqi_status: lenient(self.aqi_status()),
            sensor_warmup: self.sensor_warmup.unwrap_or(false),
            boot_time_ms: self.boot_time_ms,
            adc_history: self.adc_history.clone().unwrap_or_default(),
        }
    }
}

/// Parse a device POST body
pub fn parse_payload(body: &str) -> Result<DevicePayload, SchemaError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(SchemaError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

fn parse_status<T: core::str::FromStr>(raw: Option<&str>) -> Result<Option<T>, SchemaError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| SchemaError::UnknownStatus(s.to_string())),
    }
}

fn lenient<T>(status: Result<Option<T>, SchemaError>) -> Option<T> {
    status.unwrap_or_else(|err| {
        log::warn!("Ignoring device status: {}", err);
        None
    })
}

// ADC samples arrive as JSON numbers; out-of-range values are left for the
// estimator to reject.
fn adc_sample(raw: f32) -> i32 {
    if raw.is_finite() {
        raw.round() as i32
    } else {
        -1
    }
}

/// The `current` part of a device document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentState {
    pub gas: Option<f32>,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub voltage: Option<f32>,
    pub threshold: Option<f32>,
    pub temp_threshold: Option<f32>,
    pub alarm: bool,
    pub temp_warning: Option<String>,
    pub siren_enabled: Option<bool>,
    /// Local time string of the last update
    pub timestamp: Option<String>,
    pub heap: Option<u32>,
    pub co_ppm: Option<f32>,
    pub co_raw: Option<f32>,
    pub co_status: CoStatus,
    /// CO status that notifications were last raised against; absent in
    /// documents written before it existed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_co_status: Option<CoStatus>,
    pub aqi: Option<f32>,
    pub aqi_raw: Option<f32>,
    pub aqi_status: AqiStatus,
    pub sensor_warmup: bool,
    pub fire_risk: bool,
    pub sensor_health: SensorHealth,
    pub last_calibration: Option<String>,
    /// MQ-7 reference resistance (Ω)
    pub co_ro: Option<f32>,
    /// MQ-135 reference resistance (Ω)
    pub aqi_ro: Option<f32>,
}

/// Pending commands for a device, polled by the firmware
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceCommands {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siren_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silence: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_warning_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_danger_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_critical_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibrate: Option<bool>,
}

impl DeviceCommands {
    /// CO cut-points, clamped into their bands
    pub fn co_thresholds(&self) -> CoThresholds {
        CoThresholds::from_overrides(
            self.co_warning_threshold,
            self.co_danger_threshold,
            self.co_critical_threshold,
        )
    }
}

/// Admin request to change a device's CO cut-points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoThresholdUpdate {
    pub warning: Option<f32>,
    pub danger: Option<f32>,
    pub critical: Option<f32>,
}

impl CoThresholdUpdate {
    /// Write the requested values into `commands`, clamped into their bands
    ///
    /// Absent or non-finite values leave the current command untouched.
    pub fn apply(&self, commands: &mut DeviceCommands) {
        if let Some(w) = self.warning.filter(|v| v.is_finite()) {
            commands.co_warning_threshold = Some(w.clamp(CO_WARNING_MIN_PPM, CO_WARNING_MAX_PPM));
        }
        if let Some(d) = self.danger.filter(|v| v.is_finite()) {
            commands.co_danger_threshold = Some(d.clamp(CO_DANGER_MIN_PPM, CO_DANGER_MAX_PPM));
        }
        if let Some(c) = self.critical.filter(|v| v.is_finite()) {
            commands.co_critical_threshold =
                Some(c.clamp(CO_CRITICAL_MIN_PPM, CO_CRITICAL_MAX_PPM));
        }
        log::info!(
            "CO thresholds now {:?}/{:?}/{:?}",
            commands.co_warning_threshold,
            commands.co_danger_threshold,
            commands.co_critical_threshold
        );
    }
}

/// A device document as kept by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredDevice {
    pub current: CurrentState,
    pub commands: DeviceCommands,
}

impl StoredDevice {
    /// Parse a stored device document
    pub fn from_json(doc: &Value) -> Result<Self, SchemaError> {
        if !doc.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        Ok(Self::deserialize(doc)?)
    }

    /// Thresholds for evaluating `payload` against this device
    pub fn threshold_set(&self, payload: &DevicePayload) -> ThresholdSet {
        ThresholdSet::from_overrides(
            self.commands.co_thresholds(),
            self.current.threshold.or(payload.threshold),
            self.current.temp_threshold.or(payload.temp_threshold),
        )
    }

    /// Clean-air reference resistances; unset or non-positive values use the default
    pub fn calibration(&self) -> Calibration {
        let default_ohms = DEFAULT_REFERENCE_RESISTANCE_KOHM * OHMS_PER_KOHM;
        let ohms = |ro: Option<f32>| ro.filter(|v| *v > 0.0 && v.is_finite()).unwrap_or(default_ohms);
        Calibration::from_ohms(ohms(self.current.co_ro), ohms(self.current.aqi_ro))
    }

    /// Orchestrator configured for this device
    pub fn orchestrator(&self, payload: &DevicePayload) -> AlertOrchestrator {
        AlertOrchestrator::new(self.threshold_set(payload), self.calibration())
    }

    /// Edge-detection state from the last update
    ///
    /// Older documents without `notifiedCoStatus` use `coStatus`.
    pub fn previous_state(&self) -> DeviceState {
        DeviceState {
            alarm: self.current.alarm,
            fire_risk: self.current.fire_risk,
            notified_co_status: self
                .current
                .notified_co_status
                .unwrap_or(self.current.co_status),
        }
    }
}

/// Next `current` document after an update
///
/// Payload fields overwrite stored ones when present. Evaluated fields
/// (statuses, fire risk, sensor health) come from `evaluation`; the CO
/// notification baseline is stored apart from the displayed status. Thresholds
/// and the siren flag keep their stored value and only fall back to the
/// payload, then to the defaults (40 %, 60 °C, siren on).
pub fn merge_current(
    stored: &CurrentState,
    payload: &DevicePayload,
    evaluation: &Evaluation,
    timestamp: String,
) -> CurrentState {
    let next = evaluation.next_state();

    CurrentState {
        gas: payload.gas.or(stored.gas),
        temperature: payload.temperature.or(stored.temperature),
        humidity: payload.humidity.or(stored.humidity),
        voltage: payload.voltage.or(stored.voltage),
        threshold: Some(
            stored
                .threshold
                .or(payload.threshold)
                .unwrap_or(DEFAULT_GAS_ALARM_PCT),
        ),
        temp_threshold: Some(
            stored
                .temp_threshold
                .or(payload.temp_threshold)
                .unwrap_or(DEFAULT_TEMP_ALARM_C),
        ),
        alarm: next.alarm,
        temp_warning: payload.temp_warning.clone().or_else(|| stored.temp_warning.clone()),
        siren_enabled: Some(stored.siren_enabled.or(payload.siren_enabled).unwrap_or(true)),
        timestamp: Some(timestamp),
        heap: payload.heap.or(stored.heap),
        co_ppm: evaluation.co_ppm.or(stored.co_ppm),
        co_raw: payload.co_raw.or(stored.co_raw),
        co_status: evaluation.co_status,
        notified_co_status: Some(next.notified_co_status),
        aqi: evaluation.aqi.or(stored.aqi),
        aqi_raw: payload.aqi_raw.or(stored.aqi_raw),
        aqi_status: evaluation.aqi_status,
        sensor_warmup: payload.sensor_warmup.unwrap_or(stored.sensor_warmup),
        fire_risk: next.fire_risk,
        sensor_health: evaluation.sensor_health,
        last_calibration: stored.last_calibration.clone(),
        co_ro: stored.co_ro,
        aqi_ro: stored.aqi_ro,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings() {
        let payload = DevicePayload {
            co_status: Some("danger".into()),
            aqi_status: Some("unhealthy_sensitive".into()),
            ..Default::default()
        };
        assert_eq!(payload.co_status(), Ok(Some(CoStatus::Danger)));
        assert_eq!(payload.aqi_status(), Ok(Some(AqiStatus::UnhealthySensitive)));

        let bad = DevicePayload {
            co_status: Some("panic".into()),
            ..Default::default()
        };
        assert_eq!(bad.co_status(), Err(SchemaError::UnknownStatus("panic".into())));
        assert_eq!(bad.to_snapshot().co_status, None);
    }

    #[test]
    fn adc_samples_are_rounded() {
        assert_eq!(adc_sample(2047.6), 2048);
        assert_eq!(adc_sample(f32::NAN), -1);
    }

    #[test]
    fn zero_ro_uses_default() {
        let mut device = StoredDevice::default();
        device.current.co_ro = Some(0.0);
        device.current.aqi_ro = Some(20_000.0);
        let cal = device.calibration();
        assert_eq!(cal.co_ro_kohm, 10.0);
        assert_eq!(cal.aqi_ro_kohm, 20.0);
    }

    #[test]
    fn update_ignores_missing_and_nan() {
        let mut commands = DeviceCommands {
            co_danger_threshold: Some(120.0),
            ..Default::default()
        };
        CoThresholdUpdate {
            warning: Some(f32::NAN),
            danger: None,
            critical: Some(900.0),
        }
        .apply(&mut commands);

        assert_eq!(commands.co_warning_threshold, None);
        assert_eq!(commands.co_danger_threshold, Some(120.0));
        assert_eq!(commands.co_critical_threshold, Some(800.0));
    }
}
