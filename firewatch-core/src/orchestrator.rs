//! Alert Orchestrator
//!
//! Turns one device update into everything the backend has to do about it:
//! a history record, alarm events and push notifications.
//!
//! ## Pipeline
//!
//! ```text
//! SensorSnapshot ──► concentrations ──► statuses ──► warmup / fire risk
//!                                                        │
//! DeviceState (previous) ───────────────────────────► rising edges
//!                                                        │
//!                    Evaluation { history, alarms, notifications, next_state }
//! ```
//!
//! The orchestrator holds configuration only. The previous device state is
//! passed in and the next one handed back, so the caller owns persistence.
//!
//! ## Edges
//!
//! | Condition | Fires when | Alarm trigger | Notification |
//! |-----------|------------|---------------|--------------|
//! | primary alarm | `!prev.alarm && alarm` | gas / temperature / both | fire-alarm |
//! | fire risk | `!prev.fire_risk && fire_risk` | fire_risk | fire-risk |
//! | CO danger | `prev < danger && co == danger` | co | co-danger |
//! | CO critical | `prev != critical && co == critical` | co | co-critical |
//!
//! Notifications are emitted in table order. CO edges compare against the
//! last *notified* CO status, kept separately from the displayed one. While
//! the sensors warm up, fire risk is not evaluated and CO edges are held
//! back: the notified status keeps its previous value so that a level still
//! present after warmup raises its notification then.

use alloc::{string::String, vec::Vec};

use crate::{
    classify::{AqiClassifier, AqiStatus, CoClassifier, CoStatus},
    config::{Calibration, ThresholdSet},
    detect::{detect_fire_risk, is_sensor_stuck_default, is_warming_up_default, sensor_health, SensorHealth},
    estimators::{AqiEstimator, CoEstimator, RawReading},
    events::{alert_level, AlarmEvent, AlarmTrigger, HistoryRecord, Notification},
    time::{TimeSource, Timestamp},
    traits::{Classifier, Estimator},
};

/// One device-data update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Smoke/gas sensor reading (%)
    pub gas: Option<f32>,
    /// °C
    pub temperature: Option<f32>,
    /// Relative humidity (%)
    pub humidity: Option<f32>,
    /// Alarm flag as computed by the device
    pub alarm: bool,
    /// Device-reported CO concentration (ppm)
    pub co_ppm: Option<f32>,
    /// Raw MQ-7 ADC sample
    pub co_raw: Option<i32>,
    /// Device-computed CO status, trusted when present
    pub co_status: Option<CoStatus>,
    /// Device-reported AQI
    pub aqi: Option<f32>,
    /// Raw MQ-135 ADC sample
    pub aqi_raw: Option<i32>,
    /// Device-computed AQI status, trusted when present
    pub aqi_status: Option<AqiStatus>,
    /// Device says its heaters are still settling
    pub sensor_warmup: bool,
    /// Device boot time (ms since epoch)
    pub boot_time_ms: Option<Timestamp>,
    /// Recent raw ADC samples, oldest first
    pub adc_history: Vec<f32>,
}

/// The slice of the stored device document that edge detection needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "camelCase", default))]
pub struct DeviceState {
    /// Device alarm flag of the last update
    pub alarm: bool,
    /// Fire risk of the last update
    pub fire_risk: bool,
    /// CO status that CO notifications were last raised against
    pub notified_co_status: CoStatus,
}

/// Maximum edges per update: primary alarm, fire risk, CO
pub const MAX_EDGES: usize = 3;

/// Result of evaluating one update
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Reported or estimated CO concentration
    pub co_ppm: Option<f32>,
    /// Reported or estimated AQI
    pub aqi: Option<f32>,
    /// CO status to display and record
    pub co_status: CoStatus,
    /// AQI status to display and record
    pub aqi_status: AqiStatus,
    /// Device alarm flag
    pub alarm: bool,
    /// CO, temperature and gas all at warning level
    pub fire_risk: bool,
    /// Sensor heaters still settling
    pub warming_up: bool,
    /// Stuck / warmup summary
    pub sensor_health: SensorHealth,
    /// Present when the update carried gas-sensor data
    pub history: Option<HistoryRecord>,
    /// Alarm-history entries to store, one per edge
    pub alarms: heapless::Vec<AlarmEvent, MAX_EDGES>,
    /// Push notifications to send, in edge order
    pub notifications: heapless::Vec<Notification, MAX_EDGES>,
    notified_co_status: CoStatus,
}

impl Evaluation {
    /// State to persist and pass back in with the next update
    pub fn next_state(&self) -> DeviceState {
        DeviceState {
            alarm: self.alarm,
            fire_risk: self.fire_risk,
            notified_co_status: self.notified_co_status,
        }
    }

    /// Whether any one-shot alert fired
    pub fn has_alerts(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Per-device evaluation engine
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertOrchestrator {
    thresholds: ThresholdSet,
    calibration: Calibration,
    co_estimator: CoEstimator,
    aqi_estimator: AqiEstimator,
}

impl AlertOrchestrator {
    /// Orchestrator with the default estimators
    pub fn new(thresholds: ThresholdSet, calibration: Calibration) -> Self {
        Self {
            thresholds,
            calibration,
            co_estimator: CoEstimator::default(),
            aqi_estimator: AqiEstimator::default(),
        }
    }

    /// Replace the CO estimator, e.g. one with a per-batch curve
    pub fn with_co_estimator(mut self, estimator: CoEstimator) -> Self {
        self.co_estimator = estimator;
        self
    }

    /// Active thresholds
    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    /// Active calibration
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// [`evaluate`](Self::evaluate) at the time reported by `clock`
    pub fn evaluate_now<T: TimeSource>(
        &self,
        device_id: &str,
        previous: &DeviceState,
        snapshot: &SensorSnapshot,
        clock: &T,
    ) -> Evaluation {
        self.evaluate(device_id, previous, snapshot, clock.now())
    }

    /// Evaluate one update against the previous device state
    pub fn evaluate(
        &self,
        device_id: &str,
        previous: &DeviceState,
        snapshot: &SensorSnapshot,
        now: Timestamp,
    ) -> Evaluation {
        let co_ppm = snapshot.co_ppm.or_else(|| {
            snapshot.co_raw.map(|raw| {
                self.co_estimator
                    .estimate(&RawReading::new(raw, self.calibration.co_ro_kohm))
            })
        });
        let aqi = snapshot.aqi.or_else(|| {
            snapshot.aqi_raw.map(|raw| {
                self.aqi_estimator
                    .estimate(&RawReading::new(raw, self.calibration.aqi_ro_kohm))
            })
        });

        let co_classifier = CoClassifier { thresholds: self.thresholds.co };
        let co_status = snapshot
            .co_status
            .or_else(|| co_ppm.map(|ppm| co_classifier.classify(ppm)))
            .unwrap_or_default();
        let aqi_status = snapshot
            .aqi_status
            .or_else(|| aqi.map(|a| AqiClassifier.classify(a)))
            .unwrap_or_default();

        let warming_up = snapshot.sensor_warmup
            || (snapshot.boot_time_ms.is_some()
                && is_warming_up_default(snapshot.boot_time_ms, Some(now)));

        let gas = snapshot.gas.unwrap_or(0.0);
        let temperature = snapshot.temperature.unwrap_or(0.0);

        let fire_risk = match co_ppm {
            Some(ppm) if !warming_up => {
                detect_fire_risk(ppm, temperature, gas, &self.thresholds.fire_risk())
            }
            _ => false,
        };

        let stuck = is_sensor_stuck_default(&snapshot.adc_history);
        let health = sensor_health(stuck, warming_up);

        let history = (co_ppm.is_some() || aqi.is_some()).then(|| {
            let (level, triggers) = alert_level(co_status, aqi_status, fire_risk);
            HistoryRecord {
                device_id: String::from(device_id),
                co_ppm: co_ppm.unwrap_or(0.0),
                co_raw: snapshot.co_raw.unwrap_or(0),
                co_status,
                aqi: aqi.unwrap_or(0.0),
                aqi_raw: snapshot.aqi_raw.unwrap_or(0),
                aqi_status,
                temperature: snapshot.temperature,
                humidity: snapshot.humidity,
                gas: snapshot.gas,
                alert_level: level,
                alert_triggers: triggers,
                timestamp: now,
            }
        });

        let mut alarms = heapless::Vec::new();
        let mut notifications = heapless::Vec::new();
        let event = |trigger: AlarmTrigger| AlarmEvent {
            device_id: String::from(device_id),
            trigger,
            gas: snapshot.gas,
            temperature: snapshot.temperature,
            humidity: snapshot.humidity,
            timestamp: now,
        };

        // At most MAX_EDGES pushes happen below, so the results are ignored.
        if !previous.alarm && snapshot.alarm {
            let trigger = self.alarm_trigger(gas, temperature);
            log_info!("{}: alarm raised ({})", device_id, trigger.as_str());
            let _ = alarms.push(event(trigger));
            let _ = notifications.push(Notification::fire_alarm(trigger, gas, temperature));
        }

        if !previous.fire_risk && fire_risk {
            log_info!("{}: fire risk detected", device_id);
            let _ = alarms.push(event(AlarmTrigger::FireRisk));
            let _ = notifications.push(Notification::fire_risk(
                co_ppm.unwrap_or(0.0),
                temperature,
                gas,
            ));
        }

        let notified_co_status = if warming_up {
            previous.notified_co_status
        } else {
            co_status
        };
        if !warming_up {
            if let Some(n) = co_edge(previous.notified_co_status, co_status, co_ppm) {
                log_info!("{}: CO {}", device_id, co_status.as_str());
                let _ = alarms.push(event(AlarmTrigger::Co));
                let _ = notifications.push(n);
            }
        }

        Evaluation {
            co_ppm,
            aqi,
            co_status,
            aqi_status,
            alarm: snapshot.alarm,
            fire_risk,
            warming_up,
            sensor_health: health,
            history,
            alarms,
            notifications,
            notified_co_status,
        }
    }

    fn alarm_trigger(&self, gas: f32, temperature: f32) -> AlarmTrigger {
        let gas_high = gas > self.thresholds.gas_alarm_pct;
        let temp_high = temperature > self.thresholds.temp_alarm_c;

        match (gas_high, temp_high) {
            (true, true) => AlarmTrigger::Both,
            (true, false) => AlarmTrigger::Gas,
            _ => AlarmTrigger::Temperature,
        }
    }
}

/// Escalation notification for a CO status change, if any
///
/// Critical supersedes danger: a jump straight to critical gives one
/// notification. `co_ppm` is left out of the text when unknown.
pub fn co_edge(previous: CoStatus, current: CoStatus, co_ppm: Option<f32>) -> Option<Notification> {
    match current {
        CoStatus::Critical if previous != CoStatus::Critical => Some(Notification::co_critical(co_ppm)),
        CoStatus::Danger if previous < CoStatus::Danger => Some(Notification::co_danger(co_ppm)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AlertLevel, AlertTrigger, NotificationKind};
    use crate::time::FixedTime;

    const NOW: Timestamp = 1_700_000_000_000;

    fn kinds(eval: &Evaluation) -> alloc::vec::Vec<NotificationKind> {
        eval.notifications.iter().map(|n| n.kind).collect()
    }

    fn co_only(ppm: f32) -> SensorSnapshot {
        SensorSnapshot {
            co_ppm: Some(ppm),
            ..Default::default()
        }
    }

    #[test]
    fn fire_scenario() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            co_ppm: Some(450.0),
            temperature: Some(65.0),
            gas: Some(40.0),
            ..Default::default()
        };

        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);

        assert_eq!(eval.co_status, CoStatus::Critical);
        assert!(eval.fire_risk);
        let record = eval.history.as_ref().expect("history record");
        assert_eq!(record.alert_level, AlertLevel::FireRisk);
        assert_eq!(
            record.alert_triggers.as_slice(),
            &[AlertTrigger::Co, AlertTrigger::Temperature, AlertTrigger::Gas]
        );
        assert_eq!(kinds(&eval), [NotificationKind::FireRisk, NotificationKind::CoCritical]);
    }

    #[test]
    fn alarm_fires_only_on_rising_edge() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            alarm: true,
            gas: Some(55.0),
            temperature: Some(30.0),
            ..Default::default()
        };

        let first = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        assert_eq!(first.alarms.len(), 1);
        assert_eq!(first.alarms[0].trigger, AlarmTrigger::Gas);
        assert_eq!(kinds(&first), [NotificationKind::FireAlarm]);

        let second = orchestrator.evaluate("dev-1", &first.next_state(), &snapshot, NOW + 2000);
        assert!(second.alarms.is_empty());
        assert!(!second.has_alerts());
    }

    #[test]
    fn alarm_trigger_classification() {
        let orchestrator = AlertOrchestrator::default();
        assert_eq!(orchestrator.alarm_trigger(41.0, 61.0), AlarmTrigger::Both);
        assert_eq!(orchestrator.alarm_trigger(41.0, 60.0), AlarmTrigger::Gas);
        assert_eq!(orchestrator.alarm_trigger(40.0, 61.0), AlarmTrigger::Temperature);
        // Neither exceeds: still reported as temperature
        assert_eq!(orchestrator.alarm_trigger(0.0, 0.0), AlarmTrigger::Temperature);
    }

    #[test]
    fn co_escalation_does_not_double_fire() {
        assert_eq!(
            co_edge(CoStatus::Normal, CoStatus::Critical, Some(500.0)).map(|n| n.kind),
            Some(NotificationKind::CoCritical)
        );
        assert_eq!(
            co_edge(CoStatus::Warning, CoStatus::Danger, Some(150.0)).map(|n| n.kind),
            Some(NotificationKind::CoDanger)
        );
        assert!(co_edge(CoStatus::Critical, CoStatus::Danger, Some(150.0)).is_none());
        assert!(co_edge(CoStatus::Danger, CoStatus::Danger, None).is_none());
        assert!(co_edge(CoStatus::Critical, CoStatus::Critical, Some(500.0)).is_none());
    }

    #[test]
    fn device_status_is_trusted() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            co_ppm: Some(5.0),
            co_status: Some(CoStatus::Danger),
            ..Default::default()
        };
        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        assert_eq!(eval.co_status, CoStatus::Danger);
    }

    #[test]
    fn raw_adc_is_estimated() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            co_raw: Some(2048),
            aqi_raw: Some(2048),
            ..Default::default()
        };
        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        let ppm = eval.co_ppm.expect("estimated ppm");
        assert!((0.0..=1000.0).contains(&ppm));
        assert!(eval.aqi.is_some());
        assert_eq!(eval.history.map(|h| h.co_raw), Some(2048));
    }

    #[test]
    fn no_gas_data_no_history() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            temperature: Some(22.0),
            ..Default::default()
        };
        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        assert!(eval.history.is_none());
        assert_eq!(eval.co_status, CoStatus::Normal);
        assert_eq!(eval.aqi_status, AqiStatus::Good);
    }

    #[test]
    fn warmup_suppresses_fire_risk_and_holds_co_edges() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            co_ppm: Some(450.0),
            temperature: Some(65.0),
            gas: Some(40.0),
            boot_time_ms: Some(NOW - 1000),
            ..Default::default()
        };

        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        assert!(eval.warming_up);
        assert!(!eval.fire_risk);
        assert!(!eval.has_alerts());
        assert_eq!(eval.sensor_health, SensorHealth::Warning);
        assert_eq!(eval.co_status, CoStatus::Critical);
        assert_eq!(eval.next_state().notified_co_status, CoStatus::Normal);

        let later = NOW + 180_000;
        let eval = orchestrator.evaluate("dev-1", &eval.next_state(), &snapshot, later);
        assert!(!eval.warming_up);
        assert_eq!(kinds(&eval), [NotificationKind::FireRisk, NotificationKind::CoCritical]);
    }

    #[test]
    fn missing_boot_time_alone_does_not_suppress() {
        let orchestrator = AlertOrchestrator::default();
        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &co_only(150.0), NOW);
        assert!(!eval.warming_up);
        assert_eq!(kinds(&eval), [NotificationKind::CoDanger]);
    }

    #[test]
    fn reported_status_without_ppm_leaves_figure_out() {
        let orchestrator = AlertOrchestrator::default();
        let snapshot = SensorSnapshot {
            co_status: Some(CoStatus::Danger),
            ..Default::default()
        };
        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        assert_eq!(kinds(&eval), [NotificationKind::CoDanger]);
        assert!(!eval.notifications[0].body.contains("PPM"));
        assert!(!eval.notifications[0].body.contains(" 0 "));
    }

    #[test]
    fn stuck_history_reports_error_health() {
        let orchestrator = AlertOrchestrator::default();
        let mut snapshot = co_only(5.0);
        snapshot.adc_history = alloc::vec![812.0; 60];
        let eval = orchestrator.evaluate("dev-1", &DeviceState::default(), &snapshot, NOW);
        assert_eq!(eval.sensor_health, SensorHealth::Error);
    }

    #[test]
    fn evaluate_now_uses_clock() {
        let orchestrator = AlertOrchestrator::default();
        let clock = FixedTime::new(NOW);
        let eval = orchestrator.evaluate_now("dev-1", &DeviceState::default(), &co_only(1.0), &clock);
        assert_eq!(eval.history.map(|h| h.timestamp), Some(NOW));
    }
}
