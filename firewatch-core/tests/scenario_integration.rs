//! End-to-end evaluation scenarios
//!
//! Drives the orchestrator through realistic update sequences and checks the
//! records and notifications a backend would act on.

#![cfg(test)]

mod common;

use firewatch_core::{
    events::NotificationKind,
    history::{filter_by_time_range, TimeRange},
    AlarmTrigger, AlertLevel, AlertOrchestrator, AlertTrigger, Calibration, CoStatus,
    CoThresholds, HistoryRecord, SensorHealth, SensorSnapshot, ThresholdSet,
};

use common::{co, fire, kinds, quiet, DeviceSim, START};

#[test]
fn fire_with_default_thresholds() {
    let mut sim = DeviceSim::new(AlertOrchestrator::default());

    let eval = sim.step(&fire());

    assert_eq!(eval.co_status, CoStatus::Critical);
    assert!(eval.fire_risk);
    let record = eval.history.as_ref().expect("gas data must be recorded");
    assert_eq!(record.alert_level, AlertLevel::FireRisk);
    assert_eq!(
        record.alert_triggers.as_slice(),
        &[AlertTrigger::Co, AlertTrigger::Temperature, AlertTrigger::Gas]
    );
    assert_eq!(
        kinds(&eval),
        [NotificationKind::FireRisk, NotificationKind::CoCritical]
    );
    assert_eq!(eval.alarms.len(), 2);
    assert_eq!(eval.alarms[0].trigger, AlarmTrigger::FireRisk);
    assert_eq!(eval.alarms[1].trigger, AlarmTrigger::Co);
}

#[test]
fn sustained_fire_notifies_once() {
    let mut sim = DeviceSim::new(AlertOrchestrator::default());

    let first = sim.step(&fire());
    assert!(first.has_alerts());

    for _ in 0..10 {
        let eval = sim.step(&fire());
        assert!(!eval.has_alerts());
        // Still recorded for trending
        assert_eq!(
            eval.history.map(|h| h.alert_level),
            Some(AlertLevel::FireRisk)
        );
    }
}

#[test]
fn fire_clears_and_returns() {
    let mut sim = DeviceSim::new(AlertOrchestrator::default());

    sim.step(&fire());
    let calm = sim.step(&quiet());
    assert!(!calm.fire_risk);
    assert_eq!(calm.co_status, CoStatus::Normal);

    let again = sim.step(&fire());
    assert_eq!(
        kinds(&again),
        [NotificationKind::FireRisk, NotificationKind::CoCritical]
    );
}

#[test]
fn device_alarm_with_fire_orders_notifications() {
    let mut sim = DeviceSim::new(AlertOrchestrator::default());
    let snapshot = SensorSnapshot {
        alarm: true,
        gas: Some(55.0),
        temperature: Some(70.0),
        ..fire()
    };

    let eval = sim.step(&snapshot);

    assert_eq!(
        kinds(&eval),
        [
            NotificationKind::FireAlarm,
            NotificationKind::FireRisk,
            NotificationKind::CoCritical,
        ]
    );
    assert_eq!(eval.alarms[0].trigger, AlarmTrigger::Both);
    assert_eq!(eval.notifications[0].body, "Gas+Temp - 55.0%, 70.0°C");
}

#[test]
fn stricter_device_thresholds() {
    let thresholds = ThresholdSet::from_overrides(
        CoThresholds::new(10.0, 50.0, 200.0),
        Some(30.0),
        Some(45.0),
    );
    let mut sim = DeviceSim::new(AlertOrchestrator::new(thresholds, Calibration::default()));

    let snapshot = SensorSnapshot {
        co_ppm: Some(60.0),
        temperature: Some(36.0),
        gas: Some(21.0),
        ..Default::default()
    };
    let eval = sim.step(&snapshot);

    // Fire-risk thresholds follow the device: 10 ppm, 35 °C, 20 %
    assert!(eval.fire_risk);
    assert_eq!(eval.co_status, CoStatus::Danger);
    assert_eq!(
        kinds(&eval),
        [NotificationKind::FireRisk, NotificationKind::CoDanger]
    );
}

#[test]
fn boot_sequence_holds_alerts_until_warm() {
    let mut sim = DeviceSim::new(AlertOrchestrator::default());
    let boot = sim.now();

    let booting = SensorSnapshot {
        boot_time_ms: Some(boot),
        ..co(150.0)
    };

    // 3 minutes of reports every 2 s
    let mut first_alert = None;
    for i in 0..100 {
        let eval = sim.step(&booting);
        if eval.warming_up {
            assert!(!eval.has_alerts());
            assert_eq!(eval.sensor_health, SensorHealth::Warning);
        } else if eval.has_alerts() && first_alert.is_none() {
            first_alert = Some((i, kinds(&eval)));
        }
    }

    let (index, fired) = first_alert.expect("CO danger after warmup");
    assert_eq!(index, 90);
    assert_eq!(fired, [NotificationKind::CoDanger]);
}

#[test]
fn history_window_over_a_day_of_records() {
    let mut sim = DeviceSim::new(AlertOrchestrator::default());
    let mut records: Vec<HistoryRecord> = Vec::new();

    // One record every 2 s for 10 minutes, then shift them back in time
    for _ in 0..300 {
        if let Some(record) = sim.step(&quiet()).history {
            records.push(record);
        }
    }
    assert_eq!(records.len(), 300);

    let now = START + 2 * TimeRange::Day.duration_ms();
    for (i, record) in records.iter_mut().enumerate() {
        // Half inside the last 24 h, half older
        record.timestamp = if i % 2 == 0 { now - 1000 } else { START };
    }

    let recent = filter_by_time_range(&records, TimeRange::Day, now);
    assert_eq!(recent.len(), 150);
    let month = filter_by_time_range(&records, TimeRange::Month, now);
    assert_eq!(month.len(), 300);
}
