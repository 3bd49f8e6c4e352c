//! Shared fixtures for integration tests
//!
//! - [`DeviceSim`]: replays a sequence of updates against one device, carrying
//!   the stored state forward the way the backend does
//! - Snapshot builders for the usual situations

#![allow(dead_code)]

use firewatch_core::{
    constants::time::DEVICE_REPORT_INTERVAL_MS,
    time::{FixedTime, TimeSource, Timestamp},
    AlertOrchestrator, DeviceState, Evaluation, SensorSnapshot,
    events::NotificationKind,
};

/// 2023-11-14T22:13:20Z
pub const START: Timestamp = 1_700_000_000_000;

/// One simulated device, updated every report interval
pub struct DeviceSim {
    pub orchestrator: AlertOrchestrator,
    pub state: DeviceState,
    pub clock: FixedTime,
    pub device_id: &'static str,
}

impl DeviceSim {
    pub fn new(orchestrator: AlertOrchestrator) -> Self {
        Self {
            orchestrator,
            state: DeviceState::default(),
            clock: FixedTime::new(START),
            device_id: "esp32-test",
        }
    }

    /// Evaluate one update, persist the next state and advance the clock
    pub fn step(&mut self, snapshot: &SensorSnapshot) -> Evaluation {
        let eval = self
            .orchestrator
            .evaluate_now(self.device_id, &self.state, snapshot, &self.clock);
        self.state = eval.next_state();
        self.clock.advance(DEVICE_REPORT_INTERVAL_MS);
        eval
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

pub fn kinds(eval: &Evaluation) -> Vec<NotificationKind> {
    eval.notifications.iter().map(|n| n.kind).collect()
}

pub fn quiet() -> SensorSnapshot {
    SensorSnapshot {
        co_ppm: Some(3.0),
        aqi: Some(20.0),
        temperature: Some(22.0),
        humidity: Some(45.0),
        gas: Some(5.0),
        ..Default::default()
    }
}

pub fn co(ppm: f32) -> SensorSnapshot {
    SensorSnapshot {
        co_ppm: Some(ppm),
        ..quiet()
    }
}

/// Kitchen fire: CO, heat and smoke together
pub fn fire() -> SensorSnapshot {
    SensorSnapshot {
        co_ppm: Some(450.0),
        temperature: Some(65.0),
        gas: Some(40.0),
        humidity: Some(30.0),
        ..Default::default()
    }
}
