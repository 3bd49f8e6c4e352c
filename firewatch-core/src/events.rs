//! Records produced by an evaluation
//!
//! Everything here is plain data. The orchestrator decides *when* a record is
//! produced; persisting and delivering them is the caller's job. Field names
//! serialize in camelCase to match the stored history collections, enum
//! values in snake_case.

use alloc::{format, string::String};

use heapless::Vec;

use crate::{
    classify::{AqiStatus, CoStatus},
    time::Timestamp,
    traits::Timestamped,
};

/// What caused a recorded alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum AlarmTrigger {
    /// Gas percentage above its alarm threshold
    Gas,
    /// Temperature above its alarm threshold
    Temperature,
    /// Both of the above
    Both,
    /// Correlated CO + temperature + gas warning
    FireRisk,
    /// CO entered danger or critical
    Co,
}

impl AlarmTrigger {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlarmTrigger::Gas => "gas",
            AlarmTrigger::Temperature => "temperature",
            AlarmTrigger::Both => "both",
            AlarmTrigger::FireRisk => "fire_risk",
            AlarmTrigger::Co => "co",
        }
    }

    /// Short label used in notification bodies
    pub const fn label(&self) -> &'static str {
        match self {
            AlarmTrigger::Gas => "Gas",
            AlarmTrigger::Temperature => "Temp",
            AlarmTrigger::Both => "Gas+Temp",
            AlarmTrigger::FireRisk => "Fire risk",
            AlarmTrigger::Co => "CO",
        }
    }
}

/// One alarm, recorded on a rising edge only
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "camelCase"))]
pub struct AlarmEvent {
    /// Reporting device
    pub device_id: String,
    /// What raised the alarm
    pub trigger: AlarmTrigger,
    /// Gas reading at the time (%)
    pub gas: Option<f32>,
    /// °C
    pub temperature: Option<f32>,
    /// Relative humidity (%)
    pub humidity: Option<f32>,
    /// ms since epoch
    pub timestamp: Timestamp,
}

impl Timestamped for AlarmEvent {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Overall alert level of a history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum AlertLevel {
    /// Nothing above normal
    #[default]
    None,
    /// AQI unhealthy for sensitive groups
    Warning,
    /// CO danger or AQI unhealthy
    Danger,
    /// CO critical
    Critical,
    /// Correlated fire indicators
    FireRisk,
}

impl AlertLevel {
    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::None => "none",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
            AlertLevel::Critical => "critical",
            AlertLevel::FireRisk => "fire_risk",
        }
    }
}

/// Sensor that contributed to an alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum AlertTrigger {
    /// MQ-7 carbon monoxide
    Co,
    /// MQ-135 air quality
    Aqi,
    /// Temperature sensor
    Temperature,
    /// Smoke/gas sensor
    Gas,
}

/// Every trigger at most once
pub type AlertTriggers = Vec<AlertTrigger, 4>;

/// One gas-sensor reading as stored for trending
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "camelCase"))]
pub struct HistoryRecord {
    /// Reporting device
    pub device_id: String,
    /// CO concentration (ppm), 0 when unknown
    pub co_ppm: f32,
    /// Raw MQ-7 ADC sample, 0 when not reported
    pub co_raw: i32,
    /// CO status
    pub co_status: CoStatus,
    /// Air-quality index, 0 when unknown
    pub aqi: f32,
    /// Raw MQ-135 ADC sample, 0 when not reported
    pub aqi_raw: i32,
    /// AQI status
    pub aqi_status: AqiStatus,
    /// °C
    pub temperature: Option<f32>,
    /// Relative humidity (%)
    pub humidity: Option<f32>,
    /// Gas reading (%)
    pub gas: Option<f32>,
    /// Overall level, see [`alert_level`]
    pub alert_level: AlertLevel,
    /// Sensors behind `alert_level`
    pub alert_triggers: AlertTriggers,
    /// ms since epoch
    pub timestamp: Timestamp,
}

impl Timestamped for HistoryRecord {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

// Capacity 4 holds every combination alert_level produces
fn push(trigger: AlertTrigger, triggers: &mut AlertTriggers) {
    let _ = triggers.push(trigger);
}

/// Decide the alert level of a record
///
/// Priority: fire risk, critical CO, danger (CO or AQI), warning (CO or AQI).
pub fn alert_level(
    co_status: CoStatus,
    aqi_status: AqiStatus,
    fire_risk: bool,
) -> (AlertLevel, AlertTriggers) {
    let mut triggers = AlertTriggers::new();

    let level = if fire_risk {
        push(AlertTrigger::Co, &mut triggers);
        push(AlertTrigger::Temperature, &mut triggers);
        push(AlertTrigger::Gas, &mut triggers);
        AlertLevel::FireRisk
    } else if co_status == CoStatus::Critical {
        push(AlertTrigger::Co, &mut triggers);
        AlertLevel::Critical
    } else if co_status == CoStatus::Danger || aqi_status == AqiStatus::Unhealthy {
        if co_status == CoStatus::Danger {
            push(AlertTrigger::Co, &mut triggers);
        }
        if aqi_status == AqiStatus::Unhealthy {
            push(AlertTrigger::Aqi, &mut triggers);
        }
        AlertLevel::Danger
    } else if co_status == CoStatus::Warning || aqi_status == AqiStatus::UnhealthySensitive {
        if co_status == CoStatus::Warning {
            push(AlertTrigger::Co, &mut triggers);
        }
        if aqi_status == AqiStatus::UnhealthySensitive {
            push(AlertTrigger::Aqi, &mut triggers);
        }
        AlertLevel::Warning
    } else {
        AlertLevel::None
    };

    (level, triggers)
}

const VIBRATE_SHORT: &[u16] = &[200, 100, 200];
const VIBRATE_LONG: &[u16] = &[300, 100, 300, 100, 300];

/// Kind of push notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Device alarm flag went up
    FireAlarm,
    /// Fire risk detected
    FireRisk,
    /// CO rose to danger
    CoDanger,
    /// CO rose to critical
    CoCritical,
}

impl NotificationKind {
    /// Collapse key; a newer notification with the same tag replaces the older one
    pub const fn tag(&self) -> &'static str {
        match self {
            NotificationKind::FireAlarm => "fire-alarm",
            NotificationKind::FireRisk => "fire-risk",
            NotificationKind::CoDanger => "co-danger",
            NotificationKind::CoCritical => "co-critical",
        }
    }

    /// Notification headline
    pub const fn title(&self) -> &'static str {
        match self {
            NotificationKind::FireAlarm => "🔥 FIRE ALARM!",
            NotificationKind::FireRisk => "🚨 FIRE RISK DETECTED!",
            NotificationKind::CoDanger => "⚠️ CO DANGER!",
            NotificationKind::CoCritical => "🚨 CO CRITICAL!",
        }
    }

    /// Vibration pattern in ms (on, off, on, ...)
    pub const fn vibrate(&self) -> &'static [u16] {
        match self {
            NotificationKind::FireAlarm | NotificationKind::CoDanger => VIBRATE_SHORT,
            NotificationKind::FireRisk | NotificationKind::CoCritical => VIBRATE_LONG,
        }
    }
}

/// Push notification content
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Notification {
    /// Not sent; `tag` carries it on the wire
    #[cfg_attr(feature = "serde", serde(skip))]
    pub kind: NotificationKind,
    /// Headline
    pub title: &'static str,
    /// Message text with the readings
    pub body: String,
    /// Vibration pattern (ms)
    pub vibrate: &'static [u16],
    /// Collapse key
    pub tag: &'static str,
    /// Stays on screen until dismissed
    pub require_interaction: bool,
}

impl Notification {
    fn new(kind: NotificationKind, body: String) -> Self {
        Self {
            kind,
            title: kind.title(),
            body,
            vibrate: kind.vibrate(),
            tag: kind.tag(),
            require_interaction: true,
        }
    }

    /// Primary alarm, e.g. `Gas+Temp - 55.0%, 70.0°C`
    pub fn fire_alarm(trigger: AlarmTrigger, gas_pct: f32, temperature_c: f32) -> Self {
        Self::new(
            NotificationKind::FireAlarm,
            format!("{} - {:.1}%, {:.1}°C", trigger.label(), gas_pct, temperature_c),
        )
    }

    /// Fire risk, e.g. `Multiple sensors triggered: CO 450 PPM, ...`
    pub fn fire_risk(co_ppm: f32, temperature_c: f32, gas_pct: f32) -> Self {
        Self::new(
            NotificationKind::FireRisk,
            format!(
                "Multiple sensors triggered: CO {:.0} PPM, Temp {:.1}°C, Gas {:.1}%",
                co_ppm, temperature_c, gas_pct
            ),
        )
    }

    /// CO reached danger
    pub fn co_danger(co_ppm: Option<f32>) -> Self {
        Self::new(
            NotificationKind::CoDanger,
            format!("{} - Ventilate immediately!", co_level(co_ppm)),
        )
    }

    /// CO reached critical
    pub fn co_critical(co_ppm: Option<f32>) -> Self {
        Self::new(
            NotificationKind::CoCritical,
            format!("{} - EVACUATE NOW!", co_level(co_ppm)),
        )
    }
}

fn co_level(co_ppm: Option<f32>) -> String {
    match co_ppm {
        Some(ppm) => format!("Carbon Monoxide at {:.0} PPM", ppm),
        None => String::from("Carbon Monoxide level high"),
    }
}
