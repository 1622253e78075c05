//! src/sensor/sample.rs
//!
//! One tick's worth of sensor readings and the error taxonomy for reading them.

use chrono::{DateTime, Local};
use thiserror::Error;

/// Battery state at the time of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryReading {
    /// Charge percentage in `[0, 100]`.
    pub level: u8,
    /// `true` while the charger is plugged in.
    pub charging: bool,
}

impl BatteryReading {
    pub fn new(level: u8, charging: bool) -> Self {
        Self {
            level: level.min(100),
            charging,
        }
    }

    pub fn charging_label(&self) -> &'static str {
        if self.charging {
            "charging"
        } else {
            "discharging"
        }
    }
}

/// Immutable record of a single tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Local>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Global CPU utilization, clamped to `[0, 100]`.
    pub cpu_load: f64,
    pub top_process: String,
    /// Present only when a battery was detected at startup.
    pub battery: Option<BatteryReading>,
}

impl Sample {
    pub fn new(
        timestamp: DateTime<Local>,
        temperature: Option<f64>,
        cpu_load: f64,
        top_process: impl Into<String>,
        battery: Option<BatteryReading>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            cpu_load: cpu_load.clamp(0.0, 100.0),
            top_process: top_process.into(),
            battery,
        }
    }
}

/// Failure to produce a sample. Neither variant is fatal: the tick is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// Expected absence, e.g. no temperature component on this host.
    #[error("sensor unavailable: {0}")]
    Unavailable(String),

    /// A read raced or failed this tick; the next tick retries.
    #[error("transient sensor failure: {0}")]
    Transient(String),
}
