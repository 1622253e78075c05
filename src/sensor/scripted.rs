//! src/sensor/scripted.rs
//!
//! Test reader that replays a fixed list of results.

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeDelta, TimeZone};

use super::reader::SensorReader;
use super::sample::{BatteryReading, Sample, SensorError};

pub fn at(secs: i64) -> DateTime<Local> {
    Local.timestamp_opt(1_700_000_000, 0).unwrap() + TimeDelta::seconds(secs)
}

pub fn sample_at(secs: i64, temperature: f64, load: f64) -> Sample {
    Sample::new(at(secs), Some(temperature), load, "proc", None)
}

pub fn battery_sample_at(secs: i64, level: u8, charging: bool) -> Sample {
    Sample::new(
        at(secs),
        Some(45.0),
        20.0,
        "proc",
        Some(BatteryReading::new(level, charging)),
    )
}

/// Replays `script` in order, then reports `Unavailable` forever.
pub struct ScriptedReader {
    script: VecDeque<Result<Sample, SensorError>>,
    battery: bool,
    pub calls: usize,
}

impl ScriptedReader {
    pub fn new(script: Vec<Result<Sample, SensorError>>) -> Self {
        Self {
            script: script.into(),
            battery: false,
            calls: 0,
        }
    }

    pub fn with_battery(mut self) -> Self {
        self.battery = true;
        self
    }

    /// One successful sample per second starting at t=0.
    pub fn steady(count: i64) -> Self {
        Self::new((0..count).map(|t| Ok(sample_at(t, 40.0, 10.0))).collect())
    }
}

impl SensorReader for ScriptedReader {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        self.calls += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(SensorError::Unavailable("script exhausted".into())))
    }

    fn battery_installed(&self) -> bool {
        self.battery
    }
}
