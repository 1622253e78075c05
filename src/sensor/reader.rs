//! src/sensor/reader.rs
//!
//! The `SensorReader` seam and its `sysinfo`-backed implementation.

use chrono::Local;
use sysinfo::{Components, ProcessesToUpdate, System};

use super::battery::BatteryProbe;
use super::sample::{Sample, SensorError};

/// Label fragments that identify a CPU package/core temperature sensor.
const CPU_SENSOR_HINTS: [&str; 4] = ["coretemp", "k10temp", "package", "cpu"];

/// Anything that can produce a timestamped `Sample` on demand.
pub trait SensorReader {
    /// Take one reading. Blocks for the duration of the host queries.
    fn sample(&mut self) -> Result<Sample, SensorError>;

    /// Whether battery fields will ever be populated. Fixed for the process lifetime.
    fn battery_installed(&self) -> bool;
}

/// Reads temperature, load and processes through `sysinfo`, and the battery
/// through a `BatteryProbe` detected once at construction.
pub struct SysinfoReader {
    system: System,
    components: Components,
    preferred_sensor: Option<String>,
    battery: Option<BatteryProbe>,
}

impl SysinfoReader {
    pub fn new(preferred_sensor: Option<String>, battery: Option<BatteryProbe>) -> Self {
        let mut system = System::new();
        // cpu usage is a delta between refreshes; prime the baseline
        system.refresh_cpu_usage();
        system.refresh_processes(ProcessesToUpdate::All, true);

        Self {
            system,
            components: Components::new_with_refreshed_list(),
            preferred_sensor: preferred_sensor.map(|s| s.to_lowercase()),
            battery,
        }
    }

    fn temperature(&mut self) -> Result<f64, SensorError> {
        self.components.refresh(true);
        let readings = self
            .components
            .list()
            .iter()
            .map(|c| (c.label(), c.temperature()));
        pick_temperature(readings, self.preferred_sensor.as_deref())
            .ok_or_else(|| SensorError::Unavailable("no temperature sensor reading".into()))
    }

    fn top_process(&mut self) -> Result<String, SensorError> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);
        let procs = self
            .system
            .processes()
            .values()
            .map(|p| (p.name().to_string_lossy().into_owned(), p.cpu_usage()));
        top_process(procs)
            .ok_or_else(|| SensorError::Transient("process list was empty".into()))
    }
}

impl SensorReader for SysinfoReader {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        let timestamp = Local::now();
        let temperature = self.temperature()?;

        self.system.refresh_cpu_usage();
        let cpu_load = self.system.global_cpu_usage() as f64;
        let top = self.top_process()?;

        let battery = match &self.battery {
            Some(probe) => Some(probe.read()?),
            None => None,
        };

        Ok(Sample::new(
            timestamp,
            Some(temperature),
            cpu_load,
            top,
            battery,
        ))
    }

    fn battery_installed(&self) -> bool {
        self.battery.is_some()
    }
}

/// Choose one temperature from `(label, reading)` pairs.
///
/// Order of preference: first reading whose label contains `preferred`, then
/// the first CPU-looking label, then the first component with any reading.
fn pick_temperature<'a>(
    readings: impl Iterator<Item = (&'a str, Option<f32>)>,
    preferred: Option<&str>,
) -> Option<f64> {
    let available: Vec<(String, f32)> = readings
        .filter_map(|(label, t)| t.filter(|t| t.is_finite()).map(|t| (label.to_lowercase(), t)))
        .collect();

    let by_label = |needle: &str| {
        available
            .iter()
            .find(|(label, _)| label.contains(needle))
            .map(|(_, t)| *t)
    };

    if let Some(needle) = preferred {
        return by_label(needle).map(f64::from);
    }

    CPU_SENSOR_HINTS
        .iter()
        .find_map(|hint| by_label(hint))
        .or_else(|| available.first().map(|(_, t)| *t))
        .map(f64::from)
}

/// Name of the process with the highest CPU usage. Ties have no defined winner.
fn top_process(procs: impl Iterator<Item = (String, f32)>) -> Option<String> {
    procs
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}
