//! src/sensor/battery.rs
//!
//! Battery state from the Linux power-supply class directory
//! (`/sys/class/power_supply` by default).
//!
//! Detection happens once, at startup. A host without a battery never gets a
//! probe, so "no battery installed" is distinct from "battery read failed",
//! which surfaces as `SensorError::Transient` on the tick it happens.

use std::fs;
use std::path::{Path, PathBuf};

use super::sample::{BatteryReading, SensorError};

pub const DEFAULT_POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

/// Handle on a detected battery and, if present, the mains adapter.
#[derive(Clone, Debug)]
pub struct BatteryProbe {
    battery: PathBuf,
    mains: Option<PathBuf>,
}

impl BatteryProbe {
    /// Scan `root` for a supply whose `type` is `Battery`.
    ///
    /// Returns `None` when the directory is missing or holds no battery.
    pub fn detect(root: &Path) -> Option<Self> {
        let entries = fs::read_dir(root).ok()?;
        let mut supplies: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        // read_dir order is unspecified; BAT0 should win over BAT1
        supplies.sort();

        let mut battery = None;
        let mut mains = None;
        for path in supplies {
            match supply_type(&path).as_deref() {
                Some("Battery") if battery.is_none() => battery = Some(path),
                Some("Mains") if mains.is_none() => mains = Some(path),
                _ => {}
            }
        }

        battery.map(|battery| Self { battery, mains })
    }

    pub fn path(&self) -> &Path {
        &self.battery
    }

    /// Read charge percentage and plugged-in state.
    pub fn read(&self) -> Result<BatteryReading, SensorError> {
        let capacity = read_attr(&self.battery, "capacity")?;
        let level = capacity.parse::<u8>().map_err(|e| {
            SensorError::Transient(format!("battery capacity {:?}: {}", capacity, e))
        })?;

        let charging = match &self.mains {
            Some(mains) => read_attr(mains, "online")? == "1",
            None => read_attr(&self.battery, "status")? != "Discharging",
        };

        Ok(BatteryReading::new(level, charging))
    }
}

fn supply_type(path: &Path) -> Option<String> {
    fs::read_to_string(path.join("type"))
        .ok()
        .map(|s| s.trim().to_string())
}

fn read_attr(dir: &Path, name: &str) -> Result<String, SensorError> {
    let path = dir.join(name);
    fs::read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| SensorError::Transient(format!("{}: {}", path.display(), e)))
}
