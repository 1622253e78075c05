//! src/sensor/simulated.rs
//!
//! Random-walk sensor readings for hosts without usable sensors (containers,
//! VMs) and for exercising the display without real load.

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::reader::SensorReader;
use super::sample::{BatteryReading, Sample, SensorError};

const PROCESS_NAMES: [&str; 5] = ["firefox", "cargo", "rustc", "Xorg", "pipewire"];

pub struct SimulatedReader {
    rng: StdRng,
    temperature: f64,
    load: f64,
    battery: Option<f64>,
    charging: bool,
}

impl SimulatedReader {
    pub fn new(with_battery: bool) -> Self {
        Self::with_rng(StdRng::seed_from_u64(rand::random()), with_battery)
    }

    pub fn with_rng(rng: StdRng, with_battery: bool) -> Self {
        Self {
            rng,
            temperature: 45.0,
            load: 20.0,
            battery: with_battery.then_some(80.0),
            charging: false,
        }
    }

    fn walk(&mut self, value: f64, step: f64, lo: f64, hi: f64) -> f64 {
        (value + self.rng.random_range(-step..=step)).clamp(lo, hi)
    }
}

impl SensorReader for SimulatedReader {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        self.temperature = self.walk(self.temperature, 2.0, 5.0, 95.0);
        self.load = self.walk(self.load, 8.0, 0.0, 100.0);

        let battery = match self.battery {
            Some(level) => {
                // discharge slowly, plug in at 15%, unplug when full
                let delta = if self.charging { 0.5 } else { -0.2 };
                let level = (level + delta).clamp(0.0, 100.0);
                if level <= 15.0 {
                    self.charging = true;
                } else if level >= 100.0 {
                    self.charging = false;
                }
                self.battery = Some(level);
                Some(BatteryReading::new(level.round() as u8, self.charging))
            }
            None => None,
        };

        let top = PROCESS_NAMES[self.rng.random_range(0..PROCESS_NAMES.len())];
        Ok(Sample::new(
            Local::now(),
            Some(self.temperature),
            self.load,
            top,
            battery,
        ))
    }

    fn battery_installed(&self) -> bool {
        self.battery.is_some()
    }
}
