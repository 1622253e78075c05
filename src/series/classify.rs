//! src/series/classify.rs
//!
//! Severity bands for the latest sample's values. Used for colour choice only.

use crate::sensor::Sample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureBand {
    Cold,
    Normal,
    Warm,
    Hot,
}

impl TemperatureBand {
    /// Upper bounds are inclusive: 10 is cold, 70 is warm.
    pub fn of(celsius: f64) -> Self {
        if celsius <= 10.0 {
            Self::Cold
        } else if celsius <= 50.0 {
            Self::Normal
        } else if celsius <= 70.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadBand {
    Normal,
    Elevated,
    High,
}

impl LoadBand {
    pub fn of(percent: f64) -> Self {
        if percent <= 50.0 {
            Self::Normal
        } else if percent <= 70.0 {
            Self::Elevated
        } else {
            Self::High
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryBand {
    Critical,
    Low,
    Normal,
}

impl BatteryBand {
    /// Everything above 25% is normal.
    pub fn of(percent: u8) -> Self {
        if percent <= 15 {
            Self::Critical
        } else if percent <= 25 {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

/// Bands for every value present in a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bands {
    pub temperature: Option<TemperatureBand>,
    pub load: LoadBand,
    pub battery: Option<BatteryBand>,
}

impl Bands {
    pub fn of(sample: &Sample) -> Self {
        Self {
            temperature: sample.temperature.map(TemperatureBand::of),
            load: LoadBand::of(sample.cpu_load),
            battery: sample.battery.map(|b| BatteryBand::of(b.level)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::BatteryReading;
    use chrono::Local;

    #[test]
    fn temperature_boundaries() {
        assert_eq!(TemperatureBand::of(-5.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(10.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(10.1), TemperatureBand::Normal);
        assert_eq!(TemperatureBand::of(50.0), TemperatureBand::Normal);
        assert_eq!(TemperatureBand::of(50.1), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(70.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(70.1), TemperatureBand::Hot);
    }

    #[test]
    fn load_boundaries() {
        assert_eq!(LoadBand::of(0.0), LoadBand::Normal);
        assert_eq!(LoadBand::of(50.0), LoadBand::Normal);
        assert_eq!(LoadBand::of(50.5), LoadBand::Elevated);
        assert_eq!(LoadBand::of(70.0), LoadBand::Elevated);
        assert_eq!(LoadBand::of(70.1), LoadBand::High);
        assert_eq!(LoadBand::of(100.0), LoadBand::High);
    }

    #[test]
    fn battery_boundaries_and_gap() {
        assert_eq!(BatteryBand::of(0), BatteryBand::Critical);
        assert_eq!(BatteryBand::of(15), BatteryBand::Critical);
        assert_eq!(BatteryBand::of(16), BatteryBand::Low);
        assert_eq!(BatteryBand::of(25), BatteryBand::Low);
        // 26..=70 is normal
        assert_eq!(BatteryBand::of(26), BatteryBand::Normal);
        assert_eq!(BatteryBand::of(70), BatteryBand::Normal);
        assert_eq!(BatteryBand::of(71), BatteryBand::Normal);
        assert_eq!(BatteryBand::of(100), BatteryBand::Normal);
    }

    #[test]
    fn bands_of_sample() {
        let s = Sample::new(
            Local::now(),
            Some(72.0),
            55.0,
            "rustc",
            Some(BatteryReading::new(12, false)),
        );
        assert_eq!(
            Bands::of(&s),
            Bands {
                temperature: Some(TemperatureBand::Hot),
                load: LoadBand::Elevated,
                battery: Some(BatteryBand::Critical),
            }
        );

        let no_battery = Sample::new(Local::now(), None, 10.0, "idle", None);
        let bands = Bands::of(&no_battery);
        assert_eq!(bands.temperature, None);
        assert_eq!(bands.battery, None);
    }
}
