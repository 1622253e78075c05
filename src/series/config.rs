//! src/series/config.rs
//!
//! Sampling cadence, visible window and retention settings, plus the preset
//! values offered by the settings menu.

use std::time::Duration;

use chrono::TimeDelta;
use thiserror::Error;

pub const DEFAULT_REFRESH_INTERVAL: f64 = 2.0;
pub const DEFAULT_VISIBLE_DURATION: f64 = 30.0;
pub const DEFAULT_RETENTION_CAP: usize = 10_000;

/// Visible durations offered by the menu, in minutes. Values below one are
/// fractions of a minute (0.17 is shown as "10 seconds").
pub const DURATION_PRESETS: [f64; 11] = [
    0.17, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 300.0, 600.0, 1440.0, 525_600.0,
];

/// Refresh intervals offered by the menu, in seconds.
pub const REFRESH_PRESETS: [f64; 11] = [0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 60.0];

/// Retention caps offered by the menu, in samples. `0` is unlimited.
pub const RETENTION_PRESETS: [usize; 11] = [
    1_000, 2_000, 3_000, 4_000, 5_000, 10_000, 20_000, 30_000, 40_000, 50_000, 0,
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("refresh interval must be a positive number of seconds, got {0}")]
    RefreshInterval(f64),

    #[error("visible duration must be a positive number of minutes, got {0}")]
    VisibleDuration(f64),
}

/// Current settings. Mutated only by discrete user selections.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigState {
    /// Seconds between ticks.
    refresh_interval: f64,

    /// Trailing span shown on the chart, in minutes.
    visible_duration: f64,

    /// Maximum retained samples; `0` means unlimited.
    retention_cap: usize,
}

impl ConfigState {
    pub fn new(
        refresh_interval: f64,
        visible_duration: f64,
        retention_cap: usize,
    ) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.set_refresh_interval(refresh_interval)?;
        cfg.set_visible_duration(visible_duration)?;
        cfg.set_retention_cap(retention_cap);
        Ok(cfg)
    }

    pub fn refresh_interval(&self) -> f64 {
        self.refresh_interval
    }

    pub fn visible_duration(&self) -> f64 {
        self.visible_duration
    }

    pub fn retention_cap(&self) -> usize {
        self.retention_cap
    }

    /// Rejects non-positive values and values too large for a timer period.
    pub fn set_refresh_interval(&mut self, seconds: f64) -> Result<(), ConfigError> {
        if !(seconds.is_finite() && seconds > 0.0) || Duration::try_from_secs_f64(seconds).is_err()
        {
            return Err(ConfigError::RefreshInterval(seconds));
        }
        self.refresh_interval = seconds;
        Ok(())
    }

    pub fn set_visible_duration(&mut self, minutes: f64) -> Result<(), ConfigError> {
        if !(minutes.is_finite() && minutes > 0.0) {
            return Err(ConfigError::VisibleDuration(minutes));
        }
        self.visible_duration = minutes;
        Ok(())
    }

    pub fn set_retention_cap(&mut self, cap: usize) {
        self.retention_cap = cap;
    }

    /// Timer period for the current refresh interval.
    pub fn refresh_period(&self) -> Duration {
        Duration::try_from_secs_f64(self.refresh_interval).unwrap_or(Duration::MAX)
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            visible_duration: DEFAULT_VISIBLE_DURATION,
            retention_cap: DEFAULT_RETENTION_CAP,
        }
    }
}

/// Convert a visible duration in minutes to a time span.
///
/// Sub-minute values are the menu's way of expressing seconds, so 0.17 is
/// 10.2 seconds. Spans too large to represent saturate.
pub fn visible_span(minutes: f64) -> TimeDelta {
    let millis = (minutes * 60_000.0).round();
    if millis >= i64::MAX as f64 {
        return TimeDelta::MAX;
    }
    TimeDelta::try_milliseconds(millis as i64).unwrap_or(TimeDelta::MAX)
}

pub fn duration_label(minutes: f64) -> String {
    if minutes < 1.0 {
        format!("{} seconds", (minutes * 60.0) as i64)
    } else if minutes == 1.0 {
        "1 minute".to_string()
    } else if minutes < 60.0 {
        format!("{} minutes", minutes)
    } else if minutes <= 1440.0 {
        format!("{} hour", (minutes / 60.0) as i64)
    } else {
        format!("{} year", (minutes / (60.0 * 24.0 * 365.0)) as i64)
    }
}

pub fn interval_label(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{} milliseconds", (seconds * 1000.0).round() as i64)
    } else if seconds == 1.0 {
        "1 second".to_string()
    } else {
        format!("{} seconds", seconds)
    }
}

pub fn retention_label(cap: usize) -> String {
    if cap == 0 {
        "Unlimited".to_string()
    } else {
        format!("{} logs", cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ConfigState::default();
        assert_eq!(cfg.refresh_interval(), 2.0);
        assert_eq!(cfg.visible_duration(), 30.0);
        assert_eq!(cfg.retention_cap(), 10_000);
        assert_eq!(cfg.refresh_period(), Duration::from_secs(2));
        assert!(DURATION_PRESETS.contains(&cfg.visible_duration()));
        assert!(REFRESH_PRESETS.contains(&cfg.refresh_interval()));
        assert!(RETENTION_PRESETS.contains(&cfg.retention_cap()));
    }

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            ConfigState::new(0.0, 30.0, 10),
            Err(ConfigError::RefreshInterval(0.0))
        );
        assert_eq!(
            ConfigState::new(1.0, -5.0, 10),
            Err(ConfigError::VisibleDuration(-5.0))
        );
        assert!(ConfigState::new(f64::NAN, 30.0, 10).is_err());

        let mut cfg = ConfigState::default();
        assert!(cfg.set_refresh_interval(f64::INFINITY).is_err());
        assert_eq!(cfg.refresh_interval(), 2.0);
    }

    #[test]
    fn rejects_interval_too_large_for_a_timer() {
        assert_eq!(
            ConfigState::new(1e20, 30.0, 10),
            Err(ConfigError::RefreshInterval(1e20))
        );
        let mut cfg = ConfigState::default();
        assert!(cfg.set_refresh_interval(1e20).is_err());
        assert_eq!(cfg.refresh_period(), Duration::from_secs(2));

        // representable but huge: accepted, and the period converts cleanly
        let cfg = ConfigState::new(1e19, 30.0, 10).unwrap();
        assert_eq!(cfg.refresh_period(), Duration::from_secs_f64(1e19));
    }

    #[test]
    fn unlimited_retention_is_zero() {
        let cfg = ConfigState::new(1.0, 1.0, 0).unwrap();
        assert_eq!(cfg.retention_cap(), 0);
    }

    #[test]
    fn spans() {
        assert_eq!(visible_span(0.17), TimeDelta::milliseconds(10_200));
        assert_eq!(visible_span(0.5), TimeDelta::seconds(30));
        assert_eq!(visible_span(30.0), TimeDelta::minutes(30));
        assert_eq!(visible_span(525_600.0), TimeDelta::days(365));
        assert_eq!(visible_span(1e300), TimeDelta::MAX);
    }

    #[test]
    fn menu_labels() {
        let durations: Vec<String> = DURATION_PRESETS.iter().map(|d| duration_label(*d)).collect();
        assert_eq!(
            durations,
            [
                "10 seconds",
                "30 seconds",
                "1 minute",
                "5 minutes",
                "10 minutes",
                "30 minutes",
                "1 hour",
                "5 hour",
                "10 hour",
                "24 hour",
                "1 year"
            ]
        );

        assert_eq!(interval_label(0.05), "50 milliseconds");
        assert_eq!(interval_label(0.25), "250 milliseconds");
        assert_eq!(interval_label(1.0), "1 second");
        assert_eq!(interval_label(10.0), "10 seconds");

        assert_eq!(retention_label(0), "Unlimited");
        assert_eq!(retention_label(20_000), "20000 logs");
    }
}
