//! src/cli.rs
//!
//! Command-line options. They seed the initial settings; everything else is
//! changed at runtime through the menu.

use std::path::PathBuf;

use clap::Parser;

use crate::sensor::battery::DEFAULT_POWER_SUPPLY_ROOT;
use crate::series::config::{
    DEFAULT_REFRESH_INTERVAL, DEFAULT_RETENTION_CAP, DEFAULT_VISIBLE_DURATION,
};
use crate::series::{ConfigError, ConfigState};

/// Terminal CPU temperature, load and battery monitor.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seconds between samples.
    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_REFRESH_INTERVAL)]
    pub interval: f64,

    /// Minutes of history shown on the chart (below 1 means a fraction of a minute).
    #[arg(short, long, value_name = "MINUTES", default_value_t = DEFAULT_VISIBLE_DURATION)]
    pub duration: f64,

    /// Maximum samples kept in memory, 0 for unlimited.
    #[arg(short, long, value_name = "COUNT", default_value_t = DEFAULT_RETENTION_CAP)]
    pub retention: usize,

    /// Pick the temperature sensor whose label contains this text.
    #[arg(long, value_name = "LABEL")]
    pub sensor: Option<String>,

    /// Directory holding power-supply entries.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_POWER_SUPPLY_ROOT)]
    pub power_supply_root: PathBuf,

    /// Use simulated readings instead of the host sensors.
    #[arg(long)]
    pub simulate: bool,

    /// Log file (the terminal is owned by the UI).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn config(&self) -> Result<ConfigState, ConfigError> {
        ConfigState::new(self.interval, self.duration, self.retention)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("sysmon.log"))
    }
}
