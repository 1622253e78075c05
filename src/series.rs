//! src/series.rs
//!
//! Top-level `series` module: settings, bounded time-series storage, and the
//! display classification applied to the latest sample.

pub mod classify;
pub mod config;
pub mod store;

/// Re-exports
pub use classify::{BatteryBand, Bands, LoadBand, TemperatureBand};
pub use config::{ConfigError, ConfigState};
pub use store::{Metric, SeriesStore, VisibleWindow};
