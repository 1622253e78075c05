//! src/sensor.rs
//!
//! Host sensor access: the immutable `Sample` record, the `SensorReader` seam,
//! and the readers that implement it.

pub mod battery;
pub mod reader;
pub mod sample;
#[cfg(test)]
pub mod scripted;
pub mod simulated;

/// Re-exports
pub use battery::BatteryProbe;
pub use reader::{SensorReader, SysinfoReader};
pub use sample::{BatteryReading, Sample, SensorError};
pub use simulated::SimulatedReader;
