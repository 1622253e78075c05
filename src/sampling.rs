//! src/sampling.rs
//!
//! The periodic poll-append-trim cycle and the timer that drives it.

pub mod tick_loop;
pub mod timer;

/// Re-exports
pub use tick_loop::{LoopState, RenderFrame, SamplingLoop, TickOutcome};
pub use timer::Timer;
