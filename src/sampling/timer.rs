//! src/sampling/timer.rs
//!
//! Deadline-based timer handle polled by the event loop.

use std::time::{Duration, Instant};

/// Stand-in deadline offset for periods that overflow `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A single armed periodic timer. Identified by `id` so a re-armed timer is
/// distinguishable from the one it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    id: u64,
    period: Duration,
    deadline: Instant,
}

impl Timer {
    /// Arm a timer whose first tick is one `period` after `now`.
    pub fn arm(id: u64, period: Duration, now: Instant) -> Self {
        Self {
            id,
            period,
            deadline: deadline_after(now, period),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Schedule the next tick one period after `fired_at`. Missed ticks are
    /// dropped rather than caught up.
    pub fn reschedule(&mut self, fired_at: Instant) {
        self.deadline = deadline_after(fired_at, self.period);
    }
}

fn deadline_after(from: Instant, period: Duration) -> Instant {
    from.checked_add(period)
        .or_else(|| from.checked_add(FAR_FUTURE))
        .unwrap_or(from)
}
