//! src/sampling/tick_loop.rs
//!
//! `SamplingLoop`: a two-state machine (`Armed`/`Stopped`) that, on each due
//! tick, samples the sensors, appends to the store, trims it under the
//! retention cap and recomputes the visible window for the renderer.
//!
//! Sensor failures never escape a tick. They are logged, the tick is skipped,
//! and the loop stays armed for the next scheduled tick.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use super::timer::Timer;
use crate::sensor::{SensorError, SensorReader};
use crate::series::{Bands, ConfigState, SeriesStore, VisibleWindow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Armed(Timer),
    Stopped,
}

/// What the renderer needs after a successful tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderFrame {
    pub window: VisibleWindow,
    pub bands: Bands,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Rendered(RenderFrame),
    Skipped(SensorError),
}

pub struct SamplingLoop<R> {
    reader: R,
    state: LoopState,
    next_timer_id: u64,
    cancelled: u64,
}

impl<R: SensorReader> SamplingLoop<R> {
    /// Construct in `Armed(interval)`; the first tick is one interval from `now`.
    pub fn new(reader: R, interval: Duration, now: Instant) -> Self {
        Self {
            reader,
            state: LoopState::Armed(Timer::arm(0, interval, now)),
            next_timer_id: 1,
            cancelled: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, LoopState::Armed(_))
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Number of timers cancelled so far (re-arms and shutdown).
    pub fn cancelled_timers(&self) -> u64 {
        self.cancelled
    }

    /// Time until the armed timer is due, `None` when stopped.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            LoopState::Armed(timer) => Some(timer.remaining(now)),
            LoopState::Stopped => None,
        }
    }

    /// Run a tick if the armed timer is due at `now`.
    pub fn poll(
        &mut self,
        now: Instant,
        store: &mut SeriesStore,
        config: &ConfigState,
    ) -> Option<TickOutcome> {
        let LoopState::Armed(timer) = &mut self.state else {
            return None;
        };
        if !timer.is_due(now) {
            return None;
        }
        timer.reschedule(now);
        Some(self.tick(store, config))
    }

    /// One sample-append-trim-window cycle, regardless of the timer.
    pub fn tick(&mut self, store: &mut SeriesStore, config: &ConfigState) -> TickOutcome {
        let sample = match self.reader.sample() {
            Ok(sample) => sample,
            Err(err) => {
                match &err {
                    SensorError::Unavailable(_) => debug!("tick skipped: {}", err),
                    SensorError::Transient(_) => warn!("tick skipped: {}", err),
                }
                return TickOutcome::Skipped(err);
            }
        };

        let now = sample.timestamp;
        let bands = Bands::of(&sample);
        store.append(sample);
        if store.trim(config.retention_cap()) {
            trace!("evicted oldest sample, {} retained", store.len());
        }

        let window = store.window(now, config.visible_duration());
        TickOutcome::Rendered(RenderFrame { window, bands })
    }

    /// `Armed(old) -> Armed(new)`: cancel the current timer and arm a fresh
    /// one whose first tick is one new period from `now`. Ignored when stopped.
    pub fn rearm(&mut self, interval: Duration, now: Instant) -> bool {
        let LoopState::Armed(old) = self.state else {
            return false;
        };
        self.cancelled += 1;
        let timer = Timer::arm(self.next_timer_id, interval, now);
        self.next_timer_id += 1;
        info!(
            "timer {} ({:?}) replaced by timer {} ({:?})",
            old.id(),
            old.period(),
            timer.id(),
            interval
        );
        self.state = LoopState::Armed(timer);
        true
    }

    /// Release the timer. Final: a stopped loop never ticks again.
    pub fn stop(&mut self) {
        if let LoopState::Armed(timer) = self.state {
            self.cancelled += 1;
            info!("sampling stopped, timer {} released", timer.id());
        }
        self.state = LoopState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::scripted::{ScriptedReader, sample_at};
    use crate::series::{LoadBand, TemperatureBand};

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn starts_armed_and_ticks_when_due() {
        let t0 = Instant::now();
        let cfg = ConfigState::default();
        let mut store = SeriesStore::new(false);
        let mut sampler = SamplingLoop::new(ScriptedReader::steady(10), cfg.refresh_period(), t0);

        assert!(sampler.is_armed());
        assert_eq!(sampler.poll(t0 + secs(1.0), &mut store, &cfg), None);
        assert_eq!(sampler.reader().calls, 0);

        let outcome = sampler.poll(t0 + secs(2.0), &mut store, &cfg).unwrap();
        let TickOutcome::Rendered(frame) = outcome else {
            panic!("expected a rendered frame, got {:?}", outcome);
        };
        assert_eq!(store.len(), 1);
        assert_eq!(frame.window.range(), 0..1);
        assert_eq!(frame.bands.temperature, Some(TemperatureBand::Normal));
        assert_eq!(frame.bands.load, LoadBand::Normal);

        // not due again until a full period after the tick
        assert_eq!(sampler.poll(t0 + secs(3.9), &mut store, &cfg), None);
        assert!(sampler.poll(t0 + secs(4.0), &mut store, &cfg).is_some());
    }

    #[test]
    fn unavailable_sensor_skips_tick_without_touching_store() {
        let cfg = ConfigState::default();
        let mut store = SeriesStore::new(false);
        let reader = ScriptedReader::new(vec![
            Ok(sample_at(0, 40.0, 10.0)),
            Err(SensorError::Unavailable("no coretemp".into())),
            Err(SensorError::Transient("process vanished".into())),
            Ok(sample_at(3, 41.0, 12.0)),
        ]);
        let mut sampler = SamplingLoop::new(reader, cfg.refresh_period(), Instant::now());

        assert!(matches!(sampler.tick(&mut store, &cfg), TickOutcome::Rendered(_)));
        assert_eq!(store.len(), 1);

        assert_eq!(
            sampler.tick(&mut store, &cfg),
            TickOutcome::Skipped(SensorError::Unavailable("no coretemp".into()))
        );
        assert_eq!(store.len(), 1);
        assert!(sampler.is_armed());

        assert!(matches!(
            sampler.tick(&mut store, &cfg),
            TickOutcome::Skipped(SensorError::Transient(_))
        ));
        assert_eq!(store.len(), 1);

        assert!(matches!(sampler.tick(&mut store, &cfg), TickOutcome::Rendered(_)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn retention_cap_bounds_store_every_tick() {
        let cfg = ConfigState::new(1.0, 30.0, 5).unwrap();
        let mut store = SeriesStore::new(false);
        let mut sampler =
            SamplingLoop::new(ScriptedReader::steady(50), cfg.refresh_period(), Instant::now());

        let mut prev = 0;
        for _ in 0..50 {
            sampler.tick(&mut store, &cfg);
            assert!(store.len() <= 5);
            assert!(store.len() + 1 >= prev);
            prev = store.len();
        }
        assert_eq!(store.len(), 5);
        assert_eq!(store.timestamp(0), Some(crate::sensor::scripted::at(45)));
    }

    #[test]
    fn rearm_switches_cadence_and_cancels_once() {
        let t0 = Instant::now();
        let cfg = ConfigState::default();
        let mut store = SeriesStore::new(false);
        let mut sampler = SamplingLoop::new(ScriptedReader::steady(10), secs(2.0), t0);

        // interval 2s -> 1s half a second in
        let switch = t0 + secs(0.5);
        assert!(sampler.rearm(secs(1.0), switch));
        assert_eq!(sampler.cancelled_timers(), 1);

        let LoopState::Armed(timer) = sampler.state() else {
            panic!("loop should stay armed");
        };
        assert_eq!(timer.period(), secs(1.0));
        assert_eq!(timer.deadline(), switch + secs(1.0));

        // nothing at the old 2s deadline's neighbourhood before the new one
        assert_eq!(sampler.poll(t0 + secs(1.4), &mut store, &cfg), None);
        assert!(sampler.poll(t0 + secs(1.5), &mut store, &cfg).is_some());
        assert_eq!(sampler.poll(t0 + secs(2.0), &mut store, &cfg), None);
        assert!(sampler.poll(t0 + secs(2.5), &mut store, &cfg).is_some());
        assert_eq!(sampler.reader().calls, 2);
        assert_eq!(sampler.cancelled_timers(), 1);
    }

    #[test]
    fn stopped_loop_never_ticks() {
        let t0 = Instant::now();
        let cfg = ConfigState::default();
        let mut store = SeriesStore::new(false);
        let mut sampler = SamplingLoop::new(ScriptedReader::steady(10), secs(2.0), t0);

        sampler.stop();
        assert_eq!(sampler.state(), LoopState::Stopped);
        assert_eq!(sampler.time_until_tick(t0), None);
        assert_eq!(sampler.poll(t0 + secs(60.0), &mut store, &cfg), None);
        assert!(!sampler.rearm(secs(1.0), t0));
        assert_eq!(sampler.cancelled_timers(), 1);

        sampler.stop();
        assert_eq!(sampler.cancelled_timers(), 1);
        assert!(store.is_empty());
    }
}
