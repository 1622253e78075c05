//! src/monitor.rs
//!
//! The sampling core as one owner: settings, series buffers, the sampling
//! loop and the last frame handed to the renderer. Every UI interaction
//! arrives as a `Command` and is applied synchronously on the caller's thread.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::info;

use crate::sampling::{RenderFrame, SamplingLoop, TickOutcome};
use crate::sensor::{Sample, SensorReader};
use crate::series::config::{duration_label, interval_label, retention_label};
use crate::series::{ConfigError, ConfigState, SeriesStore};

/// Pointer lookups need a few samples before they mean anything.
const MIN_SAMPLES_FOR_LOOKUP: usize = 3;

/// Discrete events produced by the menu, keyboard or window chrome.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Seconds between ticks.
    SetRefreshInterval(f64),
    /// Minutes shown on the chart.
    SetVisibleDuration(f64),
    /// Samples retained, `0` for unlimited.
    SetRetentionCap(usize),
    ResetHistory,
    ToggleHidden,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Details of one stored sample, for the cursor annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Readout {
    pub index: usize,
    pub sample: Sample,
}

impl Readout {
    pub fn lines(&self) -> Vec<String> {
        let s = &self.sample;
        let mut lines = vec![
            s.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("[{}]", self.index),
            match s.temperature {
                Some(t) => format!("CPUTemp: {:.1}°C", t),
                None => "CPUTemp: n/a".to_string(),
            },
            format!("CPULoad: {:.1}% ({})", s.cpu_load, s.top_process),
        ];
        if let Some(b) = s.battery {
            lines.push(format!("Battery: {}% {}", b.level, b.charging_label()));
        }
        lines
    }
}

pub struct Monitor<R> {
    config: ConfigState,
    store: SeriesStore,
    sampler: SamplingLoop<R>,
    frame: Option<RenderFrame>,
    hidden: bool,
    skipped_ticks: u64,
}

impl<R: SensorReader> Monitor<R> {
    pub fn new(reader: R, config: ConfigState, now: Instant) -> Self {
        let store = SeriesStore::new(reader.battery_installed());
        let sampler = SamplingLoop::new(reader, config.refresh_period(), now);
        Self {
            config,
            store,
            sampler,
            frame: None,
            hidden: false,
            skipped_ticks: 0,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn sampler(&self) -> &SamplingLoop<R> {
        &self.sampler
    }

    /// Last frame produced by a tick, `None` until the first successful one.
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.frame.as_ref()
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.sampler.time_until_tick(now)
    }

    /// Run the sampling loop if it is due. Returns `true` when a new frame
    /// is ready for the renderer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.sampler.poll(now, &mut self.store, &self.config) {
            Some(TickOutcome::Rendered(frame)) => {
                self.frame = Some(frame);
                true
            }
            Some(TickOutcome::Skipped(_)) => {
                self.skipped_ticks += 1;
                false
            }
            None => false,
        }
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Result<Control, ConfigError> {
        match command {
            Command::SetRefreshInterval(seconds) => {
                if seconds == self.config.refresh_interval() {
                    return Ok(Control::Continue);
                }
                self.config.set_refresh_interval(seconds)?;
                info!("refresh interval set to {}", interval_label(seconds));
                self.sampler.rearm(self.config.refresh_period(), now);
            }
            Command::SetVisibleDuration(minutes) => {
                self.config.set_visible_duration(minutes)?;
                info!("visible duration set to {}", duration_label(minutes));
                self.refresh_window();
            }
            Command::SetRetentionCap(cap) => {
                self.config.set_retention_cap(cap);
                let evicted = self.store.enforce_cap(cap);
                info!(
                    "retention set to {}, {} samples evicted",
                    retention_label(cap),
                    evicted
                );
                self.refresh_window();
            }
            Command::ResetHistory => {
                info!("history reset, {} samples dropped", self.store.len());
                self.store.reset();
                self.frame = None;
            }
            Command::ToggleHidden => {
                self.hidden = !self.hidden;
            }
            Command::Quit => {
                self.sampler.stop();
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    /// Recompute the window against the latest sample after the store or the
    /// visible duration changed between ticks.
    fn refresh_window(&mut self) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        match self.store.latest() {
            Some(latest) => {
                frame.window = self
                    .store
                    .window(latest.timestamp, self.config.visible_duration());
            }
            None => self.frame = None,
        }
    }

    /// Sample nearest to `query`, for pointer hover.
    pub fn lookup(&self, query: DateTime<Local>) -> Option<Readout> {
        if self.store.len() < MIN_SAMPLES_FOR_LOOKUP {
            return None;
        }
        let index = self.store.nearest_index(query)?;
        let sample = self.store.get(index)?;
        Some(Readout { index, sample })
    }
}
