//! src/series/store.rs
//!
//! Index-aligned, bounded time-series buffers (one per sample field) and the
//! visible-window computation fed to the chart.

use std::collections::VecDeque;
use std::ops::Range;

use chrono::{DateTime, Local};

use super::config::visible_span;
use crate::sensor::{BatteryReading, Sample};

/// Chartable series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    CpuLoad,
    Battery,
}

/// Indices and x-bounds of the trailing span shown on the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleWindow {
    /// First sample at or after `now - visible_duration`.
    pub start_index: usize,
    /// One past the last sample.
    pub end_index: usize,
    /// `max(now - visible_duration, first timestamp)`.
    pub x_start: DateTime<Local>,
    pub x_end: DateTime<Local>,
}

impl VisibleWindow {
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    /// x-axis bounds in epoch seconds, as used by the chart points.
    pub fn x_bounds(&self) -> [f64; 2] {
        [epoch_seconds(&self.x_start), epoch_seconds(&self.x_end)]
    }
}

/// Chart x coordinate for a timestamp.
pub fn epoch_seconds(t: &DateTime<Local>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}

/// Parallel sequences; position `i` across all of them describes one sample.
///
/// Invariants: every sequence has the same length, and timestamps are
/// non-decreasing (samples are appended in real time).
#[derive(Debug, Default)]
pub struct SeriesStore {
    timestamps: VecDeque<DateTime<Local>>,
    temperatures: VecDeque<Option<f64>>,
    cpu_loads: VecDeque<f64>,
    top_processes: VecDeque<String>,
    battery_levels: VecDeque<Option<u8>>,
    battery_charging: VecDeque<Option<bool>>,
    battery_installed: bool,
}

impl SeriesStore {
    /// `battery_installed` decides whether battery series are shown; it is
    /// fixed for the lifetime of the store.
    pub fn new(battery_installed: bool) -> Self {
        Self {
            battery_installed,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn battery_installed(&self) -> bool {
        self.battery_installed
    }

    /// Push a sample's fields onto the end of every sequence.
    pub fn append(&mut self, sample: Sample) {
        // a wall clock stepped backwards must not break timestamp order
        let timestamp = match self.timestamps.back() {
            Some(last) if *last > sample.timestamp => *last,
            _ => sample.timestamp,
        };
        self.timestamps.push_back(timestamp);
        self.temperatures.push_back(sample.temperature);
        self.cpu_loads.push_back(sample.cpu_load);
        self.top_processes.push_back(sample.top_process);
        self.battery_levels.push_back(sample.battery.map(|b| b.level));
        self.battery_charging.push_back(sample.battery.map(|b| b.charging));
    }

    /// Evict the oldest sample if a cap is set and exceeded.
    ///
    /// Removes at most one sample per call; run after `append` each tick so
    /// the length settles at exactly `cap`. Returns whether a sample was evicted.
    pub fn trim(&mut self, cap: usize) -> bool {
        if cap == 0 || self.len() <= cap {
            return false;
        }
        self.pop_oldest();
        true
    }

    /// Drop every sample beyond `cap` at once. Used when the cap is lowered
    /// by the user rather than on a tick. Returns the number evicted.
    pub fn enforce_cap(&mut self, cap: usize) -> usize {
        if cap == 0 {
            return 0;
        }
        let excess = self.len().saturating_sub(cap);
        for _ in 0..excess {
            self.pop_oldest();
        }
        excess
    }

    fn pop_oldest(&mut self) {
        self.timestamps.pop_front();
        self.temperatures.pop_front();
        self.cpu_loads.pop_front();
        self.top_processes.pop_front();
        self.battery_levels.pop_front();
        self.battery_charging.pop_front();
    }

    /// Clear every sequence.
    pub fn reset(&mut self) {
        self.timestamps.clear();
        self.temperatures.clear();
        self.cpu_loads.clear();
        self.top_processes.clear();
        self.battery_levels.clear();
        self.battery_charging.clear();
    }

    /// Trailing window of `visible_duration` minutes ending at `now`.
    ///
    /// Does not discard anything; retention is `trim`'s job.
    pub fn window(&self, now: DateTime<Local>, visible_duration: f64) -> VisibleWindow {
        let cutoff = now.checked_sub_signed(visible_span(visible_duration));
        let first = self.timestamps.front().copied();

        let start_index = match cutoff {
            Some(cutoff) => self.timestamps.partition_point(|t| *t < cutoff),
            None => 0,
        };
        let x_start = match (cutoff, first) {
            (Some(cutoff), Some(first)) => cutoff.max(first),
            (None, Some(first)) => first,
            (Some(cutoff), None) => cutoff,
            (None, None) => now,
        };

        VisibleWindow {
            start_index,
            end_index: self.len(),
            x_start,
            x_end: now,
        }
    }

    /// Index of the sample whose timestamp is closest to `query`. Ties go to
    /// the lowest index.
    pub fn nearest_index(&self, query: DateTime<Local>) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let ts = &self.timestamps;
        let above = ts.partition_point(|t| *t < query);
        if above == 0 {
            return Some(0);
        }
        let below = above - 1;

        let below_wins = above == ts.len() || (query - ts[below]) <= (ts[above] - query);
        if below_wins {
            // first occurrence of an equal timestamp
            let value = ts[below];
            Some(ts.partition_point(|t| *t < value))
        } else {
            Some(above)
        }
    }

    pub fn timestamp(&self, index: usize) -> Option<DateTime<Local>> {
        self.timestamps.get(index).copied()
    }

    /// Rebuild the sample stored at `index`.
    pub fn get(&self, index: usize) -> Option<Sample> {
        let timestamp = *self.timestamps.get(index)?;
        let battery = match (self.battery_levels[index], self.battery_charging[index]) {
            (Some(level), Some(charging)) => Some(BatteryReading::new(level, charging)),
            _ => None,
        };
        Some(Sample {
            timestamp,
            temperature: self.temperatures[index],
            cpu_load: self.cpu_loads[index],
            top_process: self.top_processes[index].clone(),
            battery,
        })
    }

    pub fn latest(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// `(x, y)` points of a metric over `range`; samples without a value are skipped.
    pub fn points(&self, metric: Metric, range: Range<usize>) -> Vec<(f64, f64)> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        (start..end)
            .filter_map(|i| {
                self.value(metric, i)
                    .map(|y| (epoch_seconds(&self.timestamps[i]), y))
            })
            .collect()
    }

    /// (min, max, last) of a metric over `range`, or `None` if it holds no values.
    pub fn stats(&self, metric: Metric, range: Range<usize>) -> Option<(f64, f64, f64)> {
        let mut mn = f64::INFINITY;
        let mut mx = f64::NEG_INFINITY;
        let mut last = None;
        let end = range.end.min(self.len());
        for i in range.start.min(end)..end {
            if let Some(y) = self.value(metric, i) {
                mn = mn.min(y);
                mx = mx.max(y);
                last = Some(y);
            }
        }
        last.map(|last| (mn, mx, last))
    }

    fn value(&self, metric: Metric, index: usize) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperatures[index],
            Metric::CpuLoad => Some(self.cpu_loads[index]),
            Metric::Battery => self.battery_levels[index].map(f64::from),
        }
    }

    #[cfg(test)]
    fn lengths(&self) -> [usize; 6] {
        [
            self.timestamps.len(),
            self.temperatures.len(),
            self.cpu_loads.len(),
            self.top_processes.len(),
            self.battery_levels.len(),
            self.battery_charging.len(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn base() -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn at(secs: i64) -> DateTime<Local> {
        base() + TimeDelta::seconds(secs)
    }

    fn sample(secs: i64) -> Sample {
        Sample::new(
            at(secs),
            Some(40.0 + secs as f64),
            secs as f64,
            format!("proc{}", secs),
            Some(BatteryReading::new(90, secs % 2 == 0)),
        )
    }

    fn store_at(times: &[i64]) -> SeriesStore {
        let mut store = SeriesStore::new(true);
        for t in times {
            store.append(sample(*t));
        }
        store
    }

    #[test]
    fn append_keeps_sequences_aligned() {
        let store = store_at(&[0, 1, 2]);
        assert_eq!(store.lengths(), [3; 6]);
        assert_eq!(store.get(1), Some(sample(1)));
        assert_eq!(store.latest(), Some(sample(2)));
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn append_never_goes_back_in_time() {
        let mut store = store_at(&[10]);
        store.append(sample(5));
        assert_eq!(store.timestamp(1), Some(at(10)));
        assert_eq!(store.get(1).unwrap().cpu_load, 5.0);
    }

    #[test]
    fn trim_evicts_oldest_one_at_a_time() {
        let mut store = SeriesStore::new(false);
        let cap = 3;
        for t in 0..10 {
            let before = store.len();
            store.append(sample(t));
            store.trim(cap);
            assert!(store.len() <= cap);
            assert!(store.len() + 1 >= before);
            assert_eq!(store.lengths()[0], store.lengths()[5]);
        }
        assert_eq!(store.len(), cap);
        // the oldest went first, including the very first sample
        assert_eq!(store.timestamp(0), Some(at(7)));
        assert_eq!(store.timestamp(2), Some(at(9)));
    }

    #[test]
    fn trim_removes_at_most_one_per_call() {
        let mut store = store_at(&[0, 1, 2, 3, 4, 5]);
        assert!(store.trim(2));
        assert_eq!(store.len(), 5);
        assert_eq!(store.timestamp(0), Some(at(1)));
    }

    #[test]
    fn zero_cap_is_unlimited() {
        let mut store = store_at(&[0, 1, 2, 3]);
        assert!(!store.trim(0));
        assert_eq!(store.enforce_cap(0), 0);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn enforce_cap_drops_all_excess() {
        let mut store = store_at(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(store.enforce_cap(2), 4);
        assert_eq!(store.lengths(), [2; 6]);
        assert_eq!(store.timestamp(0), Some(at(4)));
        assert_eq!(store.enforce_cap(2), 0);
    }

    #[test]
    fn reset_then_append() {
        let mut store = store_at(&[0, 1, 2]);
        store.reset();
        assert_eq!(store.lengths(), [0; 6]);
        assert!(store.latest().is_none());
        store.append(sample(5));
        assert_eq!(store.lengths(), [1; 6]);
        assert!(store.battery_installed());
    }

    #[test]
    fn window_clamps_left_bound_to_first_sample() {
        let store = store_at(&[100, 110, 120]);
        // 30 minutes back reaches past the first sample
        let w = store.window(at(120), 30.0);
        assert_eq!(w.range(), 0..3);
        assert_eq!(w.x_start, at(100));
        assert_eq!(w.x_end, at(120));
    }

    #[test]
    fn window_cuts_at_visible_duration() {
        let times: Vec<i64> = (0..=120).step_by(10).collect();
        let store = store_at(&times);
        // 0.5 minutes -> 30 seconds
        let w = store.window(at(120), 0.5);
        assert_eq!(w.start_index, 9);
        assert_eq!(store.timestamp(w.start_index), Some(at(90)));
        assert_eq!(w.x_start, at(90));
        assert_eq!(w.end_index, store.len());
    }

    #[test]
    fn window_start_is_monotonic_in_now() {
        let times: Vec<i64> = (0..200).step_by(3).collect();
        let store = store_at(&times);
        let first = store.timestamp(0).unwrap();
        let mut prev = 0;
        for now in 0..400 {
            let w = store.window(at(now), 1.0);
            assert!(w.start_index >= prev);
            assert!(w.x_start >= first);
            prev = w.start_index;
        }
        // everything aged out: empty range, still bounded by len
        assert!(store.window(at(10_000), 1.0).is_empty());
    }

    #[test]
    fn window_on_empty_store() {
        let store = SeriesStore::new(false);
        let w = store.window(at(0), 1.0);
        assert!(w.is_empty());
        assert_eq!(w.x_end, at(0));
    }

    #[test]
    fn nearest_index_picks_closest() {
        let store = store_at(&[0, 10, 20, 30]);
        assert_eq!(store.nearest_index(at(19)), Some(2));
        assert_eq!(store.nearest_index(at(-50)), Some(0));
        assert_eq!(store.nearest_index(at(99)), Some(3));
        assert_eq!(store.nearest_index(at(30)), Some(3));
    }

    #[test]
    fn nearest_index_ties_go_to_lowest_index() {
        let store = store_at(&[0, 10, 20, 30]);
        assert_eq!(store.nearest_index(at(15)), Some(1));

        let dupes = store_at(&[0, 5, 5, 5, 10]);
        assert_eq!(dupes.nearest_index(at(6)), Some(1));
        assert_eq!(dupes.nearest_index(at(5)), Some(1));

        assert_eq!(SeriesStore::new(false).nearest_index(at(0)), None);
    }

    #[test]
    fn points_and_stats_follow_the_range() {
        let mut store = store_at(&[0, 10, 20]);
        store.append(Sample::new(at(30), None, 90.0, "x", None));

        let temps = store.points(Metric::Temperature, 0..store.len());
        assert_eq!(temps.len(), 3);
        assert_eq!(temps[0], (epoch_seconds(&at(0)), 40.0));

        let loads = store.points(Metric::CpuLoad, 2..99);
        assert_eq!(loads, vec![(epoch_seconds(&at(20)), 20.0), (epoch_seconds(&at(30)), 90.0)]);

        assert_eq!(store.stats(Metric::CpuLoad, 0..4), Some((0.0, 90.0, 90.0)));
        assert_eq!(store.stats(Metric::Temperature, 0..4), Some((40.0, 60.0, 60.0)));
        assert_eq!(store.stats(Metric::Battery, 3..4), None);
    }
}
