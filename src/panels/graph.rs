//! src/panels/graph.rs
//!
//! Graph panel: renders temperature, load and battery over the visible window
//! on a fixed 0..101 y-range, plus the hover cursor line.
//!
//! The panel records where the plot landed so pointer events can be mapped
//! back to timestamps with [`column_to_timestamp`].

use std::cell::Cell;

use chrono::{DateTime, Local, TimeDelta};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::series::store::epoch_seconds;
use crate::series::{Metric, SeriesStore, VisibleWindow};

pub const TEMPERATURE_COLOR: Color = Color::Red;
pub const LOAD_COLOR: Color = Color::Blue;
pub const BATTERY_COLOR: Color = Color::Green;
const CURSOR_COLOR: Color = Color::LightRed;

const Y_MAX: f64 = 101.0;
const Y_LABELS: [&str; 5] = ["0", "25", "50", "75", "100"];
/// x labels plus the axis line.
const X_GUTTER: u16 = 2;
/// Narrowest x span drawn, in seconds.
const MIN_X_SPAN: f64 = 1.0;

pub struct GraphPanel<'a> {
    pub store: &'a SeriesStore,
    pub window: Option<VisibleWindow>,
    pub cursor: Option<DateTime<Local>>,
    /// Written on every draw; `None` while there is nothing plotted.
    pub plot_area: &'a Cell<Option<Rect>>,
}

impl<'a> GraphPanel<'a> {
    pub fn new(
        store: &'a SeriesStore,
        window: Option<VisibleWindow>,
        plot_area: &'a Cell<Option<Rect>>,
    ) -> Self {
        Self {
            store,
            window,
            cursor: None,
            plot_area,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<DateTime<Local>>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Plotting area inside the chart block, laid out as `Chart` does it.
    ///
    /// The left gutter holds the widest y label or the part of the first x
    /// label left of the axis, at most a third of the width, then the axis.
    fn plot_rect(inner: Rect, first_x_label: &str) -> Rect {
        let y_labels = Y_LABELS
            .iter()
            .map(|l| Line::from(*l).width())
            .max()
            .unwrap_or(0);
        let x_overhang = Line::from(first_x_label).width().saturating_sub(1);
        let gutter = u16::try_from(y_labels.max(x_overhang))
            .unwrap_or(u16::MAX)
            .min(inner.width / 3);

        let mut x = inner.x + gutter;
        if x + 1 < inner.right() {
            x += 1;
        }
        Rect {
            x,
            y: inner.y,
            width: inner.right().saturating_sub(x),
            height: inner.height.saturating_sub(X_GUTTER),
        }
    }

    fn x_labels(window: &VisibleWindow) -> Vec<String> {
        let mid = window.x_start + (window.x_end - window.x_start) / 2;
        [window.x_start, mid, window.x_end]
            .iter()
            .map(|t| t.format("%H:%M:%S").to_string())
            .collect()
    }
}

impl crate::ui::Panel for GraphPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Sensors").borders(Borders::ALL);

        let window = match self.window {
            Some(w) if !w.is_empty() => w,
            _ => {
                self.plot_area.set(None);
                let waiting = Paragraph::new("Waiting for samples...")
                    .alignment(Alignment::Center)
                    .block(block);
                f.render_widget(waiting, area);
                return;
            }
        };

        // Keep dataset vectors alive until Chart::new() uses them
        let range = window.range();
        let temps = self.store.points(Metric::Temperature, range.clone());
        let loads = self.store.points(Metric::CpuLoad, range.clone());
        let battery = if self.store.battery_installed() {
            self.store.points(Metric::Battery, range)
        } else {
            Vec::new()
        };

        let [xmin, xmax] = chart_bounds(&window);
        let x_labels = GraphPanel::x_labels(&window);
        let first_x_label = x_labels.first().cloned().unwrap_or_default();
        let cursor_line: Vec<(f64, f64)> = self
            .cursor
            .map(|t| {
                let x = epoch_seconds(&t);
                vec![(x, 0.0), (x, Y_MAX)]
            })
            .unwrap_or_default();

        let mut datasets: Vec<Dataset> = vec![
            series("Temperature (°C)", TEMPERATURE_COLOR, &temps),
            series("CPU Load (%)", LOAD_COLOR, &loads),
        ];
        if self.store.battery_installed() {
            datasets.push(series("Battery (%)", BATTERY_COLOR, &battery));
        }
        if !cursor_line.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(CURSOR_COLOR))
                    .data(cursor_line.as_slice()),
            );
        }

        let inner = block.inner(area);
        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Blue))
                    .bounds([xmin, xmax])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Blue))
                    .bounds([0.0, Y_MAX])
                    .labels(Y_LABELS.to_vec()),
            );

        f.render_widget(chart, area);
        self.plot_area
            .set(Some(GraphPanel::plot_rect(inner, &first_x_label)));
    }
}

fn series<'d>(name: &'static str, color: Color, data: &'d [(f64, f64)]) -> Dataset<'d> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

/// x-axis bounds for `window`, widened to at least `MIN_X_SPAN`.
pub fn chart_bounds(window: &VisibleWindow) -> [f64; 2] {
    let [xmin, xmax] = window.x_bounds();
    [xmin.min(xmax - MIN_X_SPAN), xmax]
}

/// Map a terminal column inside `plot` to a timestamp on the drawn x-axis.
///
/// Returns `None` for columns outside the plot.
pub fn column_to_timestamp(
    plot: Rect,
    column: u16,
    window: &VisibleWindow,
) -> Option<DateTime<Local>> {
    if plot.width == 0 || column < plot.x || column >= plot.x + plot.width {
        return None;
    }
    let frac = if plot.width == 1 {
        1.0
    } else {
        f64::from(column - plot.x) / f64::from(plot.width - 1)
    };
    let [xmin, xmax] = chart_bounds(window);
    let back = (xmax - xmin) * (1.0 - frac);
    let offset = TimeDelta::try_milliseconds((back * 1000.0).round() as i64)?;
    window.x_end.checked_sub_signed(offset)
}
