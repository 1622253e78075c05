//! src/panels/info.rs
//!
//! Legend panel: latest readings coloured by severity band, plus min/max/last
//! over the visible window.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::graph::{BATTERY_COLOR, LOAD_COLOR, TEMPERATURE_COLOR};
use crate::sampling::RenderFrame;
use crate::series::{BatteryBand, LoadBand, Metric, SeriesStore, TemperatureBand};

const ORANGE: Color = Color::Rgb(255, 165, 0);

pub fn temperature_color(band: TemperatureBand) -> Color {
    match band {
        TemperatureBand::Cold => Color::Blue,
        TemperatureBand::Normal => Color::White,
        TemperatureBand::Warm => ORANGE,
        TemperatureBand::Hot => Color::Red,
    }
}

pub fn load_color(band: LoadBand) -> Color {
    match band {
        LoadBand::Normal => Color::White,
        LoadBand::Elevated => ORANGE,
        LoadBand::High => Color::Red,
    }
}

pub fn battery_color(band: BatteryBand) -> Color {
    match band {
        BatteryBand::Critical => Color::Red,
        BatteryBand::Low => ORANGE,
        BatteryBand::Normal => Color::White,
    }
}

pub struct InfoPanel<'a> {
    pub store: &'a SeriesStore,
    pub frame: Option<&'a RenderFrame>,
}

impl<'a> InfoPanel<'a> {
    pub fn new(store: &'a SeriesStore, frame: Option<&'a RenderFrame>) -> Self {
        Self { store, frame }
    }

    fn legend(&self, frame: &RenderFrame) -> Vec<Line<'static>> {
        let Some(latest) = self.store.latest() else {
            return Vec::new();
        };
        let bands = frame.bands;
        let marker = |color: Color| Span::styled("━━ ", Style::default().fg(color));

        let temp_text = match latest.temperature {
            Some(t) => {
                let cold = if bands.temperature == Some(TemperatureBand::Cold) {
                    " Bit cold, huh!?"
                } else {
                    ""
                };
                format!("CPUTemp: {}°C{}", t as i64, cold)
            }
            None => "CPUTemp: n/a".to_string(),
        };
        let temp_style = bands
            .temperature
            .map(|b| Style::default().fg(temperature_color(b)))
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(vec![
                marker(TEMPERATURE_COLOR),
                Span::styled(temp_text, temp_style),
            ]),
            Line::from(vec![
                marker(LOAD_COLOR),
                Span::styled(
                    format!("CPULoad: {:.1}% ({})", latest.cpu_load, latest.top_process),
                    Style::default().fg(load_color(bands.load)),
                ),
            ]),
        ];

        if let (true, Some(b), Some(band)) =
            (self.store.battery_installed(), latest.battery, bands.battery)
        {
            lines.push(Line::from(vec![
                marker(BATTERY_COLOR),
                Span::styled(
                    format!("Battery: {}% {}", b.level, b.charging_label()),
                    Style::default().fg(battery_color(band)),
                ),
            ]));
        }
        lines
    }

    fn stats_line(&self, frame: &RenderFrame, metric: Metric, name: &str) -> Option<Line<'static>> {
        let (mn, mx, last) = self.store.stats(metric, frame.window.range())?;
        Some(Line::from(Span::styled(
            format!("{}  min {:.1}  max {:.1}  last {:.1}", name, mn, mx, last),
            Style::default().fg(Color::DarkGray),
        )))
    }
}

impl crate::ui::Panel for InfoPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = match self.frame {
            Some(frame) => {
                let mut lines = self.legend(frame);
                lines.push(Line::raw(""));
                lines.extend(self.stats_line(frame, Metric::Temperature, "Temp"));
                lines.extend(self.stats_line(frame, Metric::CpuLoad, "Load"));
                if self.store.battery_installed() {
                    lines.extend(self.stats_line(frame, Metric::Battery, "Batt"));
                }
                lines
            }
            None => vec![Line::raw("No data yet")],
        };

        let block = Block::default()
            .title(Span::styled("Info", Style::default().add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
