//! src/panels/history.rs
//!
//! History panel: renders the most recent retained samples as a scrolling list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::series::SeriesStore;

/// Shows as many of the newest samples as fit, latest highlighted.
pub struct HistoryPanel<'a> {
    pub store: &'a SeriesStore,
}

impl<'a> HistoryPanel<'a> {
    /// Create a new HistoryPanel.
    pub fn new(store: &'a SeriesStore) -> Self {
        Self { store }
    }
}

impl crate::ui::Panel for HistoryPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        let hlen = self.store.len();
        let start = hlen.saturating_sub(height);
        let last_index = hlen.saturating_sub(1);

        let lines: Vec<Line> = (start..hlen)
            .filter_map(|i| self.store.get(i).map(|s| (i, s)))
            .map(|(i, s)| {
                let value_style = if i == last_index {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let temp = s
                    .temperature
                    .map(|t| format!("{:>5.1}°C", t))
                    .unwrap_or_else(|| "  n/a  ".to_string());
                let mut spans = vec![
                    Span::styled(format!("{:>6} ", i), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        s.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(temp, value_style),
                    Span::raw("  "),
                    Span::styled(format!("{:>5.1}%", s.cpu_load), value_style),
                ];
                if let Some(b) = s.battery {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(format!("{:>3}%", b.level), value_style));
                }
                spans.push(Span::raw(format!("  {}", s.top_process)));
                Line::from(spans)
            })
            .collect();

        let title = format!("History ({} samples)", hlen);
        let block = Block::default().title(title).borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
