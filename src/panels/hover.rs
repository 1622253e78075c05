//! src/panels/hover.rs
//!
//! Cursor readout: details of the sample nearest the mouse.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::monitor::Readout;

pub struct HoverPanel {
    pub readout: Option<Readout>,
}

impl HoverPanel {
    pub fn new(readout: Option<Readout>) -> Self {
        Self { readout }
    }
}

impl crate::ui::Panel for HoverPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = match &self.readout {
            Some(r) => r.lines().into_iter().map(Line::raw).collect(),
            None => vec![Line::styled(
                "Move the mouse over the chart",
                Style::default().fg(Color::DarkGray),
            )],
        };
        let block = Block::default().title("Cursor").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
