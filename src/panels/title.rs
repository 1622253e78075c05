//! src/panels/title.rs
//!
//! Header panel: application name and sampling status.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel {
    pub title: String,
    pub status: String,
}

impl TitlePanel {
    pub fn new(title: &str, status: String) -> Self {
        Self {
            title: title.to_string(),
            status,
        }
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::raw(self.title.clone()),
            Span::raw("  "),
            Span::styled(self.status.clone(), Style::default().fg(Color::DarkGray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
