//! src/panels/controls.rs
//!
//! Footer listing key bindings, keys highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// `(key, action)` pairs.
pub type Bindings = &'static [(&'static str, &'static str)];

pub const FULL_BINDINGS: Bindings = &[
    ("TAB", "menu"),
    ("↑↓", "move"),
    ("ENTER", "select"),
    ("D/R/L", "show/refresh/logs"),
    ("X", "reset"),
    ("H", "hide"),
    ("Q", "quit"),
];

pub const HIDDEN_BINDINGS: Bindings = &[("H", "restore"), ("Q", "quit")];

pub struct ControlsPanel {
    pub bindings: Bindings,
    pub title: String,
}

impl ControlsPanel {
    pub fn new(bindings: Bindings, title: &str) -> Self {
        Self {
            bindings,
            title: title.to_string(),
        }
    }

    fn line(&self) -> Line<'static> {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let mut spans = Vec::with_capacity(self.bindings.len() * 3);
        for (i, (k, action)) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*k, key));
            spans.push(Span::raw(format!("={}", action)));
        }
        Line::from(spans)
    }
}

impl crate::ui::Panel for ControlsPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.line()).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL),
        );
        f.render_widget(p, area);
    }
}
