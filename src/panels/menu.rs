//! src/panels/menu.rs
//!
//! Settings menu panel: one column per radio group, selected option marked,
//! keyboard cursor highlighted in the focused group.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::menu::Menu;

pub struct MenuPanel<'a> {
    pub menu: &'a Menu,
}

impl<'a> MenuPanel<'a> {
    pub fn new(menu: &'a Menu) -> Self {
        Self { menu }
    }
}

impl crate::ui::Panel for MenuPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let groups = self.menu.groups();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, groups.len() as u32); groups.len()])
            .split(area);

        for (group, column) in groups.iter().zip(columns.iter()) {
            let focused = group.category() == self.menu.focused();
            let lines: Vec<Line> = group
                .options()
                .iter()
                .enumerate()
                .map(|(i, opt)| {
                    let mark = if group.is_selected(i) { "(•)" } else { "( )" };
                    let mut style = Style::default();
                    if group.is_selected(i) {
                        style = style.fg(Color::Green);
                    }
                    if focused && i == self.menu.cursor() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Line::styled(format!("{} {}", mark, opt.label), style)
                })
                .collect();

            let mut block = Block::default()
                .title(group.category().title())
                .borders(Borders::ALL);
            if focused {
                block = block.border_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
            f.render_widget(Paragraph::new(lines).block(block), *column);
        }
    }
}
