//! src/menu.rs
//!
//! Settings menu model: three radio groups (Show, Refresh, Logs) in which
//! exactly one option can be selected at a time.

use crate::monitor::Command;
use crate::series::ConfigState;
use crate::series::config::{
    DURATION_PRESETS, REFRESH_PRESETS, RETENTION_PRESETS, duration_label, interval_label,
    retention_label,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Show,
    Refresh,
    Logs,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Show, Category::Refresh, Category::Logs];

    pub fn title(self) -> &'static str {
        match self {
            Category::Show => "Show",
            Category::Refresh => "Refresh",
            Category::Logs => "Logs",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadioOption {
    pub label: String,
    command: Command,
}

/// One category's mutually exclusive options.
#[derive(Clone, Debug)]
pub struct RadioGroup {
    category: Category,
    options: Vec<RadioOption>,
    /// `None` when the current setting is not one of the presets.
    selected: Option<usize>,
}

impl RadioGroup {
    fn new(category: Category, options: Vec<RadioOption>, selected: Option<usize>) -> Self {
        Self {
            category,
            options,
            selected,
        }
    }

    pub fn show(current_minutes: f64) -> Self {
        let options = DURATION_PRESETS
            .iter()
            .map(|&m| RadioOption {
                label: duration_label(m),
                command: Command::SetVisibleDuration(m),
            })
            .collect();
        let selected = DURATION_PRESETS.iter().position(|&m| m == current_minutes);
        Self::new(Category::Show, options, selected)
    }

    pub fn refresh(current_seconds: f64) -> Self {
        let options = REFRESH_PRESETS
            .iter()
            .map(|&s| RadioOption {
                label: interval_label(s),
                command: Command::SetRefreshInterval(s),
            })
            .collect();
        let selected = REFRESH_PRESETS.iter().position(|&s| s == current_seconds);
        Self::new(Category::Refresh, options, selected)
    }

    pub fn logs(current_cap: usize) -> Self {
        let options = RETENTION_PRESETS
            .iter()
            .map(|&cap| RadioOption {
                label: retention_label(cap),
                command: Command::SetRetentionCap(cap),
            })
            .collect();
        let selected = RETENTION_PRESETS.iter().position(|&cap| cap == current_cap);
        Self::new(Category::Logs, options, selected)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn options(&self) -> &[RadioOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Select `index`, deselecting its siblings. Returns the command to apply,
    /// or `None` if it was already selected or out of range.
    pub fn select(&mut self, index: usize) -> Option<Command> {
        let option = self.options.get(index)?;
        if self.selected == Some(index) {
            return None;
        }
        self.selected = Some(index);
        Some(option.command.clone())
    }

    /// Select the option after the current one, wrapping around.
    pub fn cycle(&mut self) -> Option<Command> {
        let next = match self.selected {
            Some(i) => (i + 1) % self.options.len(),
            None => 0,
        };
        self.select(next)
    }
}

/// All three groups plus keyboard focus.
#[derive(Clone, Debug)]
pub struct Menu {
    groups: [RadioGroup; 3],
    focus: usize,
    cursor: usize,
}

impl Menu {
    pub fn new(config: &ConfigState) -> Self {
        let groups = [
            RadioGroup::show(config.visible_duration()),
            RadioGroup::refresh(config.refresh_interval()),
            RadioGroup::logs(config.retention_cap()),
        ];
        let cursor = groups[0].selected().unwrap_or(0);
        Self {
            groups,
            focus: 0,
            cursor,
        }
    }

    pub fn groups(&self) -> &[RadioGroup] {
        &self.groups
    }

    pub fn group_mut(&mut self, category: Category) -> &mut RadioGroup {
        let idx = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        &mut self.groups[idx]
    }

    pub fn focused(&self) -> Category {
        self.groups[self.focus].category()
    }

    /// Highlighted option within the focused group.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move focus to the next category; the cursor lands on its selection.
    pub fn next_category(&mut self) {
        self.focus = (self.focus + 1) % self.groups.len();
        self.cursor = self.groups[self.focus].selected().unwrap_or(0);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.groups[self.focus].options().len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    /// Select the highlighted option of the focused group.
    pub fn activate(&mut self) -> Option<Command> {
        let cursor = self.cursor;
        self.groups[self.focus].select(cursor)
    }

    /// Cycle one group's selection directly (keyboard shortcut).
    pub fn cycle(&mut self, category: Category) -> Option<Command> {
        let command = self.group_mut(category).cycle();
        if self.focused() == category {
            if let Some(i) = self.groups[self.focus].selected() {
                self.cursor = i;
            }
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_preselected() {
        let menu = Menu::new(&ConfigState::default());
        let [show, refresh, logs] = menu.groups() else {
            panic!("three groups expected");
        };
        assert_eq!(show.options()[show.selected().unwrap()].label, "30 minutes");
        assert_eq!(refresh.options()[refresh.selected().unwrap()].label, "2 seconds");
        assert_eq!(logs.options()[logs.selected().unwrap()].label, "10000 logs");
        assert_eq!(menu.focused(), Category::Show);
        assert_eq!(menu.cursor(), 5);
    }

    #[test]
    fn selection_is_exclusive() {
        let mut group = RadioGroup::refresh(2.0);
        assert!(group.is_selected(5));

        assert_eq!(group.select(0), Some(Command::SetRefreshInterval(0.05)));
        let selected: Vec<usize> = (0..group.options().len())
            .filter(|i| group.is_selected(*i))
            .collect();
        assert_eq!(selected, vec![0]);

        // reselecting produces nothing, out of range is ignored
        assert_eq!(group.select(0), None);
        assert_eq!(group.select(99), None);
        assert!(group.is_selected(0));
    }

    #[test]
    fn non_preset_value_has_no_selection_until_chosen() {
        let mut group = RadioGroup::logs(1234);
        assert_eq!(group.selected(), None);
        assert_eq!(group.cycle(), Some(Command::SetRetentionCap(1_000)));
        assert_eq!(group.selected(), Some(0));
    }

    #[test]
    fn cycle_wraps_to_first_option() {
        let mut group = RadioGroup::logs(0);
        assert_eq!(group.selected(), Some(10));
        assert_eq!(group.options()[10].label, "Unlimited");
        assert_eq!(group.cycle(), Some(Command::SetRetentionCap(1_000)));
    }

    #[test]
    fn keyboard_navigation() {
        let mut menu = Menu::new(&ConfigState::default());
        menu.next_category();
        assert_eq!(menu.focused(), Category::Refresh);
        assert_eq!(menu.cursor(), 5);

        menu.move_cursor(-1);
        assert_eq!(menu.activate(), Some(Command::SetRefreshInterval(1.0)));
        assert_eq!(menu.activate(), None);

        menu.move_cursor(-5);
        assert_eq!(menu.cursor(), 10);

        menu.next_category();
        menu.next_category();
        assert_eq!(menu.focused(), Category::Show);
    }

    #[test]
    fn shortcut_cycle_keeps_cursor_on_selection() {
        let mut menu = Menu::new(&ConfigState::default());
        assert_eq!(menu.cycle(Category::Show), Some(Command::SetVisibleDuration(60.0)));
        assert_eq!(menu.cursor(), 6);

        // cycling another group leaves the focused cursor alone
        assert_eq!(menu.cycle(Category::Logs), Some(Command::SetRetentionCap(20_000)));
        assert_eq!(menu.cursor(), 6);
    }
}
