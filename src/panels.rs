//! src/panels.rs
//!
//! Renderer panels, one per screen region, and re-exports.

pub mod controls;
pub mod graph;
pub mod history;
pub mod hover;
pub mod info;
pub mod menu;
pub mod title;

pub use controls::ControlsPanel;
pub use graph::GraphPanel;
pub use history::HistoryPanel;
pub use hover::HoverPanel;
pub use info::InfoPanel;
pub use menu::MenuPanel;
pub use title::TitlePanel;
