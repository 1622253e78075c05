//! src/ui.rs
//!
//! Layout tree and the `Panel` trait the renderer is built from.

pub mod node;

pub use node::{Node, Panel, group, leaf};
