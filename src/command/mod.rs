mod history;

use egui::Color32;

use crate::tools::ToolMode;

pub use history::History;

/// Discrete user actions from the toolbar and keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Select a tool, including the transient Picker and Clear tools
    SelectMode(ToolMode),
    /// Set the current stroke and fill color
    SetColor(Color32),
    Undo,
    Redo,
}
