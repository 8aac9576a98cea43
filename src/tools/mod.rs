use egui::CursorIcon;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, CompositeOp};

mod picker;
pub use picker::{CanvasEyedropper, Eyedropper, PendingPick, PickError, PickFuture, PickResult};

/// Stroke width shared by the pen, line and shape tools
pub const PEN_WIDTH: f32 = 2.0;
/// Stroke width of the eraser
pub const ERASER_WIDTH: f32 = 6.0;

/// The tool currently driving the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
    Rectangle,
    RectangleFilled,
    Ellipse,
    EllipseFilled,
    Line,
    /// Samples a color, then hands control back to the previous mode
    Picker,
    /// Wipes the canvas, then switches to `Draw`
    Clear,
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Draw => "draw",
            ToolMode::Erase => "erase",
            ToolMode::Rectangle => "rectangle",
            ToolMode::RectangleFilled => "filled rectangle",
            ToolMode::Ellipse => "ellipse",
            ToolMode::EllipseFilled => "filled ellipse",
            ToolMode::Line => "line",
            ToolMode::Picker => "picker",
            ToolMode::Clear => "clear",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolMode::Draw => "✏",
            ToolMode::Erase => "⌫",
            ToolMode::Rectangle => "▭",
            ToolMode::RectangleFilled => "■",
            ToolMode::Ellipse => "◯",
            ToolMode::EllipseFilled => "⬤",
            ToolMode::Line => "╱",
            ToolMode::Picker => "💧",
            ToolMode::Clear => "🗑",
        }
    }

    /// All modes in toolbar order
    pub fn all() -> &'static [ToolMode] {
        &[
            ToolMode::Draw,
            ToolMode::Erase,
            ToolMode::Line,
            ToolMode::Rectangle,
            ToolMode::RectangleFilled,
            ToolMode::Ellipse,
            ToolMode::EllipseFilled,
            ToolMode::Picker,
            ToolMode::Clear,
        ]
    }

    /// Modes that leave on their own once their effect is done
    pub fn is_transient(&self) -> bool {
        matches!(self, ToolMode::Picker | ToolMode::Clear)
    }

    /// Draw and Erase paint every segment straight onto the canvas
    pub fn is_freehand(&self) -> bool {
        matches!(self, ToolMode::Draw | ToolMode::Erase)
    }

    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            ToolMode::Rectangle
                | ToolMode::RectangleFilled
                | ToolMode::Ellipse
                | ToolMode::EllipseFilled
        )
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, ToolMode::RectangleFilled | ToolMode::EllipseFilled)
    }

    /// Surface configuration applied when this mode is selected.
    ///
    /// `None` for transient modes, which never configure the canvas.
    pub fn config(&self) -> Option<ModeConfig> {
        let shape = ModeConfig {
            line_width: PEN_WIDTH,
            composite: Some(CompositeOp::SourceOver),
            cursor: Some(CursorIcon::ResizeNorthWest),
            fill_from_color: false,
        };
        match self {
            ToolMode::Draw => Some(ModeConfig {
                cursor: Some(CursorIcon::Crosshair),
                ..shape
            }),
            ToolMode::Rectangle | ToolMode::Ellipse => Some(shape),
            ToolMode::RectangleFilled | ToolMode::EllipseFilled => Some(ModeConfig {
                fill_from_color: true,
                ..shape
            }),
            // The line tool keeps whatever compositing the previous tool left behind
            ToolMode::Line => Some(ModeConfig {
                composite: None,
                cursor: None,
                ..shape
            }),
            ToolMode::Erase => Some(ModeConfig {
                line_width: ERASER_WIDTH,
                composite: Some(CompositeOp::DestinationOut),
                cursor: None,
                fill_from_color: false,
            }),
            ToolMode::Picker | ToolMode::Clear => None,
        }
    }
}

/// Per-mode surface settings; `None` fields leave the canvas untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeConfig {
    pub line_width: f32,
    pub composite: Option<CompositeOp>,
    pub cursor: Option<CursorIcon>,
    /// Copy the current color into the fill color
    pub fill_from_color: bool,
}

impl ModeConfig {
    /// Applies the drawing settings to the canvas, returning the cursor to show if it changes
    pub fn apply(&self, canvas: &mut Canvas, color: egui::Color32) -> Option<CursorIcon> {
        canvas.set_line_width(self.line_width);
        if let Some(op) = self.composite {
            canvas.set_composite(op);
        }
        if self.fill_from_color {
            canvas.set_fill_color(color);
        }
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_transient_modes_have_no_config() {
        for mode in ToolMode::all() {
            assert_eq!(mode.config().is_none(), mode.is_transient(), "{mode:?}");
        }
    }

    #[test]
    fn test_erase_config() {
        let config = ToolMode::Erase.config().unwrap();
        assert_eq!(config.line_width, ERASER_WIDTH);
        assert_eq!(config.composite, Some(CompositeOp::DestinationOut));
    }

    #[test]
    fn test_filled_config_copies_color() {
        let mut canvas = Canvas::new(4, 4);
        let cursor = ToolMode::EllipseFilled
            .config()
            .unwrap()
            .apply(&mut canvas, Color32::GREEN);

        assert_eq!(canvas.fill_color(), Color32::GREEN);
        assert_eq!(canvas.line_width(), PEN_WIDTH);
        assert_eq!(cursor, Some(CursorIcon::ResizeNorthWest));
    }

    #[test]
    fn test_line_config_keeps_composite() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_composite(CompositeOp::DestinationOut);
        let cursor = ToolMode::Line.config().unwrap().apply(&mut canvas, Color32::RED);

        assert_eq!(canvas.composite(), CompositeOp::DestinationOut);
        assert_eq!(canvas.line_width(), PEN_WIDTH);
        assert_eq!(cursor, None);
    }
}
