//! The tool-mode state machine of the paint editor.
//!
//! Any mode can be selected from any other. Two modes are transient and
//! leave on their own once their effect is done:
//!
//! ```text
//!   ┌────────────────────────────┐  select   ┌──────────┐
//!   │ Draw  Erase  Line          ├──────────►│  Clear   │
//!   │ Rectangle  RectangleFilled │◄──────────┤          │
//!   │ Ellipse  EllipseFilled     │  to Draw  └──────────┘
//!   │                            │
//!   │                            │  select   ┌──────────┐  cancel
//!   │                            ├──────────►│  Picker  ├─────────┐
//!   │                            │◄──────────┤          │◄────────┘
//!   └────────────────────────────┘  picked   └──────────┘
//! ```
//!
//! `EditorState` only records the transitions; the `EditorContext` performs
//! their side effects on the canvas.

use egui::CursorIcon;

use crate::tools::ToolMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorState {
    current: ToolMode,
    previous: ToolMode,
    /// Most recent non-transient mode; a successful pick returns here
    last_tool: ToolMode,
    cursor: CursorIcon,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(ToolMode::Draw)
    }
}

impl EditorState {
    /// Starts in `initial`; transient modes fall back to `Draw`
    pub fn new(initial: ToolMode) -> Self {
        let initial = if initial.is_transient() {
            ToolMode::Draw
        } else {
            initial
        };
        Self {
            current: initial,
            previous: initial,
            last_tool: initial,
            cursor: CursorIcon::Default,
        }
    }

    /// Moves to `mode`, returning the mode that was active before
    pub fn transition(&mut self, mode: ToolMode) -> ToolMode {
        self.previous = self.current;
        self.current = mode;
        if !mode.is_transient() {
            self.last_tool = mode;
        }
        self.previous
    }

    pub fn current(&self) -> ToolMode {
        self.current
    }

    pub fn previous(&self) -> ToolMode {
        self.previous
    }

    pub fn last_tool(&self) -> ToolMode {
        self.last_tool
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }
}
