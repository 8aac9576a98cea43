use egui::Pos2;

mod handler;
mod state;

pub use handler::InputHandler;
pub use state::{InputState, ModifierState};

/// Which device produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A position relative to the canvas origin.
///
/// Drawing uses the raw position, which may be negative or lie past the
/// canvas edge; only the coordinate readout is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub position: Pos2,
}

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Pos2::new(x, y),
        }
    }

    /// Mouse positions are used exactly as delivered
    pub fn from_mouse(screen: Pos2, canvas_origin: Pos2) -> Self {
        Self {
            position: (screen - canvas_origin).to_pos2(),
        }
    }

    /// Touch positions are snapped to whole pixels
    pub fn from_touch(screen: Pos2, canvas_origin: Pos2) -> Self {
        let offset = screen - canvas_origin;
        Self::new(offset.x.round(), offset.y.round())
    }

    /// Non-negative whole-pixel coordinates for display
    pub fn display(&self) -> [u32; 2] {
        [
            self.position.x.max(0.0).round() as u32,
            self.position.y.max(0.0).round() as u32,
        ]
    }
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Constrains shapes to squares and circles while held
    Shift,
    /// Control or Command; enables the undo/redo shortcuts while held
    Combo,
    Z,
    Y,
    Escape,
}

/// Input normalized from mouse, touch and keyboard sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button press or first touch on the canvas
    PointerDown {
        location: CanvasPoint,
        source: PointerSource,
    },
    /// Pointer or tracked touch moved over the canvas
    PointerMove {
        location: CanvasPoint,
        source: PointerSource,
    },
    /// Primary button released or tracked touch lifted
    PointerUp { source: PointerSource },
    /// Mouse left the canvas
    PointerLeave,
    /// The platform aborted the tracked touch
    TouchCancel,
    KeyDown(Key),
    KeyUp(Key),
}
