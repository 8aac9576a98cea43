pub mod context;
mod editor_state;
mod persistence;
mod session;

pub use context::EditorContext;
pub use editor_state::EditorState;
pub use persistence::{
    MAX_CANVAS_SIDE, PaintSettings, SETTINGS_ENV, SettingsError, SettingsResult, hex_color,
    parse_hex_color,
};
pub use session::DrawSession;
