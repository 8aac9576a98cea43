#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod snapshot;
pub mod state;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{Canvas, CompositeOp};
pub use command::{Command, History};
pub use error::{PaintError, PaintResult};
pub use file_handler::{ExportError, ExportFormat, FileHandler};
pub use input::{CanvasPoint, InputEvent, InputHandler};
pub use snapshot::Snapshot;
pub use state::{EditorContext, EditorState, PaintSettings};
pub use tools::ToolMode;
