//! The editing session: canvas, history, tool mode and the gesture in progress.
//!
//! Hosts drive the context with two kinds of input:
//! - `Command`s from the toolbar (`execute`)
//! - normalized `InputEvent`s from the canvas (`handle_input`)
//!
//! The only asynchronous piece is the eyedropper. Selecting the picker opens
//! a pick and stores its future; `poll_picker` checks it once per frame and
//! applies the sampled color when it resolves.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sketchpad::command::Command;
//! use sketchpad::state::EditorContext;
//! use sketchpad::tools::{CanvasEyedropper, ToolMode};
//!
//! let mut editor = EditorContext::new(64, 64, Arc::new(CanvasEyedropper::new()));
//! editor.execute(Command::SelectMode(ToolMode::Rectangle)).unwrap();
//! assert_eq!(editor.mode(), ToolMode::Rectangle);
//! ```

use egui::{Color32, CursorIcon, Pos2};
use std::sync::Arc;

use super::{DrawSession, EditorState, PaintSettings, SettingsResult};
use crate::canvas::Canvas;
use crate::command::{Command, History};
use crate::error::{PaintError, PaintResult};
use crate::input::{CanvasPoint, InputEvent, InputState, Key, ModifierState};
use crate::renderer;
use crate::tools::{Eyedropper, PendingPick, PickError, PickResult, ToolMode};

pub struct EditorContext {
    canvas: Canvas,
    history: History,
    state: EditorState,
    session: DrawSession,
    input: InputState,
    /// The color chosen by the user or the eyedropper
    color: Color32,
    eyedropper: Arc<dyn Eyedropper>,
    pending_pick: Option<PendingPick>,
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("canvas", &self.canvas)
            .field("history", &self.history)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("input", &self.input)
            .field("color", &self.color)
            .field("pending_pick", &self.pending_pick)
            .finish_non_exhaustive()
    }
}

impl EditorContext {
    /// Creates a context over a transparent canvas, in `Draw` mode with black ink
    pub fn new(width: u32, height: u32, eyedropper: Arc<dyn Eyedropper>) -> Self {
        Self::build(Canvas::new(width, height), ToolMode::Draw, Color32::BLACK, eyedropper)
    }

    pub fn with_settings(
        settings: &PaintSettings,
        eyedropper: Arc<dyn Eyedropper>,
    ) -> SettingsResult<Self> {
        settings.validate()?;
        Ok(Self::build(
            Canvas::new(settings.canvas_width, settings.canvas_height),
            settings.start_mode(),
            settings.color32()?,
            eyedropper,
        ))
    }

    fn build(
        canvas: Canvas,
        mode: ToolMode,
        color: Color32,
        eyedropper: Arc<dyn Eyedropper>,
    ) -> Self {
        let mut context = Self {
            canvas,
            history: History::new(),
            state: EditorState::new(mode),
            session: DrawSession::default(),
            input: InputState::default(),
            color,
            eyedropper,
            pending_pick: None,
        };
        context.set_color(color);
        context.apply_config(context.state.current());
        context
    }

    pub fn execute(&mut self, command: Command) -> PaintResult<()> {
        match command {
            Command::SelectMode(mode) => self.set_mode(mode),
            Command::SetColor(color) => {
                self.set_color(color);
                Ok(())
            }
            Command::Undo => {
                self.undo();
                Ok(())
            }
            Command::Redo => {
                self.redo();
                Ok(())
            }
        }
    }

    /// Switches tools and runs the selected mode's entry behavior.
    ///
    /// Any pick still pending is abandoned first. Picker fails with
    /// `PickerUnavailable` when the host has no eyedropper, leaving the mode as it was.
    pub fn set_mode(&mut self, mode: ToolMode) -> PaintResult<()> {
        if mode == ToolMode::Picker && !self.eyedropper.is_available() {
            return Err(PaintError::PickerUnavailable);
        }
        self.abandon_pick();

        let previous = self.state.transition(mode);
        log::debug!("Mode {} -> {}", previous.name(), mode.name());

        match mode {
            ToolMode::Picker => {
                let pick = PendingPick::new(self.eyedropper.open(), self.state.last_tool());
                self.pending_pick = Some(pick);
                Ok(())
            }
            ToolMode::Clear => {
                self.clear_canvas();
                self.set_mode(ToolMode::Draw)
            }
            _ => {
                self.apply_config(mode);
                Ok(())
            }
        }
    }

    fn apply_config(&mut self, mode: ToolMode) {
        let Some(config) = mode.config() else {
            return;
        };
        if let Some(cursor) = config.apply(&mut self.canvas, self.color) {
            self.state.set_cursor(cursor);
        }
    }

    /// Sets the current color along with the canvas stroke and fill colors.
    ///
    /// The current color is always opaque; any alpha is dropped.
    pub fn set_color(&mut self, color: Color32) {
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        let color = Color32::from_rgb(r, g, b);
        self.color = color;
        self.canvas.set_stroke_color(color);
        self.canvas.set_fill_color(color);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.canvas)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.canvas)
    }

    /// Wipes the canvas as an undoable step.
    /// Does nothing when there is no history yet.
    pub fn clear_canvas(&mut self) -> bool {
        if !self.history.can_undo() {
            log::debug!("Clear skipped, nothing drawn");
            return false;
        }
        self.history.push(self.canvas.snapshot());
        self.canvas.clear();
        log::info!("Canvas cleared");
        true
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { location, .. } => {
                self.input.readout = Some(location.display());
                if self.pending_pick.is_some() {
                    self.sample(location);
                } else if !self.mode().is_transient() {
                    self.begin_gesture(location.position);
                }
            }
            InputEvent::PointerMove { location, .. } => {
                self.input.readout = Some(location.display());
                renderer::render_preview(
                    &mut self.canvas,
                    self.state.current(),
                    &mut self.session,
                    location.position,
                    self.input.modifiers.constrain,
                );
            }
            InputEvent::PointerUp { .. } | InputEvent::TouchCancel => self.session.end(),
            InputEvent::PointerLeave => {
                self.session.end();
                self.input.readout = None;
            }
            InputEvent::KeyDown(Key::Escape) => self.cancel_pick(),
            InputEvent::KeyDown(key) => {
                if let Some(command) = self.input.modifiers.key_down(key) {
                    if let Err(err) = self.execute(command) {
                        log::warn!("Shortcut {:?} failed: {}", command, err);
                    }
                }
            }
            InputEvent::KeyUp(key) => self.input.modifiers.key_up(key),
        }
    }

    fn begin_gesture(&mut self, position: Pos2) {
        let reference = self.canvas.snapshot();
        self.history.push(reference.clone());
        self.session.begin(position, reference);
    }

    /// Offers the visible color under `location` to the open pick
    fn sample(&mut self, location: CanvasPoint) {
        let Pos2 { x, y } = location.position.floor();
        if x < 0.0 || y < 0.0 {
            return;
        }
        let Some(pixel) = self.canvas.image().get_pixel_checked(x as u32, y as u32) else {
            return;
        };
        if self.eyedropper.offer_sample(over_white(pixel.0)) {
            self.poll_picker();
        }
    }

    /// Checks the pending pick without blocking and applies its outcome.
    ///
    /// A sampled color becomes the current color and the editor returns to
    /// the last drawing tool used before the picker. That is `last_tool`
    /// rather than `previous_mode`, which is `Picker` itself after the picker
    /// is selected twice. Cancellation keeps the picker selected.
    pub fn poll_picker(&mut self) -> Option<PickResult> {
        let result = self.pending_pick.as_mut()?.poll()?;
        let return_to = self
            .pending_pick
            .take()
            .map_or(ToolMode::Draw, |pick| pick.return_to());

        match &result {
            Ok(color) => {
                log::info!("Picked color {:?}", color);
                self.set_color(*color);
                if let Err(err) = self.set_mode(return_to) {
                    log::warn!("Could not return to {}: {}", return_to.name(), err);
                }
            }
            Err(PickError::Cancelled) => log::debug!("Color pick cancelled"),
            Err(err) => log::warn!("Color pick failed: {}", err),
        }
        Some(result)
    }

    /// Cancels an open pick; the editor stays in picker mode
    pub fn cancel_pick(&mut self) {
        if self.pending_pick.is_some() {
            self.eyedropper.cancel();
            self.poll_picker();
        }
    }

    fn abandon_pick(&mut self) {
        if self.pending_pick.take().is_some() {
            self.eyedropper.cancel();
            log::debug!("Abandoned pending color pick");
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> ToolMode {
        self.state.current()
    }

    pub fn previous_mode(&self) -> ToolMode {
        self.state.previous()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn cursor(&self) -> CursorIcon {
        self.state.cursor()
    }

    /// Pointer position over the canvas, `None` when the pointer is elsewhere
    pub fn readout(&self) -> Option<[u32; 2]> {
        self.input.readout
    }

    pub fn modifiers(&self) -> ModifierState {
        self.input.modifiers
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_active()
    }

    pub fn is_picking(&self) -> bool {
        self.pending_pick.is_some()
    }

    pub fn picker_available(&self) -> bool {
        self.eyedropper.is_available()
    }
}

/// The color an unmultiplied RGBA pixel shows over the white canvas backdrop
fn over_white([r, g, b, a]: [u8; 4]) -> Color32 {
    let channel = |c: u8| 255 - (u16::from(a) * u16::from(255 - c) / 255) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}
