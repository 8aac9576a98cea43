use std::sync::Arc;

use crate::command::Command;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::state::{EditorContext, PaintSettings, hex_color};
use crate::texture_manager::TextureManager;
use crate::tools::{CanvasEyedropper, Eyedropper, PickError};

/// Storage key for the persisted settings
const SETTINGS_KEY: &str = "sketchpad_settings";

pub struct PaintApp {
    editor: EditorContext,
    input: InputHandler,
    textures: TextureManager,
    files: FileHandler,
    settings: PaintSettings,
    /// Last message shown at the bottom of the tools panel
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// Explicit `overrides` win over the settings stored by a previous run.
    pub fn new(cc: &eframe::CreationContext<'_>, overrides: Option<PaintSettings>) -> Self {
        let settings = overrides
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value::<PaintSettings>(storage, SETTINGS_KEY))
            })
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    /// Builds the app without a window, falling back to defaults for invalid settings
    pub fn with_settings(settings: PaintSettings) -> Self {
        let eyedropper: Arc<dyn Eyedropper> = if settings.eyedropper {
            Arc::new(CanvasEyedropper::new())
        } else {
            Arc::new(CanvasEyedropper::disabled())
        };

        let (editor, settings) = match EditorContext::with_settings(&settings, eyedropper.clone()) {
            Ok(editor) => (editor, settings),
            Err(err) => {
                log::error!("Invalid settings, using defaults: {}", err);
                let defaults = PaintSettings {
                    eyedropper: settings.eyedropper,
                    ..Default::default()
                };
                let editor =
                    EditorContext::new(defaults.canvas_width, defaults.canvas_height, eyedropper);
                (editor, defaults)
            }
        };
        log::info!(
            "Starting with a {}x{} canvas in {} mode",
            settings.canvas_width,
            settings.canvas_height,
            editor.mode().name()
        );

        Self {
            editor,
            input: InputHandler::new(),
            textures: TextureManager::new(),
            files: FileHandler::new(settings.export_format, settings.export_dir.clone()),
            settings,
            status: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn files(&self) -> &FileHandler {
        &self.files
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn execute(&mut self, command: Command) {
        match self.editor.execute(command) {
            Ok(()) => log::debug!("Executed {:?}", command),
            Err(err) => {
                log::warn!("Command {:?} rejected: {}", command, err);
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn export(&mut self) {
        match self.files.export(self.editor.canvas()) {
            Ok(path) => self.status = Some(format!("Saved {}", path.display())),
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Export failed: {}", err));
            }
        }
    }

    /// Feeds this frame's pointer, touch and key events to the editor
    /// Feeds this frame's input to the editor. `clip` is the part of the screen the
    /// canvas is shown through and `layer` the layer it is painted on.
    pub fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        canvas_rect: egui::Rect,
        clip: egui::Rect,
        layer: egui::LayerId,
    ) {
        self.input.set_canvas_area(canvas_rect, clip, Some(layer));
        for event in self.input.process_input(ctx) {
            self.editor.handle_input(event);
        }
    }

    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        match self.textures.texture_for(self.editor.canvas(), ctx) {
            Ok(id) => Some(id),
            Err(err) => {
                log::error!("Canvas upload failed: {}", err);
                None
            }
        }
    }

    fn poll_picker(&mut self) {
        match self.editor.poll_picker() {
            Some(Ok(color)) => self.status = Some(format!("Picked {}", hex_color(color))),
            Some(Err(PickError::Cancelled)) => self.status = Some("Pick cancelled".to_owned()),
            Some(Err(err)) => self.status = Some(err.to_string()),
            None => {}
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.color = hex_color(self.editor.color());
        if !self.editor.mode().is_transient() {
            self.settings.initial_mode = self.editor.mode();
        }
        eframe::set_value(storage, SETTINGS_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_picker();

        tools_panel(self, ctx);
        central_panel(self, ctx);

        // Picks can resolve outside of egui events
        if self.editor.is_picking() {
            ctx.request_repaint();
        }
    }
}
