#![allow(dead_code)]

use std::sync::Arc;

use egui::Color32;
use sketchpad::input::{CanvasPoint, InputEvent, PointerSource};
use sketchpad::tools::CanvasEyedropper;
use sketchpad::{Command, EditorContext, ToolMode};

pub fn editor(width: u32, height: u32) -> EditorContext {
    EditorContext::new(width, height, Arc::new(CanvasEyedropper::new()))
}

pub fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        location: CanvasPoint::new(x, y),
        source: PointerSource::Mouse,
    }
}

pub fn moved(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        location: CanvasPoint::new(x, y),
        source: PointerSource::Mouse,
    }
}

pub fn up() -> InputEvent {
    InputEvent::PointerUp {
        source: PointerSource::Mouse,
    }
}

/// A full press, move, release gesture
pub fn drag(editor: &mut EditorContext, from: (f32, f32), to: (f32, f32)) {
    editor.handle_input(down(from.0, from.1));
    editor.handle_input(moved(to.0, to.1));
    editor.handle_input(up());
}

pub fn select(editor: &mut EditorContext, mode: ToolMode) {
    editor.execute(Command::SelectMode(mode)).unwrap();
}

pub fn set_color(editor: &mut EditorContext, color: Color32) {
    editor.execute(Command::SetColor(color)).unwrap();
}

pub fn alpha(editor: &EditorContext, x: u32, y: u32) -> u8 {
    editor.canvas().pixel(x, y).map_or(0, |c| c.a())
}

/// Coordinates of every pixel with non-zero alpha
pub fn painted(editor: &EditorContext) -> Vec<(u32, u32)> {
    editor
        .canvas()
        .image()
        .enumerate_pixels()
        .filter(|(_, _, p)| p[3] > 0)
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Inclusive bounds of the painted pixels as (min_x, min_y, max_x, max_y)
pub fn painted_bounds(editor: &EditorContext) -> Option<(u32, u32, u32, u32)> {
    let pixels = painted(editor);
    let min_x = pixels.iter().map(|p| p.0).min()?;
    let min_y = pixels.iter().map(|p| p.1).min()?;
    let max_x = pixels.iter().map(|p| p.0).max()?;
    let max_y = pixels.iter().map(|p| p.1).max()?;
    Some((min_x, min_y, max_x, max_y))
}
