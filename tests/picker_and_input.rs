mod common;

use std::sync::Arc;

use common::*;
use egui::{Color32, Event, Modifiers, Rect, TouchDeviceId, TouchId, TouchPhase, pos2, vec2};
use futures::future::{self, FutureExt};
use sketchpad::input::Key;
use sketchpad::tools::{CanvasEyedropper, Eyedropper, PickError, PickFuture};
use sketchpad::{Command, EditorContext, InputEvent, InputHandler, PaintError, ToolMode};

/// Eyedropper whose picks resolve immediately with a fixed color
struct FixedEyedropper(Color32);

impl Eyedropper for FixedEyedropper {
    fn is_available(&self) -> bool {
        true
    }

    fn open(&self) -> PickFuture {
        future::ready(Ok(self.0)).boxed()
    }
}

fn red_square_editor() -> EditorContext {
    let mut editor = editor(40, 40);
    set_color(&mut editor, Color32::RED);
    select(&mut editor, ToolMode::RectangleFilled);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
    editor
}

#[test]
fn test_pick_sets_color_and_returns_to_previous_mode() {
    let mut editor = red_square_editor();
    set_color(&mut editor, Color32::BLUE);
    let undo_depth = editor.history().undo_len();

    select(&mut editor, ToolMode::Picker);
    assert!(editor.is_picking());
    editor.handle_input(down(5.0, 5.0));

    assert!(!editor.is_picking());
    assert_eq!(editor.color(), Color32::RED);
    assert_eq!(editor.canvas().stroke_color(), Color32::RED);
    assert_eq!(editor.canvas().fill_color(), Color32::RED);
    assert_eq!(editor.mode(), ToolMode::RectangleFilled);
    // Sampling is not a gesture
    assert_eq!(editor.history().undo_len(), undo_depth);
}

#[test]
fn test_pick_on_transparent_pixel_sees_backdrop() {
    let mut editor = red_square_editor();
    select(&mut editor, ToolMode::Picker);
    editor.handle_input(down(30.0, 30.0));

    assert_eq!(editor.color(), Color32::WHITE);
}

#[test]
fn test_press_outside_canvas_keeps_pick_open() {
    let mut editor = red_square_editor();
    select(&mut editor, ToolMode::Picker);
    editor.handle_input(down(-4.0, 5.0));

    assert!(editor.is_picking());
    assert_eq!(editor.mode(), ToolMode::Picker);
}

#[test]
fn test_escape_cancels_and_stays_in_picker() {
    let mut editor = red_square_editor();
    select(&mut editor, ToolMode::Picker);
    editor.handle_input(InputEvent::KeyDown(Key::Escape));

    assert!(!editor.is_picking());
    assert_eq!(editor.mode(), ToolMode::Picker);
    assert_eq!(editor.color(), Color32::RED);
}

#[test]
fn test_selecting_another_mode_abandons_pick() {
    let mut editor = red_square_editor();
    select(&mut editor, ToolMode::Picker);
    select(&mut editor, ToolMode::Line);
    assert!(!editor.is_picking());

    // Presses draw again
    editor.handle_input(down(20.0, 20.0));
    assert!(editor.is_drawing());
}

#[test]
fn test_unavailable_picker_is_rejected() {
    let mut editor = EditorContext::new(20, 20, Arc::new(CanvasEyedropper::disabled()));
    select(&mut editor, ToolMode::Ellipse);

    assert!(!editor.picker_available());
    assert_eq!(
        editor.execute(Command::SelectMode(ToolMode::Picker)),
        Err(PaintError::PickerUnavailable)
    );
    assert_eq!(editor.mode(), ToolMode::Ellipse);
    assert!(!editor.is_picking());
}

#[test]
fn test_host_eyedropper_resolves_on_poll() {
    let mut editor = EditorContext::new(20, 20, Arc::new(FixedEyedropper(Color32::GOLD)));
    select(&mut editor, ToolMode::Erase);
    select(&mut editor, ToolMode::Picker);

    assert_eq!(editor.poll_picker(), Some(Ok(Color32::GOLD)));
    assert_eq!(editor.color(), Color32::GOLD);
    assert_eq!(editor.mode(), ToolMode::Erase);
    assert_eq!(editor.poll_picker(), None);
}

#[test]
fn test_cancelled_pick_reports_cancelled() {
    let eyedropper = Arc::new(CanvasEyedropper::new());
    let mut editor = EditorContext::new(20, 20, eyedropper.clone());
    select(&mut editor, ToolMode::Picker);
    assert_eq!(editor.poll_picker(), None);

    eyedropper.cancel();
    assert_eq!(editor.poll_picker(), Some(Err(PickError::Cancelled)));
    assert_eq!(editor.mode(), ToolMode::Picker);
}

#[test]
fn test_shift_constrains_until_released() {
    let mut editor = editor(20, 20);
    editor.handle_input(InputEvent::KeyDown(Key::Shift));
    assert!(editor.modifiers().constrain);

    // Other keys do not release it
    editor.handle_input(InputEvent::KeyDown(Key::Z));
    assert!(editor.modifiers().constrain);

    editor.handle_input(InputEvent::KeyUp(Key::Shift));
    assert!(!editor.modifiers().constrain);
}

#[test]
fn test_touch_events_drive_a_stroke() {
    let mut editor = editor(60, 40);
    let mut handler = InputHandler::new();
    handler.set_canvas_rect(Rect::from_min_size(pos2(100.0, 50.0), vec2(60.0, 40.0)));

    let touch = |phase, x, y| Event::Touch {
        device_id: TouchDeviceId(1),
        id: TouchId(3),
        phase,
        pos: pos2(x, y),
        force: None,
    };
    let events = handler.translate(
        &[
            touch(TouchPhase::Start, 110.4, 60.4),
            touch(TouchPhase::Move, 140.0, 60.0),
            touch(TouchPhase::End, 140.0, 60.0),
        ],
        Modifiers::NONE,
    );
    for event in events {
        editor.handle_input(event);
    }

    assert!(!editor.is_drawing());
    assert_eq!(alpha(&editor, 25, 10), 255);
    assert_eq!(editor.readout(), Some([40, 10]));
}

#[test]
fn test_shift_from_egui_modifiers_constrains_shapes() {
    let mut editor = editor(80, 60);
    select(&mut editor, ToolMode::RectangleFilled);
    let mut handler = InputHandler::new();
    handler.set_canvas_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(80.0, 60.0)));

    let button = |x, y, pressed| Event::PointerButton {
        pos: pos2(x, y),
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: Modifiers::SHIFT,
    };
    let events = handler.translate(
        &[
            button(10.0, 10.0, true),
            Event::PointerMoved(pos2(50.0, 30.0)),
            button(50.0, 30.0, false),
        ],
        Modifiers::SHIFT,
    );
    for event in events {
        editor.handle_input(event);
    }

    assert_eq!(painted_bounds(&editor), Some((10, 10, 29, 29)));
}
