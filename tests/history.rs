mod common;

use common::*;
use egui::Color32;
use sketchpad::input::Key;
use sketchpad::{Command, InputEvent, ToolMode};

fn pixels(editor: &sketchpad::EditorContext) -> Vec<u8> {
    editor.canvas().image().as_raw().clone()
}

#[test]
fn test_undo_every_gesture_restores_blank_canvas() {
    let mut editor = editor(64, 48);
    let blank = pixels(&editor);

    set_color(&mut editor, Color32::GREEN);
    drag(&mut editor, (2.0, 2.0), (60.0, 40.0));
    select(&mut editor, ToolMode::RectangleFilled);
    drag(&mut editor, (10.0, 10.0), (30.0, 20.0));
    select(&mut editor, ToolMode::Ellipse);
    drag(&mut editor, (32.0, 24.0), (50.0, 40.0));
    select(&mut editor, ToolMode::Erase);
    drag(&mut editor, (0.0, 15.0), (64.0, 15.0));
    select(&mut editor, ToolMode::Line);
    drag(&mut editor, (0.0, 47.0), (63.0, 0.0));

    assert_eq!(editor.history().undo_len(), 5);
    for _ in 0..5 {
        assert!(editor.undo());
    }
    assert!(!editor.undo());
    assert_eq!(pixels(&editor), blank);
}

#[test]
fn test_redo_restores_state_before_undo() {
    let mut editor = editor(40, 40);
    drag(&mut editor, (5.0, 5.0), (35.0, 35.0));
    select(&mut editor, ToolMode::EllipseFilled);
    drag(&mut editor, (20.0, 20.0), (28.0, 26.0));
    let drawn = pixels(&editor);

    editor.execute(Command::Undo).unwrap();
    assert_ne!(pixels(&editor), drawn);
    editor.execute(Command::Redo).unwrap();
    assert_eq!(pixels(&editor), drawn);
}

#[test]
fn test_undo_and_redo_on_empty_history_are_ignored() {
    let mut editor = editor(10, 10);
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert!(painted(&editor).is_empty());
}

#[test]
fn test_thousand_undo_redo_cycles_keep_the_canvas() {
    let mut editor = editor(32, 24);
    drag(&mut editor, (0.0, 0.0), (31.0, 23.0));
    let drawn = pixels(&editor);

    for _ in 0..1000 {
        assert!(editor.undo());
        assert!(editor.redo());
    }

    assert_eq!(editor.canvas().width(), 32);
    assert_eq!(editor.canvas().height(), 24);
    assert_eq!(pixels(&editor), drawn);
    assert_eq!(editor.history().undo_len(), 1);
    assert_eq!(editor.history().redo_len(), 0);
}

#[test]
fn test_new_gesture_keeps_redo_stack() {
    let mut editor = editor(40, 40);
    drag(&mut editor, (5.0, 5.0), (35.0, 5.0));
    editor.undo();
    assert_eq!(editor.history().redo_len(), 1);

    drag(&mut editor, (5.0, 20.0), (35.0, 20.0));
    assert_eq!(editor.history().redo_len(), 1);
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn test_clear_with_empty_history_does_nothing() {
    let mut editor = editor(20, 20);
    select(&mut editor, ToolMode::Ellipse);
    let before = pixels(&editor);

    select(&mut editor, ToolMode::Clear);

    assert_eq!(pixels(&editor), before);
    assert_eq!(editor.mode(), ToolMode::Draw);
    assert!(!editor.history().can_undo());
}

#[test]
fn test_clear_wipes_and_can_be_undone() {
    let mut editor = editor(20, 20);
    select(&mut editor, ToolMode::RectangleFilled);
    drag(&mut editor, (0.0, 0.0), (20.0, 20.0));
    let drawn = pixels(&editor);

    select(&mut editor, ToolMode::Clear);
    assert!(painted(&editor).is_empty());
    assert_eq!(editor.mode(), ToolMode::Draw);
    assert_eq!(editor.previous_mode(), ToolMode::Clear);
    assert_eq!(editor.history().undo_len(), 2);

    editor.undo();
    assert_eq!(pixels(&editor), drawn);
}

#[test]
fn test_keyboard_shortcuts_need_combo() {
    let mut editor = editor(30, 30);
    drag(&mut editor, (5.0, 5.0), (25.0, 25.0));
    let drawn = pixels(&editor);

    editor.handle_input(InputEvent::KeyDown(Key::Z));
    assert_eq!(pixels(&editor), drawn);

    editor.handle_input(InputEvent::KeyDown(Key::Combo));
    editor.handle_input(InputEvent::KeyDown(Key::Z));
    assert!(painted(&editor).is_empty());
    editor.handle_input(InputEvent::KeyDown(Key::Y));
    assert_eq!(pixels(&editor), drawn);

    editor.handle_input(InputEvent::KeyUp(Key::Combo));
    editor.handle_input(InputEvent::KeyDown(Key::Z));
    assert_eq!(pixels(&editor), drawn);
}

#[test]
fn test_shortcuts_work_in_any_mode() {
    let mut editor = editor(30, 30);
    drag(&mut editor, (5.0, 5.0), (25.0, 25.0));
    select(&mut editor, ToolMode::Picker);

    editor.handle_input(InputEvent::KeyDown(Key::Combo));
    editor.handle_input(InputEvent::KeyDown(Key::Z));

    assert!(painted(&editor).is_empty());
    assert_eq!(editor.mode(), ToolMode::Picker);
}
