//! Drawing engine: turns pointer movement into pixels for the active tool.
//!
//! Freehand tools commit each segment as it arrives. Lines and shapes are
//! previewed by restoring the gesture's reference snapshot and redrawing, so
//! only the last preview survives when the gesture ends.

use egui::Pos2;

use crate::canvas::Canvas;
use crate::geometry::ShapeExtent;
use crate::state::DrawSession;
use crate::tools::ToolMode;

/// Renders the current pointer position for `mode`.
///
/// Does nothing unless a gesture is active.
pub fn render_preview(
    canvas: &mut Canvas,
    mode: ToolMode,
    session: &mut DrawSession,
    current: Pos2,
    constrain: bool,
) {
    if !session.is_active() {
        return;
    }

    match mode {
        ToolMode::Draw | ToolMode::Erase => {
            canvas.stroke_line(session.last(), current);
            session.set_last(current);
        }
        ToolMode::Line => {
            restore_reference(canvas, session);
            canvas.stroke_line(session.anchor(), current);
            session.set_last(current);
        }
        ToolMode::Rectangle
        | ToolMode::RectangleFilled
        | ToolMode::Ellipse
        | ToolMode::EllipseFilled => {
            restore_reference(canvas, session);
            let extent = ShapeExtent::from_drag(session.anchor(), current, constrain);
            draw_shape(canvas, mode, &extent);
        }
        ToolMode::Picker | ToolMode::Clear => {}
    }
}

fn restore_reference(canvas: &mut Canvas, session: &DrawSession) {
    if let Some(reference) = session.reference() {
        canvas.restore(reference);
    }
}

fn draw_shape(canvas: &mut Canvas, mode: ToolMode, extent: &ShapeExtent) {
    match mode {
        ToolMode::Rectangle => canvas.stroke_rect(extent.anchor, extent.size),
        ToolMode::RectangleFilled => canvas.fill_rect(extent.anchor, extent.size),
        ToolMode::Ellipse => canvas.stroke_ellipse(extent.anchor, extent.ellipse_radii()),
        ToolMode::EllipseFilled => canvas.fill_ellipse(extent.anchor, extent.ellipse_radii()),
        _ => {}
    }
}
