use egui::{Color32, Pos2, Rect, Stroke};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both()
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let canvas = app.editor().canvas();
                let size = egui::vec2(canvas.width() as f32, canvas.height() as f32);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
                let canvas_rect = response.rect;

                app.handle_canvas_input(ctx, canvas_rect, ui.clip_rect(), ui.layer_id());

                // Transparent pixels show the white backdrop
                painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
                if let Some(texture) = app.canvas_texture(ctx) {
                    painter.image(
                        texture,
                        canvas_rect,
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                painter.rect_stroke(canvas_rect, 0.0, Stroke::new(1.0, Color32::GRAY));

                if response.hovered() {
                    ctx.set_cursor_icon(app.editor().cursor());
                }
            });
    });
}
