use crate::PaintApp;
use crate::command::Command;
use crate::tools::ToolMode;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let current = app.editor().mode();
            let picker_available = app.editor().picker_available();

            for &mode in ToolMode::all() {
                let enabled = mode != ToolMode::Picker || picker_available;
                let label = egui::SelectableLabel::new(
                    current == mode,
                    format!("{} {}", mode.icon(), mode.name()),
                );
                if ui.add_enabled(enabled, label).clicked() {
                    log::info!("Tool selected from UI: {}", mode.name());
                    app.execute(Command::SelectMode(mode));
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                let [r, g, b, _] = app.editor().color().to_array();
                let mut rgb = [r, g, b];
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    let [r, g, b] = rgb;
                    app.execute(Command::SetColor(egui::Color32::from_rgb(r, g, b)));
                }
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.editor().history().can_undo();
                let can_redo = app.editor().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.execute(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.execute(Command::Redo);
                }
            });

            let history = app.editor().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.undo_len()));
                ui.label(format!("Redo stack size: {}", history.redo_len()));
            });
            ui.separator();

            let export_label = format!("Export {}", app.files().format().file_name());
            if ui.button(export_label).clicked() {
                app.export();
            }
            ui.separator();

            match app.editor().readout() {
                Some([x, y]) => ui.monospace(format!("x: {x:>4}  y: {y:>4}")),
                None => ui.monospace("x:    -  y:    -"),
            };

            if app.editor().is_picking() {
                ui.label("Click the canvas to pick a color, Esc to cancel");
            }
            if let Some(status) = app.status() {
                ui.weak(status);
            }
        });
}
