use egui::{menu, RichText, Ui};

use crate::app::HangarApp;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut HangarApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open...").clicked() {
                app.open_state();
                ui.close_menu();
            }
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_state();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_state_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In").clicked() {
                app.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out").clicked() {
                app.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Center On Now").clicked() {
                app.recenter();
                ui.close_menu();
            }
            ui.separator();
            if ui
                .button(format!(
                    "  Stress Test ({} tasks)",
                    crate::engine::demo::STRESS_TASK_COUNT
                ))
                .clicked()
            {
                app.load_stress_unit();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned active project
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.active_label(), modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
