use egui::{RichText, Ui};

use crate::app::HangarApp;
use crate::model::{ActiveProject, ViewFilter};
use crate::snapshot::Snapshot;
use crate::ui::theme;

/// Project navigation, search and view filter (left panel).
pub fn show_sidebar(app: &mut HangarApp, snapshot: &Snapshot, ui: &mut Ui) {
    let state = &snapshot.state;

    ui.add_space(6.0);
    ui.label(RichText::new("PROJECTS").font(theme::font_sub()).color(theme::TEXT_DIM));

    let mut selection = None;
    if ui
        .selectable_label(state.active_project == ActiveProject::All, "ALL")
        .clicked()
    {
        selection = Some(ActiveProject::All);
    }
    for name in state.projects.keys() {
        let active = state.active_project.name() == Some(name.as_str());
        let label = format!("{} {}", egui_phosphor::regular::AIRPLANE, name);
        if ui.selectable_label(active, label).clicked() {
            selection = Some(ActiveProject::Named(name.clone()));
        }
    }
    if let Some(active) = selection {
        app.select_project(active);
    }

    if let Some(project) = state.active() {
        ui.separator();
        egui::Grid::new("project-info").num_columns(2).show(ui, |ui| {
            for (label, value) in [
                ("Customer", &project.customer),
                ("A/C", &project.ac),
                ("Model", &project.model),
                ("MSN", &project.msn),
                ("W/O", &project.wo),
                ("L/P", &project.lp),
                ("PM", &project.pm),
            ] {
                if value.is_empty() {
                    continue;
                }
                ui.label(RichText::new(label).color(theme::TEXT_DIM));
                ui.label(value.as_str());
                ui.end_row();
            }
            ui.label(RichText::new("Start").color(theme::TEXT_DIM));
            ui.label(project.start_date.format("%d/%m/%Y").to_string());
            ui.end_row();
        });
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
        ui.add(egui::TextEdit::singleline(&mut app.filter.query).hint_text("Search tasks"));
    });
    ui.horizontal(|ui| {
        ui.radio_value(&mut app.filter.view, ViewFilter::All, "All");
        ui.radio_value(&mut app.filter.view, ViewFilter::Pending, "Pending");
        ui.radio_value(&mut app.filter.view, ViewFilter::Today, "Today");
    });
}
