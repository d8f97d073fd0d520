#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use hangar_gantt::{app::HangarApp, telemetry};

fn main() -> eframe::Result<()> {
    let _ = telemetry::init_default_tracing();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Hangar Gantt"),
        ..Default::default()
    };

    eframe::run_native(
        "Hangar Gantt",
        options,
        Box::new(|cc| Ok(Box::new(HangarApp::new(cc)))),
    )
}
