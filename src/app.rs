use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{info, warn};

use crate::config::{AppPaths, ChartSettings};
use crate::engine::PropagationStatus;
use crate::io;
use crate::model::{timeline, ActiveProject, TaskFilter, TaskId};
use crate::snapshot::{ScheduleState, Snapshot, SnapshotOwner};
use crate::ui::{gantt_chart, sidebar, theme, toolbar};
use crate::viewport::AutoCenter;

/// Main application state. The only writer of the schedule snapshot.
pub struct HangarApp {
    owner: SnapshotOwner,
    settings: ChartSettings,
    paths: AppPaths,
    pub file_path: Option<PathBuf>,
    pub filter: TaskFilter,
    auto_center: AutoCenter,
    pub show_about: bool,
    pub status_message: String,
    window: (usize, usize),
    /// Hovered task, the snapshot version it was read from, and its links
    /// into other projects.
    hovered: Option<(TaskId, u64, Vec<TaskId>)>,
}

impl HangarApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        theme::apply_theme(&cc.egui_ctx);

        let paths = AppPaths::discover();
        let settings = ChartSettings::load(&paths.settings_file());
        let state_file = paths.state_file();

        let (state, file_path, status_message) = match io::file::load_state(&state_file) {
            Ok(state) => (state, Some(state_file), "Schedule loaded".to_string()),
            Err(e) => {
                info!(error = %e, "no saved schedule, starting from sample");
                (
                    ScheduleState::sample(Local::now().date_naive()),
                    None,
                    "Ready".to_string(),
                )
            }
        };

        Self {
            owner: SnapshotOwner::new(state),
            settings,
            paths,
            file_path,
            filter: TaskFilter::default(),
            auto_center: AutoCenter::default(),
            show_about: false,
            status_message,
            window: (0, 0),
            hovered: None,
        }
    }

    pub fn active_label(&self) -> String {
        match &self.owner.snapshot().state.active_project {
            ActiveProject::All => "ALL PROJECTS".to_string(),
            ActiveProject::Named(name) => name.clone(),
        }
    }

    pub fn select_project(&mut self, active: ActiveProject) {
        if let Err(e) = self.owner.set_active_project(active) {
            self.status_message = e.to_string();
        }
    }

    pub fn recenter(&mut self) {
        self.auto_center.reset();
    }

    pub fn zoom_in(&mut self) {
        self.settings.zoom_in();
        self.settings_changed();
    }

    pub fn zoom_out(&mut self) {
        self.settings.zoom_out();
        self.settings_changed();
    }

    fn settings_changed(&mut self) {
        self.auto_center.reset();
        if let Err(e) = self.settings.save(&self.paths.settings_file()) {
            warn!(error = %e, "could not save settings");
        }
    }

    pub fn load_stress_unit(&mut self) {
        let snapshot = self.owner.load_stress_unit(Local::now().date_naive());
        self.status_message = format!("Stress unit loaded ({} tasks)", snapshot.state.tasks.len());
        self.report_status(&snapshot);
    }

    pub fn open_state(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule", &["json"])
            .pick_file()
        {
            match io::file::load_state(&path) {
                Ok(state) => {
                    let snapshot = self.owner.replace_from_remote(state);
                    self.file_path = Some(path);
                    self.status_message = "Schedule loaded".to_string();
                    self.report_status(&snapshot);
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_state(&mut self) {
        let path = self
            .file_path
            .clone()
            .unwrap_or_else(|| self.paths.state_file());
        self.write_state(path);
    }

    pub fn save_state_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule", &["json"])
            .set_file_name("schedule.json")
            .save_file()
        {
            self.write_state(path);
        }
    }

    fn write_state(&mut self, path: PathBuf) {
        match io::file::save_state(&self.owner.snapshot().state, &path) {
            Ok(()) => {
                self.file_path = Some(path);
                self.status_message = "Schedule saved".to_string();
            }
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    pub fn import_csv(&mut self) {
        let active = self.owner.snapshot().state.active_project.clone();
        if active.name().is_none() {
            self.status_message = "Select a project before importing".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv", "txt"])
            .pick_file()
        {
            match io::csv_import::import_csv(&path, &active) {
                Ok(import) => {
                    let count = import.tasks.len();
                    let snapshot = self.owner.import_tasks(import.tasks);
                    self.status_message = if import.skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, import.skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                    self.report_status(&snapshot);
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        let snapshot = self.owner.snapshot();
        let state = &snapshot.state;
        let tasks: Vec<_> = state
            .tasks
            .iter()
            .filter(|t| state.active_project.includes(t))
            .cloned()
            .collect();
        if tasks.is_empty() {
            self.status_message = "Nothing to export: no tasks in view".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("tasks.csv")
            .save_file()
        {
            match io::csv_export::export_csv(&tasks, &path) {
                Ok(count) => self.status_message = format!("Exported {} tasks to CSV", count),
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        let dir = &self.paths.data_dir;
        if let Err(e) = std::fs::create_dir_all(dir).and_then(|_| open::that(dir)) {
            warn!(error = %e, "could not open data folder");
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }

    fn track_hover(&mut self, snapshot: &Snapshot, hovered: Option<TaskId>) {
        let Some(id) = hovered else {
            self.hovered = None;
            return;
        };
        if let Some((current, version, _)) = &self.hovered {
            if *current == id && *version == snapshot.version {
                return;
            }
        }
        let links = snapshot.cross_project_links(&id);
        self.hovered = Some((id, snapshot.version, links));
    }

    /// Append a propagation warning to the status line.
    fn report_status(&mut self, snapshot: &Snapshot) {
        match &snapshot.status {
            PropagationStatus::Settled => {}
            PropagationStatus::Partial { pending } => {
                self.status_message
                    .push_str(&format!(" · schedule not settled ({} tasks pending)", pending.len()));
            }
            PropagationStatus::Cyclic { unresolved, .. } => {
                self.status_message.push_str(&format!(
                    " · dependency cycle involving {} tasks",
                    unresolved.len()
                ));
            }
        }
    }

    fn show_status_bar(&self, snapshot: &Snapshot, visible: usize, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&self.status_message).size(11.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "v{} · rows {}–{} of {}",
                        snapshot.version, self.window.0, self.window.1, visible
                    ))
                    .size(10.0)
                    .weak(),
                );
                if let Some((id, _, links)) = &self.hovered {
                    if !links.is_empty() {
                        ui.colored_label(
                            theme::WARNING,
                            format!("{} waits on another project: {}", id, links.join(", ")),
                        );
                    }
                }
                match &snapshot.status {
                    PropagationStatus::Settled => {}
                    PropagationStatus::Partial { pending } => {
                        ui.colored_label(
                            theme::WARNING,
                            format!("{} {} pending", egui_phosphor::regular::WARNING, pending.len()),
                        );
                    }
                    PropagationStatus::Cyclic { unresolved, .. } => {
                        ui.colored_label(
                            theme::TODAY_LINE,
                            format!("{} cycle: {}", egui_phosphor::regular::WARNING, unresolved.join(", ")),
                        );
                    }
                }
            });
        });
    }

    fn show_about_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("About")
            .open(&mut self.show_about)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Hangar Gantt");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.label("Maintenance task timeline with dependency propagation.");
            });
    }
}

impl eframe::App for HangarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S)) {
            self.save_state();
        }

        // Read-only view for the whole frame; edits below publish a new one.
        let snapshot: Arc<Snapshot> = self.owner.snapshot();
        let state = &snapshot.state;
        let timeline_start = state.timeline_start(Local::now().date_naive());
        let today_offset = timeline::today_offset_days(timeline_start, Utc::now());
        let filter = self.filter.clone();
        let visible = filter.apply(&state.tasks, &state.active_project, today_offset);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.show_status_bar(&snapshot, visible.len(), ui);
        });

        egui::SidePanel::left("projects")
            .default_width(self.settings.sidebar_width)
            .show(ctx, |ui| {
                sidebar::show_sidebar(self, &snapshot, ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::BG_DARK))
            .show(ctx, |ui| {
                let center_x = self.auto_center.update(
                    state.active_project.name(),
                    timeline_start,
                    today_offset,
                    self.settings.day_width,
                    ui.available_width(),
                );
                let chart = gantt_chart::ChartView {
                    tasks: &visible,
                    timeline_start,
                    timeline_days: state.timeline_days(),
                    today_offset,
                    settings: &self.settings,
                    center_x,
                };
                let interaction = gantt_chart::show_gantt_chart(ui, &chart);
                self.window = (interaction.first_index, interaction.last_index);
                self.track_hover(&snapshot, interaction.hovered);
            });

        self.show_about_window(ctx);
    }
}
