use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Stroke, Ui, Vec2};

use crate::config::ChartSettings;
use crate::model::timeline::{day_label, is_today_column, weekday_initial};
use crate::model::{Task, TaskId, TimelineGeometry};
use crate::ui::theme;
use crate::viewport::{compute_visible_window, ScrollState};

/// Everything the chart needs for one frame. Built from a settled snapshot.
pub struct ChartView<'a> {
    /// Filtered tasks in display order.
    pub tasks: &'a [&'a Task],
    pub timeline_start: NaiveDate,
    pub timeline_days: u32,
    /// Fractional days from `timeline_start` to now.
    pub today_offset: f64,
    pub settings: &'a ChartSettings,
    /// One-shot horizontal scroll offset (auto-centering).
    pub center_x: Option<f32>,
}

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub hovered: Option<TaskId>,
    pub first_index: usize,
    pub last_index: usize,
}

/// Render the timeline (central panel). Only rows in the visible window are
/// laid out; the scroll area is sized for the full list.
pub fn show_gantt_chart(ui: &mut Ui, chart: &ChartView<'_>) -> ChartInteraction {
    let geometry = chart.settings.geometry();
    let layout = chart.settings.row_layout();
    let grid_width = geometry.grid_width(chart.timeline_days);
    let content_height = geometry.content_height(chart.tasks.len());

    let mut area = egui::ScrollArea::both().auto_shrink([false, false]);
    if let Some(x) = chart.center_x {
        area = area.horizontal_scroll_offset(x);
    }

    let output = area.show_viewport(ui, |ui, visible| {
        ui.set_min_size(Vec2::new(grid_width, content_height));
        let origin = ui.max_rect().min;
        let painter = ui.painter().clone();
        let mut interaction = ChartInteraction::default();

        painter.rect_filled(
            Rect::from_min_size(origin + visible.min.to_vec2(), visible.size()),
            0.0,
            theme::BG_DARK,
        );

        let columns = visible_columns(&geometry, visible, chart.timeline_days);
        draw_grid(&painter, origin, &geometry, columns.clone(), visible, chart.today_offset);

        let window = compute_visible_window(
            chart.tasks,
            ScrollState {
                scroll_top: visible.min.y,
                viewport_height: visible.height(),
            },
            layout,
        );
        interaction.first_index = window.first_index;
        interaction.last_index = window.last_index;

        for row in window.rows() {
            let task: &Task = row.item;
            let y = origin.y + geometry.header_height + geometry.row_top(row.index);
            painter.line_segment(
                [
                    Pos2::new(origin.x + visible.min.x, y + geometry.row_height),
                    Pos2::new(origin.x + visible.max.x, y + geometry.row_height),
                ],
                Stroke::new(0.5, theme::BORDER_SUBTLE),
            );

            let bar_rect = draw_task_bar(&painter, origin, &geometry, task, y);
            let response = ui.interact(
                bar_rect,
                ui.make_persistent_id(("task-bar", &task.id)),
                egui::Sense::hover(),
            );
            if response.hovered() {
                interaction.hovered = Some(task.id.clone());
                egui::show_tooltip_at_pointer(
                    ui.ctx(),
                    ui.layer_id(),
                    egui::Id::new(("task-tip", &task.id)),
                    |ui| task_tooltip(ui, task),
                );
            }
        }

        draw_today_line(&painter, origin, &geometry, chart.today_offset, visible);
        draw_timeline_header(&painter, origin, &geometry, chart, columns, visible);

        interaction
    });

    output.inner
}

/// Day columns intersecting the viewport.
fn visible_columns(geometry: &TimelineGeometry, visible: Rect, days: u32) -> std::ops::Range<u32> {
    if geometry.day_width <= 0.0 {
        return 0..0;
    }
    let first = (visible.min.x / geometry.day_width).floor().max(0.0) as u32;
    let last = ((visible.max.x / geometry.day_width).ceil().max(0.0) as u32).min(days);
    first.min(last)..last
}

fn draw_grid(
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &TimelineGeometry,
    columns: std::ops::Range<u32>,
    visible: Rect,
    today_offset: f64,
) {
    for col in columns {
        let x = origin.x + col as f32 * geometry.day_width;
        if is_today_column(today_offset, col) {
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(x, origin.y + visible.min.y),
                    Vec2::new(geometry.day_width, visible.height()),
                ),
                0.0,
                theme::TODAY_COLUMN,
            );
        }
        painter.line_segment(
            [
                Pos2::new(x, origin.y + visible.min.y),
                Pos2::new(x, origin.y + visible.max.y),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &TimelineGeometry,
    chart: &ChartView<'_>,
    columns: std::ops::Range<u32>,
    visible: Rect,
) {
    // Sticky: pinned to the top of the viewport.
    let top = origin.y + visible.min.y;
    painter.rect_filled(
        Rect::from_min_size(
            Pos2::new(origin.x + visible.min.x, top),
            Vec2::new(visible.width(), geometry.header_height),
        ),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x + visible.min.x, top + geometry.header_height),
            Pos2::new(origin.x + visible.max.x, top + geometry.header_height),
        ],
        Stroke::new(1.0, theme::BORDER_ACCENT.gamma_multiply(0.3)),
    );

    for col in columns {
        let x = origin.x + col as f32 * geometry.day_width + geometry.day_width / 2.0;
        let date = day_label(chart.timeline_start, col);
        let is_today = is_today_column(chart.today_offset, col);
        let (initial_color, number_color) = if is_today {
            (theme::TODAY_LINE, theme::TODAY_LINE)
        } else {
            (theme::TEXT_SECONDARY, theme::TEXT_PRIMARY)
        };
        painter.text(
            Pos2::new(x, top + geometry.header_height * 0.35),
            egui::Align2::CENTER_CENTER,
            weekday_initial(date),
            theme::font_sub(),
            initial_color,
        );
        painter.text(
            Pos2::new(x, top + geometry.header_height * 0.65),
            egui::Align2::CENTER_CENTER,
            (col + 1).to_string(),
            theme::font_header(),
            number_color,
        );
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &TimelineGeometry,
    today_offset: f64,
    visible: Rect,
) {
    let local_x = geometry.today_x(today_offset);
    if local_x < visible.min.x || local_x > visible.max.x {
        return;
    }
    let x = origin.x + local_x;
    let top = origin.y + visible.min.y + geometry.header_height;

    painter.line_segment(
        [Pos2::new(x, top), Pos2::new(x, origin.y + visible.max.y)],
        Stroke::new(2.0, theme::TODAY_LINE),
    );

    let badge_w = 30.0;
    let badge_rect = Rect::from_min_size(Pos2::new(x - badge_w / 2.0, top), Vec2::new(badge_w, 12.0));
    painter.rect_filled(badge_rect, Rounding::same(2.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "NOW",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &TimelineGeometry,
    task: &Task,
    row_y: f32,
) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + geometry.bar_x(task), row_y + inset),
        Vec2::new(geometry.bar_width(task), geometry.row_height - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(60),
    );
    painter.rect_filled(bar_rect, rounding, theme::task_color(task.kind, task.progress));

    // Progress fill
    let progress = f32::from(task.progress.min(100)) / 100.0;
    if progress > 0.0 {
        let progress_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width() * progress, bar_rect.height()),
        );
        painter.rect_filled(progress_rect, rounding, Color32::from_white_alpha(25));
    }

    let border = if task.is_complete() {
        theme::TASK_COMPLETE_BORDER
    } else {
        Color32::from_white_alpha(50)
    };
    painter.rect_stroke(bar_rect, rounding, Stroke::new(1.0, border));

    let label = if task.is_complete() {
        format!("✓ {}", task.title)
    } else {
        task.title.clone()
    };
    painter.with_clip_rect(bar_rect.intersect(painter.clip_rect())).text(
        Pos2::new(bar_rect.left() + 8.0, bar_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        theme::font_bar(),
        theme::TEXT_ON_BAR,
    );

    bar_rect
}

fn task_tooltip(ui: &mut Ui, task: &Task) {
    ui.strong(&task.title);
    if !task.description.is_empty() {
        ui.label(&task.description);
    }
    ui.separator();
    ui.label(format!(
        "Day {} {:02}:00 · {}d {}h",
        task.start + 1,
        task.start_hour,
        task.duration,
        task.duration_hours
    ));
    ui.label(format!("{} · {}% complete", task.kind.tag(), task.progress));
    if !task.dependencies.is_empty() {
        ui.label(format!("After: {}", task.dependencies.join(", ")));
    }
}
