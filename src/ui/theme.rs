use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::TaskKind;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(2, 6, 23);
pub const BG_PANEL: Color32 = Color32::from_rgb(15, 23, 42);
pub const BG_HEADER: Color32 = Color32::from_rgb(8, 13, 30);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(8, 145, 178, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(30, 41, 59);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(6, 182, 212);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 116, 139);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(6, 182, 212);
pub const TODAY_LINE: Color32 = Color32::from_rgb(239, 68, 68);
pub const TODAY_COLUMN: Color32 = Color32::from_rgba_premultiplied(24, 7, 7, 25);
pub const GRID_LINE: Color32 = Color32::from_rgb(22, 30, 48);
pub const WARNING: Color32 = Color32::from_rgb(250, 204, 21);

// ── Task colors ──────────────────────────────────────────────────────────────

/// Any task at 100 % progress, whatever its kind.
pub const TASK_COMPLETE: Color32 = Color32::from_rgb(21, 128, 61);
pub const TASK_COMPLETE_BORDER: Color32 = Color32::from_rgb(74, 222, 128);
pub const TASK_AIRFRAME: Color32 = Color32::from_rgb(185, 28, 28);
pub const TASK_INTERIOR: Color32 = Color32::from_rgb(8, 145, 178);
pub const TASK_AVIONICS: Color32 = Color32::from_rgb(124, 58, 237);
pub const TASK_SHEET_METAL: Color32 = Color32::from_rgb(21, 128, 61);
/// Unrecognized kind tags.
pub const TASK_NEUTRAL: Color32 = Color32::from_rgb(51, 65, 85);

/// Bar color for a task of `kind` at `progress` percent.
pub fn task_color(kind: TaskKind, progress: u8) -> Color32 {
    if progress == 100 {
        return TASK_COMPLETE;
    }
    match kind {
        TaskKind::Airframe => TASK_AIRFRAME,
        TaskKind::Interior => TASK_INTERIOR,
        TaskKind::Avionics => TASK_AVIONICS,
        TaskKind::SheetMetal => TASK_SHEET_METAL,
        TaskKind::Unknown => TASK_NEUTRAL,
    }
}

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const BAR_ROUNDING: f32 = 4.0;
pub const BAR_INSET: f32 = 8.0; // vertical inset so bars don't touch row edges

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_header() -> FontId {
    FontId::monospace(12.0)
}

pub fn font_sub() -> FontId {
    FontId::monospace(9.0)
}

pub fn font_bar() -> FontId {
    FontId::monospace(10.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(8.5)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK; // TextEdit bg

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(3.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(30, 41, 59);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(3.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(40, 52, 72);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(3.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(51, 65, 85);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(3.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_ACCENT);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_tasks_share_one_color() {
        for kind in TaskKind::ALL {
            assert_eq!(task_color(kind, 100), TASK_COMPLETE);
        }
        assert_eq!(task_color(TaskKind::Unknown, 100), TASK_COMPLETE);
    }

    #[test]
    fn in_progress_tasks_use_kind_palette() {
        assert_eq!(task_color(TaskKind::Interior, 60), TASK_INTERIOR);
        assert_eq!(task_color(TaskKind::Avionics, 0), TASK_AVIONICS);
        assert_eq!(task_color(TaskKind::Airframe, 99), TASK_AIRFRAME);
        assert_eq!(task_color(TaskKind::Unknown, 10), TASK_NEUTRAL);
    }
}
