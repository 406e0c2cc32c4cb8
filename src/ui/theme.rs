use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::TaskPriority;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_CANVAS: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(250, 250, 252);
pub const BG_HEADER: Color32 = Color32::from_rgb(248, 249, 250);
pub const BG_ROW_HOVER: Color32 = Color32::from_rgb(241, 243, 245);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(64, 27, 27, 64);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(222, 226, 230);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(52, 58, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(52, 58, 64);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(108, 117, 125);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(255, 107, 107);
pub const NOW_LINE: Color32 = Color32::from_rgb(255, 107, 107);
pub const GRID_LINE: Color32 = Color32::from_rgb(233, 236, 239);

/// White at 30% over the filled part of a bar.
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(77, 77, 77, 77);

// ── Bars ─────────────────────────────────────────────────────────────────────

pub const PREVIEW_COLOR: Color32 = Color32::from_rgb(255, 107, 107);
pub const PREVIEW_OPACITY: f32 = 0.6;

/// Roster colors, assigned by join order.
pub const MEMBER_COLORS: &[Color32] = &[
    Color32::from_rgb(255, 107, 107), // Coral
    Color32::from_rgb(78, 205, 196),  // Teal
    Color32::from_rgb(69, 183, 209),  // Sky
    Color32::from_rgb(150, 206, 180), // Sage
    Color32::from_rgb(255, 160, 122), // Salmon
    Color32::from_rgb(152, 216, 200), // Mint
    Color32::from_rgb(247, 183, 49),  // Amber
    Color32::from_rgb(187, 143, 206), // Lilac
];

/// Bar fill for tasks without a resolvable assignee.
pub fn priority_color(priority: TaskPriority) -> Color32 {
    match priority {
        TaskPriority::Low => Color32::from_rgb(149, 225, 211),
        TaskPriority::Medium => Color32::from_rgb(243, 129, 129),
        TaskPriority::High => Color32::from_rgb(252, 186, 211),
        TaskPriority::Critical => Color32::from_rgb(255, 0, 0),
    }
}

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(14.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_small() -> FontId {
    FontId::proportional(10.0)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CANVAS;
    visuals.extreme_bg_color = BG_CANVAS;
    visuals.faint_bg_color = BG_HEADER;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

    visuals.widgets.inactive.bg_fill = BG_HEADER;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = BG_ROW_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(10.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    ctx.set_style(style);
}
