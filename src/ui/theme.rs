use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::task::{hex_to_rgb, DEFAULT_TASK_COLOR};
use crate::model::Template;

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const LANE_HEIGHT: f32 = 30.0;
pub const LANE_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch lane edges
pub const MARKER_BADGE_HEIGHT: f32 = 14.0;
pub const SIDE_PANEL_WIDTH: f32 = 300.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fixed chrome colours ─────────────────────────────────────────────────────

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const MARKER_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_bar(template_size: f32) -> FontId {
    FontId::proportional((template_size - 1.5).max(9.0))
}

/// Parse a `#RRGGBB` string, falling back to the default task colour.
pub fn color_from_hex(hex: &str) -> Color32 {
    let [r, g, b] = hex_to_rgb(hex)
        .or_else(|_| hex_to_rgb(DEFAULT_TASK_COLOR))
        .unwrap_or([107, 114, 128]);
    Color32::from_rgb(r, g, b)
}

/// Colours used by the timeline canvas, resolved from a template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasColors {
    pub background: Color32,
    pub lane_alt: Color32,
    pub header: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub axis: Color32,
    pub grid: Color32,
    pub continuation: Color32,
    pub bar_rounding: f32,
    pub font_size: f32,
}

impl CanvasColors {
    pub fn from_template(template: &Template) -> Self {
        let background = color_from_hex(&template.styles.background_color);
        let text = color_from_hex(&template.styles.text_color);
        let axis = color_from_hex(&template.styles.axis_color);
        let grid = color_from_hex(&template.styles.grid_color);
        let (lane_alt, header) = if template.is_dark() {
            (Color32::from_white_alpha(6), Color32::from_white_alpha(10))
        } else {
            (
                Color32::from_black_alpha(6),
                Color32::from_black_alpha(10),
            )
        };
        Self {
            background,
            lane_alt,
            header,
            text,
            text_dim: axis,
            axis,
            grid,
            continuation: grid.gamma_multiply(0.6),
            bar_rounding: template.styles.bar_radius,
            font_size: template.styles.font_size,
        }
    }
}

impl Default for CanvasColors {
    fn default() -> Self {
        Self::from_template(&crate::model::template::default_template())
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context, template: &Template) {
    let colors = CanvasColors::from_template(template);
    let mut visuals = if template.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    visuals.override_text_color = Some(colors.text);
    visuals.panel_fill = colors.background;
    visuals.window_fill = colors.background;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.grid);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.axis);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.grid);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, colors.grid);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
