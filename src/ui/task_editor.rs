use egui::{Color32, RichText, Ui};

use crate::model::{Task, TaskPatch};
use crate::ui::theme::{self, CanvasColors};

/// Render the inline editor for one task.
///
/// Widgets edit a scratch copy; the differences come back as a patch so the
/// project stays the only thing that mutates tasks.
pub fn show_task_editor(
    task: &Task,
    palette: &[String],
    colors: &CanvasColors,
    ui: &mut Ui,
) -> Option<TaskPatch> {
    let mut draft = task.clone();
    let mut patch = TaskPatch::default();
    let mut changed = false;

    ui.add_space(6.0);
    ui.label(RichText::new("Edit Task").strong().size(13.0).color(colors.text));
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: colors.lane_alt,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, colors.grid),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        let caption = |ui: &mut Ui, text: &str| {
            ui.label(RichText::new(text).size(10.0).color(colors.text_dim).strong());
        };

        // ── Content ───────────────────────────────────────────────────
        caption(ui, "Content");
        let resp = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut draft.content).font(egui::FontId::proportional(12.0)),
        );
        if resp.changed() {
            patch.content = Some(draft.content.clone());
            changed = true;
        }

        // ── Category ──────────────────────────────────────────────────
        caption(ui, "Category");
        let resp = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut draft.category).hint_text("Optional"),
        );
        if resp.changed() {
            patch.category = Some(draft.category.clone());
            changed = true;
        }

        // ── Dates ─────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                caption(ui, "Start");
                let resp = ui.add(egui_extras::DatePickerButton::new(&mut draft.start).id_salt("dp_start"));
                if resp.changed() {
                    if draft.start > draft.end {
                        draft.end = draft.start;
                    }
                    patch.start = Some(draft.start);
                    patch.end = Some(draft.end);
                    changed = true;
                }
            });

            ui.add_space(8.0);

            ui.vertical(|ui| {
                caption(ui, "End");
                let resp = ui.add(egui_extras::DatePickerButton::new(&mut draft.end).id_salt("dp_end"));
                if resp.changed() {
                    if draft.end < draft.start {
                        draft.start = draft.end;
                    }
                    patch.start = Some(draft.start);
                    patch.end = Some(draft.end);
                    changed = true;
                }
            });
        });

        // ── Color ─────────────────────────────────────────────────────
        caption(ui, "Color");
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            for hex in palette {
                let color = theme::color_from_hex(hex);
                let is_current = draft.color.eq_ignore_ascii_case(hex);
                let size = if is_current { 20.0 } else { 16.0 };
                let (rect, resp) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
                ui.painter().rect_filled(rect, egui::Rounding::same(3.0), color);
                if is_current {
                    ui.painter().rect_stroke(
                        rect.expand(1.0),
                        egui::Rounding::same(4.0),
                        egui::Stroke::new(2.0, Color32::WHITE),
                    );
                }
                if resp.on_hover_text(hex.as_str()).clicked() {
                    patch.color = Some(hex.clone());
                    changed = true;
                }
            }
        });
    });

    changed.then_some(patch)
}
