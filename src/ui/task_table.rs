use egui::{Color32, RichText, Ui};

use crate::model::{Granularity, ProjectWindow, Task};
use crate::timeline::calendar::{relative_time_label, relative_week_index, RelativeLabel};
use crate::ui::theme::{self, CanvasColors};

/// What the user asked for in the task list this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTableAction {
    None,
    Select(String),
    Delete(String),
    Add,
}

/// Relative span of a task, e.g. `WEEK1–WEEK3`, or a single period
/// when start and end fall in the same one. Weeks are counted the way the
/// axis counts them.
pub fn period_span(task: &Task, window: &ProjectWindow) -> String {
    let label = |date| match window.granularity() {
        Granularity::Week => RelativeLabel {
            granularity: Granularity::Week,
            index: relative_week_index(date, window.start()),
        },
        granularity => relative_time_label(date, window.start(), granularity),
    };
    let from = label(task.start);
    let to = label(task.end);
    if from == to {
        from.to_string()
    } else {
        format!("{from}–{to}")
    }
}

fn row_detail(task: &Task, span: &str) -> String {
    if task.category.is_empty() {
        span.to_string()
    } else {
        format!("{span} · {}", task.category)
    }
}

/// Render the task list of the side panel.
pub fn show_task_table(
    tasks: &[Task],
    selected: Option<&str>,
    window: &ProjectWindow,
    colors: &CanvasColors,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Tasks").font(theme::font_header()).color(colors.text));
        ui.label(
            RichText::new(tasks.len().to_string())
                .font(theme::font_small())
                .color(colors.text_dim),
        );
    });

    let add = egui::Button::new(RichText::new("Add Task").color(theme::TEXT_ON_BAR))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(4.0));
    if ui.add_sized([ui.available_width(), 26.0], add).clicked() {
        action = TaskTableAction::Add;
    }
    ui.separator();

    if tasks.is_empty() {
        ui.label(
            RichText::new("Double-click the timeline to add a task.")
                .font(theme::font_small())
                .color(colors.text_dim),
        );
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (row, task) in tasks.iter().enumerate() {
                let is_selected = selected == Some(task.id.as_str());
                let span = period_span(task, window);
                if let Some(requested) = task_row(ui, task, &span, row, is_selected, colors) {
                    if action == TaskTableAction::None {
                        action = requested;
                    }
                }
            }
        });

    action
}

fn task_row(
    ui: &mut Ui,
    task: &Task,
    span: &str,
    row: usize,
    is_selected: bool,
    colors: &CanvasColors,
) -> Option<TaskTableAction> {
    let fill = match (is_selected, row % 2) {
        (true, _) => theme::ACCENT.gamma_multiply(0.3),
        (false, 0) => colors.lane_alt,
        _ => Color32::TRANSPARENT,
    };
    let mut requested = None;

    let frame = egui::Frame::none()
        .fill(fill)
        .rounding(egui::Rounding::same(3.0))
        .inner_margin(egui::Margin::symmetric(6.0, 3.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(4.0, 28.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 1.0, theme::color_from_hex(&task.color));

                ui.vertical(|ui| {
                    ui.add(
                        egui::Label::new(RichText::new(&task.content).color(colors.text)).truncate(),
                    );
                    ui.label(
                        RichText::new(row_detail(task, span))
                            .font(theme::font_small())
                            .color(colors.text_dim),
                    );
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = ui.add(egui::Button::new("✕").frame(false));
                    if delete.on_hover_text("Delete task").clicked() {
                        requested = Some(TaskTableAction::Delete(task.id.clone()));
                    }
                });
            });
        });

    let response = ui
        .interact(
            frame.response.rect,
            egui::Id::new(("task_row", &task.id)),
            egui::Sense::click(),
        )
        .on_hover_text(format!("{} → {}", task.start, task.end));
    if requested.is_none() && response.clicked() {
        requested = Some(TaskTableAction::Select(task.id.clone()));
    }
    ui.add_space(1.0);
    requested
}
