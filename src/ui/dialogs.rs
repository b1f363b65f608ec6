use chrono::{Duration, NaiveDate};
use egui::{Color32, Context, RichText, Window};

use crate::app::TimelineApp;
use crate::editor::ProjectSetup;
use crate::model::template::builtin_templates;
use crate::model::Granularity;
use crate::ui::theme;

/// Fields of the project setup dialog.
#[derive(Debug, Clone)]
pub struct SetupDialog {
    pub open: bool,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
    pub template_id: String,
    pub error: Option<String>,
}

impl SetupDialog {
    pub fn new(template_id: &str) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            open: true,
            name: String::new(),
            start: today,
            end: today + Duration::days(90),
            granularity: Granularity::default(),
            template_id: template_id.to_string(),
            error: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn to_setup(&self) -> ProjectSetup {
        ProjectSetup {
            name: self.name.clone(),
            start: self.start,
            end: self.end,
            granularity: self.granularity,
            template_id: self.template_id.clone(),
        }
    }
}

/// Render the "New Project" dialog.
pub fn show_setup_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut create = false;
    let mut cancel = false;
    let can_cancel = app.has_project();

    Window::new(RichText::new("New Project").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            let dialog = &mut app.setup;
            ui.add_space(4.0);

            egui::Grid::new("setup_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut dialog.name).hint_text("Project name..."),
                    );
                    ui.end_row();

                    ui.label("Start");
                    ui.add(egui_extras::DatePickerButton::new(&mut dialog.start).id_salt("setup_dp_start"));
                    ui.end_row();

                    ui.label("End");
                    ui.add(egui_extras::DatePickerButton::new(&mut dialog.end).id_salt("setup_dp_end"));
                    ui.end_row();

                    ui.label("Granularity");
                    ui.horizontal(|ui| {
                        for g in Granularity::ALL {
                            ui.radio_value(&mut dialog.granularity, g, g.label());
                        }
                    });
                    ui.end_row();

                    ui.label("Template");
                    let current = builtin_templates()
                        .into_iter()
                        .find(|t| t.id == dialog.template_id)
                        .map(|t| t.name)
                        .unwrap_or_default();
                    egui::ComboBox::from_id_salt("setup_template")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            for template in builtin_templates() {
                                ui.selectable_value(&mut dialog.template_id, template.id.clone(), template.name);
                            }
                        });
                    ui.end_row();
                });

            if !dialog.is_valid() {
                ui.add_space(4.0);
                ui.label(RichText::new("The start date must be before the end date.").color(theme::MARKER_LINE));
            }
            if let Some(error) = &dialog.error {
                ui.label(RichText::new(error).color(theme::MARKER_LINE));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(dialog.is_valid(), create_btn).clicked() {
                    create = true;
                }
                if can_cancel && ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancel = true;
                }
            });
            ui.add_space(2.0);
        });

    if create {
        app.create_project();
    }
    if can_cancel && (cancel || ctx.input(|i| i.key_pressed(egui::Key::Escape))) {
        app.setup.open = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rust Timeline Editor").strong());
                ui.add_space(2.0);
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(10.0);
                ui.label("Plan projects in relative days, weeks or months.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
