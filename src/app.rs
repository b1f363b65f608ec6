use std::time::Instant;

use log::{error, info, warn};

use crate::config::Settings;
use crate::editor::EditorState;
use crate::model::template::{default_template, template_by_id};
use crate::model::Granularity;
use crate::timeline::TimelineController;
use crate::ui;
use crate::ui::dialogs::SetupDialog;
use crate::ui::theme::{self, CanvasColors};
use crate::ui::timeline_view::EguiTimelineView;

/// Main application state.
pub struct TimelineApp {
    pub settings: Settings,
    pub editor: Option<EditorState>,
    pub controller: Option<TimelineController<EguiTimelineView>>,

    // Dialog state
    pub setup: SetupDialog,
    pub show_about: bool,

    /// Selection last mirrored into the view.
    mirrored_selection: Option<String>,
}

impl TimelineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let setup = SetupDialog::new(&settings.template_id);
        Self {
            settings,
            editor: None,
            controller: None,
            setup,
            show_about: false,
            mirrored_selection: None,
        }
    }

    pub fn has_project(&self) -> bool {
        self.editor.is_some()
    }

    pub fn project_name(&self) -> Option<String> {
        self.editor.as_ref().map(|e| e.project().name.clone())
    }

    pub fn granularity(&self) -> Option<Granularity> {
        self.editor.as_ref().map(|e| e.project().window().granularity())
    }

    pub fn template_id(&self) -> Option<String> {
        self.editor.as_ref().map(|e| e.template().id.clone())
    }

    pub fn open_setup(&mut self) {
        self.setup = SetupDialog::new(&self.settings.template_id);
    }

    /// Build a project from the setup dialog and mount a fresh view for it.
    pub fn create_project(&mut self) {
        let editor = match EditorState::new(self.setup.to_setup(), &self.settings) {
            Ok(editor) => editor,
            Err(err) => {
                warn!("event=project_create module=app status=error reason={err}");
                self.setup.error = Some(err.to_string());
                return;
            }
        };

        // Dropping the previous controller tears its view down.
        self.controller = None;
        let mut controller = TimelineController::mount(
            EguiTimelineView::new(),
            editor.project().window(),
            editor.template(),
            &self.settings,
        );
        if let Err(err) = controller.sync_project(editor.project()) {
            error!("event=sync module=app status=error reason={err}");
        }
        self.controller = Some(controller);
        self.editor = Some(editor);
        self.mirrored_selection = None;
        self.setup.open = false;
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        if let Some(editor) = self.editor.as_mut() {
            editor.set_granularity(granularity);
        }
    }

    pub fn set_template(&mut self, template_id: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if !editor.set_template(template_id) {
            return;
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.set_template(editor.template());
        }
        self.settings.template_id = template_id.to_string();
        self.save_settings();
    }

    /// `1` zooms in, `-1` zooms out, `0` fits the project to the window.
    pub fn zoom(&mut self, direction: i32) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let view = controller.view_mut();
        match direction {
            d if d > 0 => view.zoom_in(),
            d if d < 0 => view.zoom_out(),
            _ => view.fit(),
        }
    }

    pub fn open_settings_folder(&mut self) {
        match Settings::config_dir() {
            Ok(dir) => {
                if let Err(err) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
                    warn!("event=open_settings module=app status=error reason={err}");
                }
            }
            Err(err) => warn!("event=open_settings module=app status=error reason={err}"),
        }
    }

    fn save_settings(&self) {
        let result = Settings::default_path().and_then(|path| self.settings.save_to(&path));
        match result {
            Ok(()) => info!("event=settings_save module=app status=ok"),
            Err(err) => warn!("event=settings_save module=app status=error reason={err}"),
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context, colors: &CanvasColors) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let status = self.editor.as_ref().map_or("Ready", |e| e.status());
                    ui.label(egui::RichText::new(status).size(11.0).color(colors.text_dim));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let (Some(editor), Some(controller)) = (&self.editor, &self.controller) {
                            let window = editor.project().window();
                            ui.label(
                                egui::RichText::new(format!(
                                    "Tasks: {} · Lanes: {} · {} → {}",
                                    editor.project().items().len(),
                                    controller.lanes().lane_count(),
                                    window.start(),
                                    window.end(),
                                ))
                                .size(10.5)
                                .color(colors.text_dim),
                            );
                        }
                    });
                });
            });
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let template = self
            .editor
            .as_ref()
            .map(|e| e.template().clone())
            .or_else(|| template_by_id(&self.settings.template_id))
            .unwrap_or_else(default_template);
        theme::apply_theme(ctx, &template);
        let colors = CanvasColors::from_template(&template);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        self.show_status_bar(ctx, &colors);

        // Side panel: editor above the task list
        let mut table_action = ui::task_table::TaskTableAction::None;
        let mut patch = None;
        if let Some(editor) = self.editor.as_ref() {
            egui::SidePanel::left("task_panel")
                .default_width(theme::SIDE_PANEL_WIDTH)
                .resizable(true)
                .show(ctx, |ui| {
                    let open = editor.editing().or(editor.selected());
                    if let Some(task) = open.and_then(|id| editor.project().get(id)) {
                        patch = ui::task_editor::show_task_editor(task, &template.palette, &colors, ui)
                            .map(|p| (task.id.clone(), p));
                        ui.add_space(4.0);
                        ui.separator();
                    }
                    table_action = ui::task_table::show_task_table(
                        editor.project().items(),
                        editor.selected(),
                        &editor.project().window(),
                        &colors,
                        ui,
                    );
                });
        }

        if let Some(editor) = self.editor.as_mut() {
            if let Some((id, patch)) = patch {
                editor.edit_task(&id, patch);
            }
            match table_action {
                ui::task_table::TaskTableAction::Select(id) => {
                    editor.finish_editing();
                    editor.select(Some(id));
                }
                ui::task_table::TaskTableAction::Delete(id) => {
                    editor.delete_task(&id);
                }
                ui::task_table::TaskTableAction::Add => {
                    editor.add_task_at_start();
                }
                ui::task_table::TaskTableAction::None => {}
            }
        }

        // Central panel: the timeline
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(editor), Some(controller)) = (self.editor.as_mut(), self.controller.as_mut()) else {
                ui.centered_and_justified(|ui| {
                    ui.label("Create a project to get started");
                });
                return;
            };

            if self.mirrored_selection.as_deref() != editor.selected() {
                controller.select(editor.selected());
                self.mirrored_selection = editor.selected().map(str::to_string);
            }

            controller.view_mut().show(ui);
            let now = Instant::now();
            controller.pump(now, editor);
            if let Err(err) = controller.sync_project(editor.project()) {
                error!("event=sync module=app status=error reason={err}");
            }
            if let Some(wait) = controller.next_refresh_in(now) {
                ctx.request_repaint_after(wait);
            }
        });

        // Dialogs
        if self.setup.open {
            ui::dialogs::show_setup_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
