use egui::{menu, RichText, Ui};

use crate::app::TimelineApp;
use crate::model::template::builtin_templates;
use crate::model::Granularity;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  File  ", |ui| {
            if ui.button("  New Project...").clicked() {
                app.open_setup();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.add_enabled_ui(app.has_project(), |ui| {
            ui.menu_button("  View  ", |ui| {
                if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                    app.zoom(1);
                    ui.close_menu();
                }
                if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                    app.zoom(-1);
                    ui.close_menu();
                }
                if ui.button("  Fit to Window").clicked() {
                    app.zoom(0);
                    ui.close_menu();
                }
                ui.separator();

                ui.label(RichText::new("Granularity").small().weak());
                let current = app.granularity();
                for g in Granularity::ALL {
                    if ui.radio(current == Some(g), g.label()).clicked() {
                        app.set_granularity(g);
                        ui.close_menu();
                    }
                }
                ui.separator();

                ui.label(RichText::new("Template").small().weak());
                let active = app.template_id();
                for template in builtin_templates() {
                    let selected = active.as_deref() == Some(template.id.as_str());
                    if ui.radio(selected, &template.name).clicked() {
                        app.set_template(&template.id);
                        ui.close_menu();
                    }
                }
            });
        });

        ui.menu_button("  Help  ", |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(name) = app.project_name() {
                ui.label(RichText::new(name).size(11.0).weak());
            }
        });
    });
}
