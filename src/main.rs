#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use rust_timeline_editor::app::TimelineApp;
use rust_timeline_editor::config::Settings;
use rust_timeline_editor::logging;

fn main() -> eframe::Result<()> {
    let settings = Settings::load_or_default();
    if let Err(err) = logging::init_logging(&settings.log_level, Settings::log_dir().as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Rust Timeline Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Timeline Editor",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineApp::new(cc, settings)))),
    )
}
