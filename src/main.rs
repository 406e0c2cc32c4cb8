#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use ganttit::app::GanttItApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("GanttIt"),
        ..Default::default()
    };

    eframe::run_native(
        "GanttIt",
        options,
        Box::new(|cc| Ok(Box::new(GanttItApp::new(cc)))),
    )
}
