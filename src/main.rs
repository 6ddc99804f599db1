mod app;
mod color;
mod data;
mod state;
mod ui;

use app::CalciumApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Calcium Imaging Processor",
        options,
        Box::new(|_cc| Ok(Box::new(CalciumApp::default()))),
    )
}
