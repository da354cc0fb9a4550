mod app;
mod ui;

use app::PredictorApp;
use eframe::egui;
use ipu_predictor::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load_or_default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IPU College Predictor",
        options,
        Box::new(move |cc| Ok(Box::new(PredictorApp::new(config, &cc.egui_ctx)))),
    )
}
