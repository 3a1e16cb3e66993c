//! Native entry point.

mod app;
mod host;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("starting textmill");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("textmill")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "textmill",
        options,
        Box::new(|cc| Ok(Box::new(app::TextmillApp::new(cc)?))),
    )
}
