use anyhow::Context;
use eframe::egui;

use wh_market_dashboard::app::DashboardApp;
use wh_market_dashboard::config::DashboardConfig;
use wh_market_dashboard::data::loader::load_builtin;
use wh_market_dashboard::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let dataset = load_builtin()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.as_str())
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let window_title = config.window_title.clone();
    let dark_mode = config.dark_mode;
    let state = AppState::new(dataset, config);

    eframe::run_native(
        &window_title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running dashboard window")
}
