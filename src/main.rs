#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide the console in release builds
// Entry point: logger, settings and localization, then the eframe window.

use eframe::egui;

mod api;
mod app;
mod localization;
mod logger;
mod render;
mod ui_constants;
mod views;

fn main() -> eframe::Result<()> {
    // .env may carry COCKTAIL_API_BASE / RUST_LOG for local runs
    let dotenv = dotenvy::dotenv();
    logger::init();
    if let Ok(path) = dotenv {
        log::info!("Loaded environment from {}", path.display());
    }
    app::settings::load_settings_from_disk();
    let preferred_lang = app::settings::with_settings(|st| st.language);
    if let Err(e) = localization::initialize_localization(preferred_lang) {
        log::error!("Localization initialization failed: {e}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([420.0, 320.0])
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        localization::translate("app-window-title").as_str(),
        native_options,
        Box::new(|cc| Box::new(app::CocktailApp::new(&cc.egui_ctx))),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}
