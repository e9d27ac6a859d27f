use eframe::egui;

use super::settings;
use super::windows::ABOUT_WINDOW;
use crate::localization::{current_language, translate, translate_with};

const DATA_SOURCE_URL: &str = "https://www.thecocktaildb.com/";

pub fn draw_about_viewport(ctx: &egui::Context) {
    let builder = egui::ViewportBuilder::default()
        .with_title(translate("about-title"))
        .with_inner_size([440.0, 200.0])
        .with_resizable(false);
    ABOUT_WINDOW.show(ctx, builder, |ctx| {
        let api_base = settings::with_settings(|st| st.effective_api_base());
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(translate("app-window-title"));
            ui.label(translate_with("about-version", &[("version", env!("CARGO_PKG_VERSION").into())]));
            ui.separator();
            egui::Grid::new("about_grid").num_columns(2).show(ui, |ui| {
                ui.label(translate("about-api"));
                ui.monospace(api_base);
                ui.end_row();
                ui.label(translate("about-language"));
                ui.label(current_language().native_name());
                ui.end_row();
            });
            ui.add_space(6.0);
            ui.hyperlink_to(translate("about-data-source"), DATA_SOURCE_URL);
        });
    });
}
