// Settings UI: staged inputs applied on Save, dropped on Cancel.

use eframe::egui;
use lazy_static::lazy_static;
use std::sync::RwLock;
use strum::IntoEnumIterator;

use super::store::{save_settings_to_disk, AppSettings, APP_SETTINGS};
use crate::api::HttpSource;
use crate::app::windows::SETTINGS_WINDOW;
use crate::localization::{translate, SupportedLang};

lazy_static! {
    // Staged copy edited by the window; applied on Save
    static ref STAGED: RwLock<AppSettings> = RwLock::new(AppSettings::default());
    static ref STAGED_ERROR: RwLock<Option<String>> = RwLock::new(None);
}

pub fn open_settings() {
    let current = APP_SETTINGS.read().unwrap().clone();
    *STAGED.write().unwrap() = current;
    *STAGED_ERROR.write().unwrap() = None;
    SETTINGS_WINDOW.open();
}

fn close(ctx: &egui::Context) {
    SETTINGS_WINDOW.close();
    ctx.request_repaint();
}

/// Validate and apply the staged settings. Returns an error message for the window.
fn apply_staged() -> Result<(), String> {
    let staged = STAGED.read().unwrap().clone();
    if let Err(e) = HttpSource::new(&staged.api_base_url, staged.request_timeout()) {
        return Err(e.to_string());
    }
    {
        let mut st = APP_SETTINGS.write().unwrap();
        *st = staged;
    } // drop write lock before saving
    save_settings_to_disk();
    super::mark_changed();
    Ok(())
}

fn language_label(lang: Option<SupportedLang>) -> String {
    match lang {
        Some(l) => l.native_name().to_string(),
        None => translate("settings-language-auto"),
    }
}

pub fn draw_settings_viewport(ctx: &egui::Context) {
    let builder = egui::ViewportBuilder::default()
        .with_title(translate("settings-title"))
        .with_inner_size([480.0, 260.0])
        .with_resizable(true);
    SETTINGS_WINDOW.show(ctx, builder, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut staged = STAGED.read().unwrap().clone();

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(translate("settings-api-base"));
                    ui.add(
                        egui::TextEdit::singleline(&mut staged.api_base_url)
                            .hint_text(super::store::DEFAULT_API_BASE)
                            .desired_width(280.0),
                    );
                    ui.end_row();

                    ui.label(translate("settings-timeout"));
                    ui.add(
                        egui::DragValue::new(&mut staged.request_timeout_secs)
                            .clamp_range(0..=120)
                            .suffix(" s"),
                    );
                    ui.end_row();

                    ui.label(translate("settings-language"));
                    egui::ComboBox::from_id_source("settings_language")
                        .selected_text(language_label(staged.language))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut staged.language, None, language_label(None));
                            for lang in SupportedLang::iter() {
                                ui.selectable_value(
                                    &mut staged.language,
                                    Some(lang),
                                    language_label(Some(lang)),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label(translate("settings-thumbnails"));
                    ui.checkbox(&mut staged.load_thumbnails, "");
                    ui.end_row();
                });

            *STAGED.write().unwrap() = staged;

            if let Some(err) = STAGED_ERROR.read().unwrap().as_ref() {
                ui.add_space(6.0);
                ui.colored_label(egui::Color32::RED, err);
            }

            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(translate("settings-save")).clicked() {
                    match apply_staged() {
                        Ok(()) => close(ctx),
                        Err(e) => {
                            log::warn!("Settings not saved: {e}");
                            *STAGED_ERROR.write().unwrap() = Some(e);
                        }
                    }
                }
                if ui.button(translate("settings-cancel")).clicked() {
                    close(ctx);
                }
            });
        });
    });
}
