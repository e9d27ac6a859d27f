use eframe::egui::{self, Color32, RichText};
use log::{Level, LevelFilter};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::windows::LOGS_WINDOW;
use crate::localization::{translate, translate_with};

const LEVELS: [LevelFilter; 4] = [LevelFilter::Error, LevelFilter::Warn, LevelFilter::Info, LevelFilter::Debug];

// Index into LEVELS; Info by default.
static MIN_LEVEL: AtomicUsize = AtomicUsize::new(2);

fn level_color(level: Level) -> Color32 {
    match level {
        Level::Error => Color32::from_rgb(230, 90, 90),
        Level::Warn => Color32::from_rgb(230, 190, 90),
        Level::Info => Color32::LIGHT_GRAY,
        Level::Debug | Level::Trace => Color32::from_rgb(130, 170, 230),
    }
}

pub fn draw_logs_viewport(ctx: &egui::Context) {
    let builder = egui::ViewportBuilder::default()
        .with_title(translate("logs-title"))
        .with_inner_size([760.0, 460.0]);
    LOGS_WINDOW.show(ctx, builder, |ctx| {
        let mut level_idx = MIN_LEVEL.load(Ordering::Relaxed).min(LEVELS.len() - 1);
        let lines = crate::logger::snapshot(LEVELS[level_idx]);

        egui::TopBottomPanel::top("logs_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_source("logs_level")
                    .selected_text(LEVELS[level_idx].as_str())
                    .show_ui(ui, |ui| {
                        for (i, level) in LEVELS.iter().enumerate() {
                            ui.selectable_value(&mut level_idx, i, level.as_str());
                        }
                    });
                if ui.button(translate("logs-copy")).clicked() {
                    let text: Vec<String> = lines.iter().map(|l| l.render()).collect();
                    ui.output_mut(|o| o.copied_text = text.join("\n"));
                }
                if ui.button(translate("logs-clear")).clicked() {
                    crate::logger::clear();
                }
                ui.label(translate_with("logs-lines", &[("count", lines.len().into())]));
            });
        });
        MIN_LEVEL.store(level_idx, Ordering::Relaxed);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &lines {
                        ui.label(RichText::new(line.render()).monospace().color(level_color(line.level)));
                    }
                });
        });
    });
}
