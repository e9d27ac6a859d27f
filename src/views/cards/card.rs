use eframe::egui::{self, Color32, RichText, Rounding, Stroke};

use crate::localization::translate;
use crate::render::Card;
use crate::ui_constants::card::{FIELD_SPACING, INNER_MARGIN, ROUNDING, THUMB_ROUNDING};

/// Fixed-width card: name, thumbnail, category, type, instructions.
/// Empty fields render as empty values; the labels stay.
pub fn drink_card(
    ui: &mut egui::Ui,
    card: &Card,
    width: f32,
    thumb: Option<&egui::TextureHandle>,
    thumb_loading: bool,
) {
    let fill = Color32::from_rgb(36, 36, 36);
    let stroke = Stroke::new(1.0, Color32::from_rgb(64, 64, 64));

    ui.set_min_width(width);
    ui.set_max_width(width);

    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(Rounding::same(ROUNDING))
        .inner_margin(egui::Margin::same(INNER_MARGIN))
        .show(ui, |ui| {
            let inner_w = width - 2.0 * INNER_MARGIN;
            ui.set_width(inner_w);

            ui.label(
                RichText::new(&card.name)
                    .heading()
                    .color(Color32::from_rgb(230, 230, 230)),
            );
            ui.add_space(FIELD_SPACING);

            let thumb_size = egui::vec2(inner_w, inner_w);
            if let Some(tex) = thumb {
                ui.add(
                    egui::Image::new(tex)
                        .fit_to_exact_size(thumb_size)
                        .rounding(THUMB_ROUNDING),
                );
            } else if thumb_loading {
                ui.allocate_ui(thumb_size, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Spinner::new());
                    });
                });
            }
            ui.add_space(FIELD_SPACING);

            field_row(ui, "card-category", &card.category);
            field_row(ui, "card-type", &card.alcoholic);
            ui.add_space(FIELD_SPACING);
            ui.label(RichText::new(translate("card-instructions")).strong());
            ui.label(&card.instructions);
        });
}

fn field_row(ui: &mut egui::Ui, label_id: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(translate(label_id)).strong());
        ui.label(RichText::new(value).color(Color32::from_rgb(190, 190, 190)));
    });
}
