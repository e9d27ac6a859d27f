// Card grid for the central panel.

mod card;

use card::drink_card;

use eframe::egui;

use crate::app::ThumbnailCache;
use crate::render::Card;
use crate::ui_constants::{CARD_GAP, CARD_WIDTH};

/// Number of columns that fit `avail_w`, and the left padding that centers them.
pub fn grid_layout(avail_w: f32) -> (usize, f32) {
    let cols = (((avail_w + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).floor() as usize).max(1);
    let row_w = (cols as f32) * CARD_WIDTH + ((cols - 1) as f32) * CARD_GAP;
    let left_pad = ((avail_w - row_w) / 2.0).max(0.0);
    (cols, left_pad)
}

/// Lay cards out in fixed-width rows, in order.
pub fn draw_cards_grid(ui: &mut egui::Ui, cards: &[Card], thumbs: &ThumbnailCache) {
    let (cols, left_pad) = grid_layout(ui.available_width().floor());
    for row in cards.chunks(cols) {
        ui.with_layout(egui::Layout::left_to_right(egui::Align::Min), |ui| {
            ui.add_space(left_pad);
            for (i, card) in row.iter().enumerate() {
                if i > 0 {
                    ui.add_space(CARD_GAP);
                }
                ui.vertical(|ui| {
                    drink_card(
                        ui,
                        card,
                        CARD_WIDTH,
                        thumbs.get(&card.thumbnail_url),
                        thumbs.is_loading(&card.thumbnail_url),
                    );
                });
            }
        });
        ui.add_space(CARD_GAP);
    }
}
