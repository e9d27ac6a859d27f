use eframe::egui::{self, Key, TextEdit, Ui};

use crate::localization::translate;

/// What the user asked for this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchBarAction {
    pub search: bool,
    pub demo: bool,
}

/// Search field + Search/Demo buttons. Enter in the field counts as Search.
/// `busy` only adds a spinner; the buttons stay clickable.
pub fn search_bar(ui: &mut Ui, query: &mut String, busy: bool) -> SearchBarAction {
    let mut action = SearchBarAction::default();
    ui.horizontal(|ui| {
        let field_w = (ui.available_width() - crate::ui_constants::SEARCH_BUTTONS_WIDTH)
            .max(crate::ui_constants::SEARCH_FIELD_MIN_WIDTH);
        let resp = ui.add(
            TextEdit::singleline(query)
                .hint_text(translate("search-placeholder"))
                .desired_width(field_w),
        );
        if resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            action.search = true;
        }
        if ui.button(translate("search-button")).clicked() {
            action.search = true;
        }
        if ui.button(translate("demo-button")).clicked() {
            action.demo = true;
        }
        if busy {
            ui.add(egui::Spinner::new());
        }
    });
    action
}
