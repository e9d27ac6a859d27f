// Result rendering: turns an envelope into cards or a notice on a display target.
// The display target is a trait so the same logic drives the egui panel and tests.

use crate::api::{DrinkRecord, Envelope};

/// Rendered block for one drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub thumbnail_url: String,
    pub category: String,
    pub alcoholic: String,
    pub instructions: String,
}

impl Card {
    pub fn from_record(record: &DrinkRecord) -> Self {
        Self {
            name: record.name.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
            category: record.category.clone(),
            alcoholic: record.alcoholic.clone(),
            instructions: record.instructions.clone(),
        }
    }
}

/// Single-message display states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    EmptyQuery,
    NotFound,
    SearchFailed,
    DemoFailed,
}

impl Notice {
    pub const ALL: [Notice; 4] = [
        Notice::EmptyQuery,
        Notice::NotFound,
        Notice::SearchFailed,
        Notice::DemoFailed,
    ];

    /// Localization message id.
    pub fn message_id(self) -> &'static str {
        match self {
            Notice::EmptyQuery => "notice-empty-query",
            Notice::NotFound => "notice-not-found",
            Notice::SearchFailed => "notice-search-failed",
            Notice::DemoFailed => "notice-demo-failed",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Notice::SearchFailed | Notice::DemoFailed)
    }
}

/// Something results can be drawn into.
pub trait ResultDisplay {
    /// Drop everything currently shown.
    fn clear(&mut self);
    fn append_card(&mut self, card: Card);
    fn show_notice(&mut self, notice: Notice);
}

/// Clear `display`, then show one card per drink in order, or `NotFound` when
/// the envelope carries no `drinks` at all. An empty list shows nothing.
pub fn render_envelope(display: &mut dyn ResultDisplay, envelope: &Envelope) {
    display.clear();
    match &envelope.drinks {
        Some(drinks) => {
            for drink in drinks {
                display.append_card(Card::from_record(drink));
            }
        }
        None => display.show_notice(Notice::NotFound),
    }
}

/// Replace whatever is shown with a single notice.
pub fn render_notice(display: &mut dyn ResultDisplay, notice: Notice) {
    display.clear();
    display.show_notice(notice);
}

/// In-memory result area backing the central panel.
#[derive(Debug, Default, Clone)]
pub struct ResultPanel {
    notice: Option<Notice>,
    cards: Vec<Card>,
}

impl ResultPanel {
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.notice.is_none() && self.cards.is_empty()
    }
}

impl ResultDisplay for ResultPanel {
    fn clear(&mut self) {
        self.notice = None;
        self.cards.clear();
    }

    fn append_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
