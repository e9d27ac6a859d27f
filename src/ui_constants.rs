// Layout constants shared by the views.

/// Card width in logical pixels
pub const CARD_WIDTH: f32 = 280.0;

/// Gap between cards in the grid
pub const CARD_GAP: f32 = 16.0;

/// Room reserved right of the search field for the buttons and spinner
pub const SEARCH_BUTTONS_WIDTH: f32 = 190.0;

/// The search field never shrinks below this
pub const SEARCH_FIELD_MIN_WIDTH: f32 = 160.0;

/// Card-specific layout constants
pub mod card {
    /// Inner margin of card frame (symmetric)
    pub const INNER_MARGIN: f32 = 8.0;

    /// Border radius of card corners
    pub const ROUNDING: f32 = 8.0;

    pub const THUMB_ROUNDING: f32 = 6.0;

    /// Vertical gap between card sections
    pub const FIELD_SPACING: f32 = 6.0;
}
