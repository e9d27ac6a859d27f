pub mod cards;
pub mod search_bar;
