// Settings module split: store (data & persistence), ui (egui window).
// This file aggregates submodules and re-exports the public API.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod store;
pub mod ui;

pub use store::{load_settings_from_disk, save_settings_to_disk, AppSettings, APP_SETTINGS};
pub use ui::{draw_settings_viewport, open_settings};

static SETTINGS_CHANGED: AtomicBool = AtomicBool::new(false);

/// Helper function to read settings with a closure.
pub fn with_settings<F, R>(f: F) -> R
where
    F: FnOnce(&AppSettings) -> R,
{
    let st = APP_SETTINGS.read().unwrap();
    f(&st)
}

/// Flag that saved settings need to be re-applied (client, language).
pub fn mark_changed() {
    SETTINGS_CHANGED.store(true, Ordering::Relaxed);
}

/// Returns true if settings were saved since the last call.
pub fn take_changed() -> bool {
    SETTINGS_CHANGED.swap(false, Ordering::Relaxed)
}
