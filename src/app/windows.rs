// Secondary OS windows (settings, logs, about) share one open/close switch.

use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct WindowToggle {
    key: &'static str,
    open: AtomicBool,
}

pub static SETTINGS_WINDOW: WindowToggle = WindowToggle::new("settings_window");
pub static LOGS_WINDOW: WindowToggle = WindowToggle::new("logs_window");
pub static ABOUT_WINDOW: WindowToggle = WindowToggle::new("about_window");

impl WindowToggle {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            open: AtomicBool::new(false),
        }
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Relaxed);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Relaxed);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    /// Draw the window this frame if it is open. A close request from the OS
    /// flips the switch off and skips `body`.
    pub fn show(&self, ctx: &egui::Context, builder: egui::ViewportBuilder, body: impl FnOnce(&egui::Context)) {
        if !self.is_open() {
            return;
        }
        ctx.show_viewport_immediate(egui::ViewportId::from_hash_of(self.key), builder, |ctx, _class| {
            if ctx.input(|i| i.viewport().close_requested()) {
                self.close();
                ctx.request_repaint();
                return;
            }
            body(ctx);
        });
    }
}
