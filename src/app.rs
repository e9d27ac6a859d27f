// Application state and the main window. Networking lives in the controllers
// and the thumbnail cache; this file wires them to egui.

use eframe::egui::RichText;
use eframe::{egui, App};
use std::sync::{mpsc, Arc};

use crate::api::{CocktailSource, HttpSource, NetworkThumbnails, NoThumbnails, ThumbnailProvider, UnavailableSource};
use crate::localization::{translate, translate_with};
use crate::render::ResultPanel;
use crate::views::cards::draw_cards_grid;
use crate::views::search_bar::search_bar;

pub mod settings;
mod about_ui;
mod logs_ui;
mod windows;

mod controllers;
mod fetch;
mod requests;
mod runtime;
mod thumbnails;
pub use runtime::rt;
pub use thumbnails::ThumbnailCache;

use controllers::{Completion, DemoController, Dispatcher, SearchController};
use requests::{RequestId, RequestTracker};

pub struct CocktailApp {
    query: String,
    search: SearchController,
    demo: DemoController,
    tracker: RequestTracker,
    results: ResultPanel,
    // Latest request still waiting for its completion
    pending: Option<RequestId>,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    thumbnails: ThumbnailCache,
    ctx: egui::Context,
    seen_log_revision: u64,
}

fn build_source() -> Arc<dyn CocktailSource> {
    let (base, timeout) = settings::with_settings(|st| (st.effective_api_base(), st.request_timeout()));
    match HttpSource::new(&base, timeout) {
        Ok(source) => {
            log::info!("Using cocktail API at {}", source.base_url());
            Arc::new(source)
        }
        Err(e) => {
            log::error!("Cannot use API base {base:?}: {e}");
            Arc::new(UnavailableSource::new(e.to_string()))
        }
    }
}

fn build_thumbnail_provider() -> Arc<dyn ThumbnailProvider> {
    let timeout = settings::with_settings(|st| st.request_timeout());
    match NetworkThumbnails::new(timeout) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            log::error!("Thumbnail client unavailable: {e}");
            Arc::new(NoThumbnails)
        }
    }
}

fn build_controllers(
    ctx: &egui::Context,
    tx: &mpsc::Sender<Completion>,
    tracker: &RequestTracker,
) -> (SearchController, DemoController) {
    let repaint_ctx = ctx.clone();
    let dispatcher = Dispatcher::new(rt().handle().clone(), tx.clone(), tracker.clone())
        .with_repaint(move || repaint_ctx.request_repaint());
    let source = build_source();
    (
        SearchController::new(source.clone(), dispatcher.clone()),
        DemoController::new(source, dispatcher),
    )
}

impl CocktailApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (tx, rx) = mpsc::channel();
        let tracker = RequestTracker::new();
        let (search, demo) = build_controllers(ctx, &tx, &tracker);
        Self {
            query: String::new(),
            search,
            demo,
            tracker,
            results: ResultPanel::default(),
            pending: None,
            tx,
            rx,
            thumbnails: ThumbnailCache::new(build_thumbnail_provider()),
            ctx: ctx.clone(),
            seen_log_revision: 0,
        }
    }

    /// Re-apply saved settings: new HTTP clients and UI language.
    /// The tracker is kept, so replies to requests issued before the change still count.
    fn rebuild_clients(&mut self) {
        let (search, demo) = build_controllers(&self.ctx, &self.tx, &self.tracker);
        self.search = search;
        self.demo = demo;
        self.thumbnails.set_provider(build_thumbnail_provider());

        let lang = settings::with_settings(|st| st.language);
        if let Err(e) = crate::localization::initialize_localization(lang) {
            log::error!("Localization re-initialization failed: {e}");
        }
        log::info!("Settings applied");
    }

    fn draw_results(&self, ui: &mut egui::Ui) {
        if let Some(notice) = self.results.notice() {
            let text = RichText::new(translate(notice.message_id())).size(16.0);
            if notice.is_error() {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), text);
            } else {
                ui.label(text);
            }
            return;
        }
        let cards = self.results.cards();
        if cards.is_empty() {
            return;
        }
        ui.label(
            RichText::new(translate_with("results-count", &[("count", cards.len().into())]))
                .color(egui::Color32::GRAY),
        );
        ui.add_space(8.0);
        draw_cards_grid(ui, cards, &self.thumbnails);
    }
}

impl App for CocktailApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep the Logs window live while it is open
        let log_revision = crate::logger::revision();
        if log_revision != self.seen_log_revision {
            self.seen_log_revision = log_revision;
            if windows::LOGS_WINDOW.is_open() {
                ctx.request_repaint();
            }
        }
        if settings::take_changed() {
            self.rebuild_clients();
        }

        self.thumbnails.poll(ctx);
        self.poll_incoming(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(translate("menu-settings")).clicked() {
                    settings::open_settings();
                }
                if ui.button(translate("menu-logs")).clicked() {
                    windows::LOGS_WINDOW.open();
                }
                if ui.button(translate("menu-about")).clicked() {
                    windows::ABOUT_WINDOW.open();
                }
            });
        });

        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            let action = search_bar(ui, &mut self.query, self.pending.is_some());
            ui.add_space(6.0);
            if action.search {
                self.start_search();
            } else if action.demo {
                self.start_demo();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.draw_results(ui));
        });

        logs_ui::draw_logs_viewport(ctx);
        about_ui::draw_about_viewport(ctx);
        settings::draw_settings_viewport(ctx);
    }
}
