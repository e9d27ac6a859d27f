use eframe::egui;

use super::controllers::{Completion, Outcome};
use super::requests::RequestTracker;
use crate::render::{render_envelope, render_notice, ResultDisplay};

/// Apply one completion to `display` unless a newer request was issued since.
/// Returns whether the display was touched.
pub(crate) fn apply_completion(
    tracker: &RequestTracker,
    display: &mut dyn ResultDisplay,
    completion: Completion,
) -> bool {
    if !tracker.is_latest(completion.request) {
        log::debug!("dropping stale response for request {}", completion.request);
        return false;
    }
    match completion.outcome {
        Outcome::Loaded(envelope) => render_envelope(display, &envelope),
        Outcome::Failed(notice) => render_notice(display, notice),
    }
    true
}

impl super::CocktailApp {
    /// Search button / Enter in the search field.
    pub(super) fn start_search(&mut self) {
        if let Some(id) = self.search.click(&self.query, &mut self.results) {
            self.pending = Some(id);
        } else {
            self.pending = None;
        }
    }

    /// Demo button.
    pub(super) fn start_demo(&mut self) {
        self.pending = Some(self.demo.click());
    }

    /// Drain finished requests and apply the current one.
    pub(super) fn poll_incoming(&mut self, ctx: &egui::Context) {
        while let Ok(completion) = self.rx.try_recv() {
            let id = completion.request;
            if apply_completion(&self.tracker, &mut self.results, completion) {
                if self.pending == Some(id) {
                    self.pending = None;
                }
                self.schedule_thumbnails(ctx);
            }
        }
    }

    /// Queue thumbnail downloads for the cards currently shown.
    pub(super) fn schedule_thumbnails(&mut self, ctx: &egui::Context) {
        self.thumbnails
            .retain_only(self.results.cards().iter().map(|c| c.thumbnail_url.as_str()));
        if !super::settings::with_settings(|st| st.load_thumbnails) {
            return;
        }
        for card in self.results.cards() {
            self.thumbnails.schedule(ctx, &card.thumbnail_url);
        }
    }
}
