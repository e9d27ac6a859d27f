// Search and Demo click handlers.
// A click runs synchronously up to the network call, then the request continues
// as a tokio task that reports back over a channel. Results are applied on the
// UI thread by `fetch::apply_completion`, which drops anything stale.

use std::future::Future;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;

use super::requests::{RequestId, RequestTracker};
use crate::api::{ApiError, CocktailSource, Envelope};
use crate::render::{render_notice, Notice, ResultDisplay};

pub enum Outcome {
    Loaded(Envelope),
    Failed(Notice),
}

/// Result of one request, tagged with the id it was issued under.
pub struct Completion {
    pub request: RequestId,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Search,
    Demo,
}

impl Endpoint {
    fn label(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Demo => "demo",
        }
    }

    fn failure_notice(self) -> Notice {
        match self {
            Endpoint::Search => Notice::SearchFailed,
            Endpoint::Demo => Notice::DemoFailed,
        }
    }
}

/// Source of the search text.
pub trait QueryInput {
    fn query_text(&self) -> &str;
}

impl QueryInput for str {
    fn query_text(&self) -> &str {
        self
    }
}

impl QueryInput for String {
    fn query_text(&self) -> &str {
        self.as_str()
    }
}

type Repaint = Arc<dyn Fn() + Send + Sync>;

/// Shared plumbing for both controllers: runtime handle, completion channel,
/// repaint hook and the request tracker they all issue ids from.
#[derive(Clone)]
pub struct Dispatcher {
    handle: Handle,
    tx: mpsc::Sender<Completion>,
    repaint: Repaint,
    tracker: RequestTracker,
}

impl Dispatcher {
    pub fn new(handle: Handle, tx: mpsc::Sender<Completion>, tracker: RequestTracker) -> Self {
        Self {
            handle,
            tx,
            repaint: Arc::new(|| {}),
            tracker,
        }
    }

    /// Called after every completion is sent, to wake the UI.
    pub fn with_repaint(mut self, repaint: impl Fn() + Send + Sync + 'static) -> Self {
        self.repaint = Arc::new(repaint);
        self
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    fn spawn<F>(&self, request: RequestId, endpoint: Endpoint, fut: F)
    where
        F: Future<Output = Result<Envelope, ApiError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        self.handle.spawn(async move {
            let outcome = match fut.await {
                Ok(envelope) => {
                    log::info!(
                        "{} request {request} done: {} drinks",
                        endpoint.label(),
                        envelope.drinks.as_ref().map_or(0, Vec::len)
                    );
                    Outcome::Loaded(envelope)
                }
                Err(err) => {
                    log::error!("{} request {request} failed: {err}", endpoint.label());
                    Outcome::Failed(endpoint.failure_notice())
                }
            };
            let _ = tx.send(Completion { request, outcome });
            repaint();
        });
    }
}

pub struct SearchController {
    source: Arc<dyn CocktailSource>,
    dispatcher: Dispatcher,
}

impl SearchController {
    pub fn new(source: Arc<dyn CocktailSource>, dispatcher: Dispatcher) -> Self {
        Self { source, dispatcher }
    }

    /// Handle a Search click. Returns the id of the started request, or `None`
    /// when the trimmed input is empty and the prompt was shown instead.
    pub fn click<I>(&self, input: &I, display: &mut dyn ResultDisplay) -> Option<RequestId>
    where
        I: QueryInput + ?Sized,
    {
        let name = input.query_text().trim();
        if name.is_empty() {
            // Still supersedes anything in flight: the prompt is the newest result.
            self.dispatcher.tracker().issue();
            render_notice(display, Notice::EmptyQuery);
            return None;
        }

        let request = self.dispatcher.tracker().issue();
        log::info!("search request {request}: {name:?}");

        let source = self.source.clone();
        let name = name.to_string();
        self.dispatcher
            .spawn(request, Endpoint::Search, async move { source.search(&name).await });
        Some(request)
    }
}

pub struct DemoController {
    source: Arc<dyn CocktailSource>,
    dispatcher: Dispatcher,
}

impl DemoController {
    pub fn new(source: Arc<dyn CocktailSource>, dispatcher: Dispatcher) -> Self {
        Self { source, dispatcher }
    }

    /// Handle a Demo click: always starts a request.
    pub fn click(&self) -> RequestId {
        let request = self.dispatcher.tracker().issue();
        log::info!("demo request {request}");

        let source = self.source.clone();
        self.dispatcher
            .spawn(request, Endpoint::Demo, async move { source.demo().await });
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{drink, Call, FakeSource, Reply};
    use crate::app::fetch::apply_completion;
    use crate::render::ResultPanel;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    struct Harness {
        _rt: tokio::runtime::Runtime,
        source: Arc<FakeSource>,
        tracker: RequestTracker,
        search: SearchController,
        demo: DemoController,
        rx: mpsc::Receiver<Completion>,
        panel: ResultPanel,
    }

    impl Harness {
        fn new(replies: Vec<Reply>) -> Self {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            let (tx, rx) = mpsc::channel();
            let tracker = RequestTracker::new();
            let dispatcher = Dispatcher::new(rt.handle().clone(), tx, tracker.clone());
            let source = Arc::new(FakeSource::new(replies));
            let dyn_source: Arc<dyn CocktailSource> = source.clone();
            Self {
                search: SearchController::new(dyn_source.clone(), dispatcher.clone()),
                demo: DemoController::new(dyn_source, dispatcher),
                _rt: rt,
                source,
                tracker,
                rx,
                panel: ResultPanel::default(),
            }
        }

        fn search(&mut self, text: &str) -> Option<RequestId> {
            self.search.click(text, &mut self.panel)
        }

        /// Wait for the next completion and apply it like the UI would.
        fn apply_next(&mut self) -> (RequestId, bool) {
            let completion = self.rx.recv_timeout(WAIT).expect("completion");
            let id = completion.request;
            let applied = apply_completion(&self.tracker, &mut self.panel, completion);
            (id, applied)
        }
    }

    fn test_drink_envelope() -> Envelope {
        Envelope::with_drinks(vec![drink("Test", "x.png", "Cocktail", "Alcoholic", "Mix.")])
    }

    #[test]
    fn blank_input_shows_prompt_without_fetching() {
        for input in ["", "   ", "\t\n"] {
            let mut h = Harness::new(vec![]);
            assert_eq!(h.search(input), None);
            assert_eq!(h.panel.notice(), Some(Notice::EmptyQuery));
            assert!(h.panel.cards().is_empty());
            assert!(h.rx.recv_timeout(Duration::from_millis(100)).is_err());
            assert!(h.source.calls().is_empty());
        }
    }

    #[test]
    fn search_issues_exactly_one_request_with_trimmed_name() {
        let mut h = Harness::new(vec![Reply::ok(test_drink_envelope())]);
        let id = h.search("  Mojito ").expect("request started");

        let (done, applied) = h.apply_next();
        assert_eq!(done, id);
        assert!(applied);
        assert_eq!(h.source.calls(), vec![Call::Search("Mojito".to_string())]);
        assert!(h.rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn demo_renders_card_with_record_text() {
        let mut h = Harness::new(vec![Reply::ok(test_drink_envelope())]);
        h.demo.click();
        h.apply_next();

        assert_eq!(h.source.calls(), vec![Call::Demo]);
        assert_eq!(h.panel.cards().len(), 1);
        let card = &h.panel.cards()[0];
        assert_eq!(card.name, "Test");
        assert_eq!(card.category, "Cocktail");
        assert_eq!(card.alcoholic, "Alcoholic");
        assert_eq!(card.instructions, "Mix.");
        assert_eq!(h.panel.notice(), None);
    }

    #[test]
    fn search_failure_shows_connection_error() {
        let mut h = Harness::new(vec![Reply::fail("network down")]);
        h.search("Mojito");
        h.apply_next();

        assert_eq!(h.panel.notice(), Some(Notice::SearchFailed));
        assert!(h.panel.cards().is_empty());
    }

    #[test]
    fn demo_failure_shows_simulated_api_error() {
        let mut h = Harness::new(vec![Reply::fail("boom")]);
        h.demo.click();
        h.apply_next();

        assert_eq!(h.panel.notice(), Some(Notice::DemoFailed));
        assert!(h.panel.cards().is_empty());
    }

    #[test]
    fn late_response_of_older_click_is_discarded() {
        let slow = Envelope::with_drinks(vec![drink("Slow", "", "", "", "")]);
        let mut h = Harness::new(vec![
            Reply::ok(slow).after(Duration::from_millis(300)),
            Reply::ok(test_drink_envelope()),
        ]);
        let first = h.search("Slow").unwrap();
        let second = h.demo.click();

        let (id, applied) = h.apply_next();
        assert_eq!(id, second);
        assert!(applied);

        let (id, applied) = h.apply_next();
        assert_eq!(id, first);
        assert!(!applied);

        assert_eq!(h.panel.cards().len(), 1);
        assert_eq!(h.panel.cards()[0].name, "Test");
    }

    #[test]
    fn blank_search_supersedes_request_in_flight() {
        let mut h = Harness::new(vec![
            Reply::ok(test_drink_envelope()).after(Duration::from_millis(200)),
        ]);
        h.search("Mojito").unwrap();
        assert_eq!(h.search(" "), None);

        let (_, applied) = h.apply_next();
        assert!(!applied);
        assert_eq!(h.panel.notice(), Some(Notice::EmptyQuery));
        assert!(h.panel.cards().is_empty());
    }
}
