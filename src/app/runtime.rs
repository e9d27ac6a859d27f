use std::sync::OnceLock;

static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Background runtime for requests and thumbnail downloads; the egui loop
/// stays on the main thread.
pub fn rt() -> &'static tokio::runtime::Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("cocktail-net")
            .enable_all()
            .build()
            .expect("tokio runtime")
    })
}
