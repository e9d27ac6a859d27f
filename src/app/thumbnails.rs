use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::{mpsc, Arc};
use url::Url;

use crate::api::{ImageData, ThumbnailProvider};

/// Messages for thumbnail loading.
pub enum ThumbMsg {
    Ok { url: String, data: ImageData },
    Err { url: String },
}

/// Card thumbnails keyed by their URL. Each URL is fetched at most once per
/// session; failures are remembered and not retried.
pub struct ThumbnailCache {
    provider: Arc<dyn ThumbnailProvider>,
    textures: HashMap<String, egui::TextureHandle>,
    loading: HashSet<String>,
    failed: HashSet<String>,
    tx: mpsc::Sender<ThumbMsg>,
    rx: mpsc::Receiver<ThumbMsg>,
}

impl ThumbnailCache {
    pub fn new(provider: Arc<dyn ThumbnailProvider>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            textures: HashMap::new(),
            loading: HashSet::new(),
            failed: HashSet::new(),
            tx,
            rx,
        }
    }

    pub fn set_provider(&mut self, provider: Arc<dyn ThumbnailProvider>) {
        self.provider = provider;
    }

    pub fn get(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(url)
    }

    pub fn is_loading(&self, url: &str) -> bool {
        self.loading.contains(url)
    }

    /// Forget textures, failures and in-flight loads for URLs not in `current`. Called when a
    /// new result replaces the cards, so only on-screen thumbnails stay on the GPU.
    pub fn retain_only<'a>(&mut self, current: impl IntoIterator<Item = &'a str>) {
        let keep: HashSet<&str> = current.into_iter().collect();
        let before = self.textures.len();
        self.textures.retain(|url, _| keep.contains(url.as_str()));
        self.failed.retain(|url| keep.contains(url.as_str()));
        self.loading.retain(|url| keep.contains(url.as_str()));
        let evicted = before - self.textures.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} thumbnails");
        }
    }

    pub fn schedule(&mut self, ctx: &egui::Context, raw_url: &str) {
        if raw_url.is_empty()
            || self.textures.contains_key(raw_url)
            || self.loading.contains(raw_url)
            || self.failed.contains(raw_url)
        {
            return;
        }
        let url = match Url::parse(raw_url) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("thumbnail url rejected: {raw_url}: {e}");
                self.failed.insert(raw_url.to_string());
                return;
            }
        };

        self.loading.insert(raw_url.to_string());
        let provider = self.provider.clone();
        let tx = self.tx.clone();
        let ctx2 = ctx.clone();
        let key = raw_url.to_string();

        super::rt().spawn(async move {
            let msg = match provider.fetch(&url).await {
                Ok(data) => ThumbMsg::Ok { url: key, data },
                Err(e) => {
                    log::warn!("thumbnail fetch failed: {e}");
                    ThumbMsg::Err { url: key }
                }
            };
            let _ = tx.send(msg);
            ctx2.request_repaint();
        });
    }

    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                ThumbMsg::Ok { url, data } => {
                    // Results changed while this was in flight
                    if !self.loading.remove(&url) {
                        continue;
                    }
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [data.width as usize, data.height as usize],
                        &data.rgba,
                    );
                    let tex = ctx.load_texture(
                        format!("thumb_{url}"),
                        image,
                        egui::TextureOptions::default(),
                    );
                    log::debug!("thumbnail ok: {url} size={}x{}", data.width, data.height);
                    self.textures.insert(url, tex);
                }
                ThumbMsg::Err { url } => {
                    if self.loading.remove(&url) {
                        self.failed.insert(url);
                    }
                }
            }
        }
    }
}
