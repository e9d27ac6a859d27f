use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("http status {status} from {url}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: u16,
        url: String,
        message: Option<String>,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("image decode error for {url}: {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("cocktail API unavailable: {0}")]
    Unavailable(String),
}
