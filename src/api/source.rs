use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use url::Url;

use super::{ApiError, Envelope, ErrorBody};

pub const SEARCH_PATH: &str = "api/cocktails";
pub const DEMO_PATH: &str = "api/demo";

const USER_AGENT: &str = concat!("cocktail-finder/", env!("CARGO_PKG_VERSION"));

/// Where cocktail envelopes come from. The UI only talks to this trait so the
/// controllers can run against an in-memory source in tests.
#[async_trait]
pub trait CocktailSource: Send + Sync {
    /// `GET /api/cocktails?name=<name>`
    async fn search(&self, name: &str) -> Result<Envelope, ApiError>;
    /// `GET /api/demo`
    async fn demo(&self) -> Result<Envelope, ApiError>;
}

/// Client for the proxy API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
    search_endpoint: Url,
    demo_endpoint: Url,
}

impl HttpSource {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = parse_base_url(base_url)?;
        let invalid = |source| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        };
        let search_endpoint = base.join(SEARCH_PATH).map_err(invalid)?;
        let demo_endpoint = base.join(DEMO_PATH).map_err(invalid)?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base,
            search_endpoint,
            demo_endpoint,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Search endpoint with `name` form-encoded, so `&`, `#` and spaces
    /// can't leak into the rest of the URL.
    pub fn search_url(&self, name: &str) -> Url {
        let mut url = self.search_endpoint.clone();
        url.query_pairs_mut().append_pair("name", name);
        url
    }

    pub fn demo_url(&self) -> Url {
        self.demo_endpoint.clone()
    }

    async fn get_envelope(&self, url: Url) -> Result<Envelope, ApiError> {
        log::debug!("GET {url}");
        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.summary());
            log::warn!("GET {url}: http status {}", status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CocktailSource for HttpSource {
    async fn search(&self, name: &str) -> Result<Envelope, ApiError> {
        self.get_envelope(self.search_url(name)).await
    }

    async fn demo(&self) -> Result<Envelope, ApiError> {
        self.get_envelope(self.demo_url()).await
    }
}

/// Stand-in used when no client could be built (e.g. a broken base URL in
/// the settings file). Every request fails, so every click ends in a notice.
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CocktailSource for UnavailableSource {
    async fn search(&self, _name: &str) -> Result<Envelope, ApiError> {
        Err(ApiError::Unavailable(self.reason.clone()))
    }

    async fn demo(&self) -> Result<Envelope, ApiError> {
        Err(ApiError::Unavailable(self.reason.clone()))
    }
}

/// Base URLs are joined against, so they need a trailing slash to keep any
/// path prefix (`http://host/proxy` -> `http://host/proxy/api/demo`).
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|source| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn source(base: &str) -> HttpSource {
        HttpSource::new(base, Some(Duration::from_secs(5))).unwrap()
    }

    /// Serves exactly one canned HTTP response and yields the request line it saw.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn search_url_for_plain_name() {
        let src = source("http://127.0.0.1:5000");
        assert_eq!(
            src.search_url("Mojito").as_str(),
            "http://127.0.0.1:5000/api/cocktails?name=Mojito"
        );
    }

    #[test]
    fn search_url_encodes_reserved_characters() {
        let src = source("http://127.0.0.1:5000");
        let url = src.search_url("Gin & Tonic #1");
        assert_eq!(url.query(), Some("name=Gin+%26+Tonic+%231"));
        assert_eq!(url.fragment(), None);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("name".to_string(), "Gin & Tonic #1".to_string())]);
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let src = source("https://example.com/proxy");
        assert_eq!(src.base_url().as_str(), "https://example.com/proxy/");
        assert_eq!(src.demo_url().as_str(), "https://example.com/proxy/api/demo");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpSource::new("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn search_requests_encoded_name_and_parses_body() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"drinks":[{"strDrink":"Mojito","strDrinkThumb":"m.png","strCategory":"Cocktail","strAlcoholic":"Alcoholic","strInstructions":"Muddle."}]}"#,
        )
        .await;

        let env = source(&base).search("Mojito").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(request_line, "GET /api/cocktails?name=Mojito HTTP/1.1");
        let drinks = env.drinks.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].name, "Mojito");
    }

    #[tokio::test]
    async fn demo_hits_demo_endpoint() {
        let (base, server) = serve_once("200 OK", r#"{"drinks":[]}"#).await;

        let env = source(&base).demo().await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(request_line, "GET /api/demo HTTP/1.1");
        assert_eq!(env.drinks, Some(Vec::new()));
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let (base, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error":"Error al conectar con la API externa","details":"timed out"}"#,
        )
        .await;

        let err = source(&base).search("Mojito").await.unwrap_err();
        server.await.unwrap();

        match err {
            ApiError::Status {
                status, message, ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(
                    message.as_deref(),
                    Some("Error al conectar con la API externa (timed out)")
                );
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let (base, server) = serve_once("200 OK", "<html>oops</html>").await;

        let err = source(&base).demo().await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(&format!("http://{addr}")).demo().await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unavailable_source_always_fails() {
        let src = UnavailableSource::new("bad base url");
        assert!(matches!(src.search("x").await, Err(ApiError::Unavailable(_))));
        assert!(matches!(src.demo().await, Err(ApiError::Unavailable(_))));
    }
}
