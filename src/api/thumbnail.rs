use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use super::ApiError;

/// Raw RGBA image data for transfer between async tasks and UI.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Byte length of a `width` x `height` RGBA buffer, computed in `usize` so
/// large dimensions cannot overflow `u32`.
pub fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

impl ImageData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(
            rgba.len(),
            rgba_len(width, height),
            "RGBA buffer size mismatch"
        );
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn decode(url: &Url, bytes: &[u8]) -> Result<Self, ApiError> {
        let img = image::load_from_memory(bytes).map_err(|source| ApiError::Image {
            url: url.to_string(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Ok(Self::new(w, h, rgba.into_raw()))
    }
}

#[async_trait]
pub trait ThumbnailProvider: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<ImageData, ApiError>;
}

pub struct NetworkThumbnails {
    client: reqwest::Client,
}

impl NetworkThumbnails {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ThumbnailProvider for NetworkThumbnails {
    async fn fetch(&self, url: &Url) -> Result<ImageData, ApiError> {
        log::debug!("fetch_thumbnail: GET {url}");
        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "image/jpeg,image/png,image/gif,image/webp")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: None,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();
        let bytes = resp.bytes().await?;
        log::debug!(
            "fetch_thumbnail: {url} content-type={content_type} size={}B",
            bytes.len()
        );

        // Decoding is CPU-bound; keep it off the async workers.
        let url = url.clone();
        tokio::task::spawn_blocking(move || ImageData::decode(&url, &bytes))
            .await
            .map_err(|e| ApiError::Unavailable(format!("thumbnail decode task failed: {e}")))?
    }
}

/// Stand-in when no HTTP client could be built; every fetch fails.
pub struct NoThumbnails;

#[async_trait]
impl ThumbnailProvider for NoThumbnails {
    async fn fetch(&self, url: &Url) -> Result<ImageData, ApiError> {
        Err(ApiError::Unavailable(format!("thumbnails disabled, skipped {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 30, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_into_rgba() {
        let url = Url::parse("https://img.example/x.png").unwrap();
        let data = ImageData::decode(&url, &png_bytes(3, 2)).unwrap();
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.rgba.len(), 3 * 2 * 4);
        assert_eq!(&data.rgba[..4], &[200, 30, 30, 255]);
    }

    #[test]
    fn garbage_is_an_image_error() {
        let url = Url::parse("https://img.example/x.png").unwrap();
        let err = ImageData::decode(&url, b"definitely not an image").unwrap_err();
        assert!(matches!(err, ApiError::Image { .. }), "{err:?}");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn buffer_length_of_huge_image_does_not_wrap() {
        assert_eq!(rgba_len(70_000, 70_000), 19_600_000_000);
        assert_eq!(rgba_len(3, 2), 24);
    }
}
