use std::path::PathBuf;

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use tracing::debug;

use crate::error::{PaletteError, Result};

/// Where the bytes of a reference image come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file.
    Path(PathBuf),
    /// HTTP(S) URL, fetched with the extractor's client.
    Url(String),
    /// Already-fetched encoded image bytes.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Short human-readable label for logs.
    pub fn label(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }

    /// Read or fetch the encoded image bytes.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => Ok(tokio::fs::read(path).await?),
            Self::Url(url) => {
                let wrap = |source| PaletteError::Fetch {
                    url: url.clone(),
                    source,
                };
                let response = client
                    .get(url)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(wrap)?;
                let bytes = response.bytes().await.map_err(wrap)?;
                Ok(bytes.to_vec())
            }
            Self::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Fetch, decode and stretch the image to a `size`×`size` RGB raster.
    ///
    /// Decoding and resampling run on the blocking pool.
    pub async fn load_raster(&self, client: &reqwest::Client, size: u32) -> Result<RgbImage> {
        let bytes = self.fetch(client).await?;
        let raster = tokio::task::spawn_blocking(move || decode_raster(&bytes, size)).await??;
        debug!(source = %self.label(), size, "decoded raster");
        Ok(raster)
    }
}

/// Decode encoded image bytes and resize to exactly `size`×`size`, ignoring aspect ratio.
pub fn decode_raster(bytes: &[u8], size: u32) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(rasterize(&img, size))
}

/// Stretch a decoded image to a `size`×`size` RGB raster.
pub fn rasterize(img: &DynamicImage, size: u32) -> RgbImage {
    img.resize_exact(size, size, FilterType::Triangle).to_rgb8()
}

impl From<&str> for ImageSource {
    /// `http://` and `https://` strings become URLs; anything else is a path.
    fn from(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
