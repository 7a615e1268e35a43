use futures::future::join_all;
use image::{DynamicImage, RgbImage};
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::pipeline::cluster::{kmeans, Seeding, DEFAULT_ITERATIONS};
use crate::pipeline::source::{rasterize, ImageSource};

pub const DEFAULT_CLUSTERS: usize = 5;
pub const MAX_IMAGES: usize = 6;
pub const RASTER_SIZE: u32 = 80;

/// Tunables for palette extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Number of colors in the returned palette.
    pub clusters: usize,
    /// Sources beyond this many are ignored.
    pub max_images: usize,
    /// Each image is stretched to a `raster_size` square before sampling.
    pub raster_size: u32,
    /// Number of k-means rounds; fixed, not run to convergence.
    pub iterations: usize,
    pub seeding: Seeding,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            max_images: MAX_IMAGES,
            raster_size: RASTER_SIZE,
            iterations: DEFAULT_ITERATIONS,
            seeding: Seeding::Random,
        }
    }
}

impl ExtractOptions {
    pub fn with_clusters(clusters: usize) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.clusters == 0 {
            return Err(PaletteError::InvalidClusterCount(self.clusters));
        }
        if self.raster_size == 0 {
            return Err(PaletteError::InvalidConfig(
                "raster size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Extract a palette summarizing all `sources` combined.
///
/// Only the first `max_images` sources are loaded, concurrently; sources that
/// fail to load are logged and skipped. An empty source list gives an empty
/// palette, and a list where nothing loads gives `clusters` neutral grays.
pub async fn extract_palette(sources: &[ImageSource], opts: &ExtractOptions) -> Result<Vec<Color>> {
    extract_palette_with_client(&reqwest::Client::new(), sources, opts).await
}

/// Same as [`extract_palette`], reusing the caller's HTTP client for URL sources.
pub async fn extract_palette_with_client(
    client: &reqwest::Client,
    sources: &[ImageSource],
    opts: &ExtractOptions,
) -> Result<Vec<Color>> {
    opts.validate()?;
    if sources.is_empty() {
        return Ok(Vec::new());
    }

    let selected = &sources[..sources.len().min(opts.max_images)];
    if selected.len() < sources.len() {
        debug!(
            ignored = sources.len() - selected.len(),
            "source list exceeds image cap"
        );
    }

    let loads = selected
        .iter()
        .map(|source| source.load_raster(client, opts.raster_size));
    let results = join_all(loads).await;

    let mut pixels = Vec::new();
    for (source, result) in selected.iter().zip(results) {
        match result {
            Ok(raster) => pixels.extend(sample_pixels(&raster)),
            Err(e) => warn!(source = %source.label(), error = %e, "skipping image source"),
        }
    }

    kmeans(&pixels, opts.clusters, opts.iterations, opts.seeding)
}

/// Synchronous variant for images the caller has already decoded.
pub fn extract_from_images(images: &[DynamicImage], opts: &ExtractOptions) -> Result<Vec<Color>> {
    opts.validate()?;
    if images.is_empty() {
        return Ok(Vec::new());
    }

    let pixels: Vec<Color> = images
        .iter()
        .take(opts.max_images)
        .flat_map(|img| sample_pixels(&rasterize(img, opts.raster_size)))
        .collect();

    kmeans(&pixels, opts.clusters, opts.iterations, opts.seeding)
}

/// Every pixel of the raster as a sample, row-major.
pub fn sample_pixels(raster: &RgbImage) -> Vec<Color> {
    raster
        .pixels()
        .map(|p| Color::new(p[0], p[1], p[2]))
        .collect()
}
