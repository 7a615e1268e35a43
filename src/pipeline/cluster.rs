use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::color::Color;
use crate::error::{PaletteError, Result};

/// Number of assign/update rounds. Fixed, not run to convergence.
pub const DEFAULT_ITERATIONS: usize = 8;

/// Centroid value used for every slot when there are no pixels to cluster.
pub const NEUTRAL_GRAY: Color = Color::new(200, 200, 200);

/// How the initial centroids are chosen from the pixel pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seeding {
    /// Draw k pixels uniformly at random, with replacement. Results vary between runs.
    #[default]
    Random,
    /// Same draw as `Random`, from an RNG seeded with the given value.
    Seeded(u64),
    /// Evenly spaced order statistics of the pool sorted by packed RGB value.
    Spread,
}

/// Run k-means in RGB space over `pixels` and return the `k` centroids in index order.
///
/// Each round assigns every pixel to its nearest centroid by squared Euclidean
/// distance (ties go to the lower index), then moves each centroid to the
/// rounded per-channel mean of its members. A centroid that wins no pixels
/// keeps its previous value, so the output always has exactly `k` entries.
pub fn kmeans(pixels: &[Color], k: usize, iterations: usize, seeding: Seeding) -> Result<Vec<Color>> {
    if k == 0 {
        return Err(PaletteError::InvalidClusterCount(k));
    }
    if pixels.is_empty() {
        debug!(k, "empty pixel pool, using neutral gray");
        return Ok(vec![NEUTRAL_GRAY; k]);
    }

    let mut centroids = seed_centroids(pixels, k, seeding);
    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u64; k];

    for _ in 0..iterations {
        sums.iter_mut().for_each(|s| *s = [0; 3]);
        counts.iter_mut().for_each(|c| *c = 0);

        for &p in pixels {
            let idx = nearest(&centroids, p);
            let sum = &mut sums[idx];
            sum[0] += p.r as u64;
            sum[1] += p.g as u64;
            sum[2] += p.b as u64;
            counts[idx] += 1;
        }

        for (centroid, (sum, &count)) in centroids.iter_mut().zip(sums.iter().zip(&counts)) {
            if count == 0 {
                continue;
            }
            *centroid = Color::new(
                rounded_mean(sum[0], count),
                rounded_mean(sum[1], count),
                rounded_mean(sum[2], count),
            );
        }
    }

    debug!(pixels = pixels.len(), ?counts, "k-means finished");
    Ok(centroids)
}

/// Index of the centroid closest to `p`. The first centroid wins on ties.
fn nearest(centroids: &[Color], p: Color) -> usize {
    let mut best = 0;
    let mut best_d = u32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = c.distance_sq(p);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Mean rounded half up, matching `round(sum / count)` for non-negative values.
fn rounded_mean(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)).min(255) as u8
}

fn seed_centroids(pixels: &[Color], k: usize, seeding: Seeding) -> Vec<Color> {
    match seeding {
        Seeding::Random => draw(pixels, k, &mut rand::thread_rng()),
        Seeding::Seeded(seed) => draw(pixels, k, &mut StdRng::seed_from_u64(seed)),
        Seeding::Spread => {
            let mut sorted = pixels.to_vec();
            sorted.sort_unstable_by_key(|c| u32::from_be_bytes([0, c.r, c.g, c.b]));
            let n = sorted.len();
            (0..k).map(|i| sorted[((2 * i + 1) * n) / (2 * k)]).collect()
        }
    }
}

fn draw<R: Rng>(pixels: &[Color], k: usize, rng: &mut R) -> Vec<Color> {
    (0..k).map(|_| pixels[rng.gen_range(0..pixels.len())]).collect()
}
