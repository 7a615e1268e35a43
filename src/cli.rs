use std::path::PathBuf;

use clap::Parser;

use crate::color::Color;
use crate::pipeline::cluster::Seeding;
use crate::pipeline::extract::{ExtractOptions, DEFAULT_CLUSTERS};

/// Extract a color palette and theme roles from promo reference images.
#[derive(Parser, Debug)]
#[command(name = "promo-palette", version, about)]
pub struct Args {
    /// Image paths or http(s) URLs; only the first 6 are sampled
    #[arg(required_unless_present = "assign")]
    pub sources: Vec<String>,

    /// Skip extraction and assign roles to these hex colors (comma separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "sources")]
    pub assign: Option<Vec<Color>>,

    /// Number of K-means clusters
    #[arg(short = 'k', long = "colors", default_value_t = DEFAULT_CLUSTERS, env = "PROMO_PALETTE_K")]
    pub colors: usize,

    /// Seed the centroid draw for reproducible output
    #[arg(long, env = "PROMO_PALETTE_SEED", conflicts_with = "spread")]
    pub seed: Option<u64>,

    /// Seed centroids from evenly spaced order statistics instead of a random draw
    #[arg(long)]
    pub spread: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a colored terminal preview of the palette to stderr
    #[arg(long)]
    pub preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Css,
}

impl Args {
    pub fn seeding(&self) -> Seeding {
        match (self.seed, self.spread) {
            (Some(seed), _) => Seeding::Seeded(seed),
            (None, true) => Seeding::Spread,
            (None, false) => Seeding::Random,
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            clusters: self.colors,
            seeding: self.seeding(),
            ..ExtractOptions::default()
        }
    }
}
