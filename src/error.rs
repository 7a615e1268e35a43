use thiserror::Error;

/// Errors raised by the palette pipeline.
///
/// Per-source load failures are logged and skipped by the extractor; only
/// invalid parameters reach the caller from [`crate::pipeline::extract`].
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Cluster count must be at least one
    #[error("invalid cluster count: {0} (must be at least 1)")]
    InvalidClusterCount(usize),

    /// Option combination that cannot produce a palette
    #[error("invalid extract options: {0}")]
    InvalidConfig(String),

    /// HTTP fetch of an image source failed
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Image bytes could not be decoded
    #[error("unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),

    /// Blocking decode task panicked or was cancelled
    #[error("decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Local file I/O errors
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Hex color string could not be parsed
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
