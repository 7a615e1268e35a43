pub mod cli;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod theme;

pub use color::{hue_distance, Color};
pub use error::{PaletteError, Result};
pub use pipeline::assign::{assign_roles, ColorRoles};
pub use pipeline::extract::{extract_palette, ExtractOptions};
pub use pipeline::source::ImageSource;
