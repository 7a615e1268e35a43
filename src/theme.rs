use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::Color;
use crate::pipeline::assign::{assign_roles, ColorRoles};

/// A palette together with the roles derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoTheme {
    pub palette: Vec<Color>,
    pub roles: ColorRoles,
}

impl PromoTheme {
    /// Derive roles from an extracted palette.
    pub fn from_palette(palette: Vec<Color>) -> Self {
        let roles = assign_roles(&palette);
        Self { palette, roles }
    }

    /// Plain listing: one palette color per line, then the three roles.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, color) in self.palette.iter().enumerate() {
            out.push_str(&format!("palette {i} = {color}\n"));
        }
        out.push_str(&format!("primary = {}\n", self.roles.primary));
        out.push_str(&format!("accent = {}\n", self.roles.accent));
        out.push_str(&format!("neutral = {}\n", self.roles.neutral));
        out
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize theme as JSON")
    }

    /// CSS custom properties for a page root, as the web front end consumes them.
    pub fn to_css(&self) -> String {
        let mut out = String::from(":root {\n");
        out.push_str(&format!("  --brand: {};\n", self.roles.primary));
        out.push_str(&format!("  --accent: {};\n", self.roles.accent));
        out.push_str(&format!("  --neutral: {};\n", self.roles.neutral));
        for (i, color) in self.palette.iter().enumerate() {
            out.push_str(&format!("  --palette-{i}: {color};\n"));
        }
        out.push_str("}\n");
        out
    }

    /// Write rendered output to an arbitrary path.
    pub fn write_to(content: &str, path: &Path) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write theme to {}", path.display()))
    }
}
