use serde::{Deserialize, Serialize};

use crate::color::{hue_distance, Color};

/// Lightness band (exclusive) a color must fall in to be considered for primary.
const MIDTONE_MIN: f32 = 0.25;
const MIDTONE_MAX: f32 = 0.75;

pub const FALLBACK_PRIMARY: Color = Color::new(0x54, 0x68, 0xff);
pub const FALLBACK_ACCENT: Color = Color::new(0xff, 0x4d, 0x6d);
pub const FALLBACK_NEUTRAL: Color = Color::new(0x11, 0x18, 0x27);

/// Semantic roles picked from a palette for theming and document accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRoles {
    pub primary: Color,
    pub accent: Color,
    pub neutral: Color,
}

impl ColorRoles {
    /// Roles used when there is no palette to derive them from.
    pub const FALLBACK: ColorRoles = ColorRoles {
        primary: FALLBACK_PRIMARY,
        accent: FALLBACK_ACCENT,
        neutral: FALLBACK_NEUTRAL,
    };
}

/// Classify a palette into primary, accent and neutral.
///
/// Every role is a member of `palette` unless it is empty, in which case
/// [`ColorRoles::FALLBACK`] is returned. One color may fill several roles.
pub fn assign_roles(palette: &[Color]) -> ColorRoles {
    if palette.is_empty() {
        return ColorRoles::FALLBACK;
    }

    let hsl: Vec<_> = palette.iter().map(|c| c.to_hsl()).collect();

    // Primary: most saturated midtone, nearest to l = 0.5 on ties.
    let mut primary: Option<usize> = None;
    for (i, c) in hsl.iter().enumerate() {
        if c.lightness <= MIDTONE_MIN || c.lightness >= MIDTONE_MAX {
            continue;
        }
        let better = match primary {
            None => true,
            Some(p) => {
                let best = &hsl[p];
                c.saturation > best.saturation
                    || (c.saturation == best.saturation
                        && (c.lightness - 0.5).abs() < (best.lightness - 0.5).abs())
            }
        };
        if better {
            primary = Some(i);
        }
    }
    let primary = primary.unwrap_or(0);
    let primary_hue = hsl[primary].hue;

    // Accent: hue farthest from primary around the color wheel.
    let accent = if palette.len() < 2 {
        primary
    } else {
        let mut best = 0;
        let mut best_d = hue_distance(hsl[0].hue, primary_hue);
        for (i, c) in hsl.iter().enumerate().skip(1) {
            let d = hue_distance(c.hue, primary_hue);
            if d > best_d {
                best = i;
                best_d = d;
            }
        }
        best
    };

    // Neutral: darkest.
    let mut neutral = 0;
    for (i, c) in hsl.iter().enumerate().skip(1) {
        if c.lightness < hsl[neutral].lightness {
            neutral = i;
        }
    }

    ColorRoles {
        primary: palette[primary],
        accent: palette[accent],
        neutral: palette[neutral],
    }
}
