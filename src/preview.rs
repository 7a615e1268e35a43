use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::color::Color;
use crate::theme::PromoTheme;

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: Color) -> TermColor {
    if c.relative_luminance() > 0.4 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

fn swatch<W: Write>(out: &mut W, color: Color, label: &str) -> std::io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(to_term(color)),
        SetForegroundColor(contrast_fg(color)),
        Print(format!(" {label:^9} ")),
        ResetColor,
        Print(" "),
    )
}

/// Print the palette as a row of colored swatches labeled with their hex
/// values, followed by a row for the three roles.
pub fn print_swatches<W: Write>(out: &mut W, theme: &PromoTheme) -> std::io::Result<()> {
    for &color in &theme.palette {
        swatch(out, color, &color.to_hex())?;
    }
    queue!(out, Print("\n"))?;

    let roles = &theme.roles;
    swatch(out, roles.primary, "primary")?;
    swatch(out, roles.accent, "accent")?;
    swatch(out, roles.neutral, "neutral")?;
    queue!(out, Print("\n"))?;
    out.flush()
}
