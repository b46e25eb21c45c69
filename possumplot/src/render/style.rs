//! Colours and sizes used by the overlap renderer.

use tiny_skia::{Color, Paint, Shader};

/// An RGBA colour, 8 bits per channel.
pub type Rgba = (u8, u8, u8, u8);

/// Named colours accepted in configuration.
const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", (0, 0, 0, 255)),
    ("white", (255, 255, 255, 255)),
    ("gray", (128, 128, 128, 255)),
    ("grey", (128, 128, 128, 255)),
    ("red", (255, 0, 0, 255)),
    ("green", (0, 128, 0, 255)),
    ("blue", (0, 0, 255, 255)),
    ("orange", (255, 165, 0, 255)),
    ("purple", (128, 0, 128, 255)),
    ("brown", (165, 42, 42, 255)),
    ("yellow", (255, 255, 0, 255)),
    ("cyan", (0, 255, 255, 255)),
    ("magenta", (255, 0, 255, 255)),
    ("olive", (128, 128, 0, 255)),
    ("teal", (0, 128, 128, 255)),
    ("navy", (0, 0, 128, 255)),
];

/// Parse a colour name or `#rrggbb` / `#rrggbbaa` hex string.
pub fn parse_color(value: &str) -> Result<Rgba, String> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| format!("invalid hex colour '{}'", value))
        };
        return match hex.len() {
            6 => Ok((channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Ok((channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("invalid hex colour '{}'", value)),
        };
    }

    let lower = value.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgba)| *rgba)
        .ok_or_else(|| format!("unknown colour '{}'", value))
}

/// Format a colour for display and config files.
pub fn format_color(color: Rgba) -> String {
    if let Some((name, _)) = NAMED_COLORS.iter().find(|(_, rgba)| *rgba == color) {
        return name.to_string();
    }
    if color.3 == 255 {
        format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.0, color.1, color.2, color.3
        )
    }
}

/// Solid anti-aliased paint.
pub(crate) fn solid_paint(color: Rgba) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(Color::from_rgba8(color.0, color.1, color.2, color.3)),
        anti_alias: true,
        ..Default::default()
    }
}

/// Visual settings for an overlap plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Width of the output image in pixels.
    pub width: u32,
    /// Height of the output image in pixels.
    pub height: u32,
    /// Padding around the drawn area as a fraction of the larger extent.
    pub padding: f64,
    /// Colour of the first requested species.
    pub first_color: Rgba,
    /// Colour of the second requested species.
    pub second_color: Rgba,
    /// Land fill.
    pub land_fill: Rgba,
    /// Land outline.
    pub land_edge: Rgba,
    /// Outline width of land polygons.
    pub edge_width: f32,
    /// Width of the intersection hatch lines.
    pub hatch_width: f32,
    /// Distance between hatch lines.
    pub hatch_spacing: f32,
    pub background: Rgba,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            padding: 0.05,
            first_color: (0, 128, 0, 255),
            second_color: (0, 0, 255, 255),
            land_fill: (128, 128, 128, 128),
            land_edge: (0, 0, 0, 255),
            edge_width: 1.0,
            hatch_width: 4.0,
            hatch_spacing: 16.0,
            background: (255, 255, 255, 255),
        }
    }
}
