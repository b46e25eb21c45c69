//! Plot legend: a coloured marker and a label per species.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use super::canvas::Canvas;
use super::style::Rgba;

/// Glyph cell size of the bitmap font.
const GLYPH_SIZE: u32 = 8;

/// Pixels per font pixel.
const TEXT_SCALE: u32 = 2;

const MARGIN: f32 = 12.0;
const ROW_GAP: f32 = 8.0;
const MARKER_RADIUS: f32 = 7.0;

const FRAME_FILL: Rgba = (255, 255, 255, 220);
const FRAME_EDGE: Rgba = (80, 80, 80, 255);
const TEXT_COLOR: Rgba = (0, 0, 0, 255);

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: Rgba) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Width in pixels of `text` at the legend scale.
pub fn text_width(text: &str) -> f32 {
    (text.chars().count() as u32 * GLYPH_SIZE * TEXT_SCALE) as f32
}

/// Draw text with its top-left corner at `(x, y)`.
///
/// Characters missing from the font are left blank.
pub fn draw_text(canvas: &mut Canvas, text: &str, x: f32, y: f32, color: Rgba) {
    let cell = (GLYPH_SIZE * TEXT_SCALE) as f32;
    let dot = TEXT_SCALE as f32;

    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let origin_x = x + i as f32 * cell;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // Least significant bit is the leftmost pixel
                if bits & (1 << col) != 0 {
                    canvas.fill_rect(
                        origin_x + col as f32 * dot,
                        y + row as f32 * dot,
                        dot,
                        dot,
                        color,
                    );
                }
            }
        }
    }
}

/// Draw the legend box in the top-right corner.
pub fn draw_legend(canvas: &mut Canvas, entries: &[LegendEntry]) {
    if entries.is_empty() {
        return;
    }

    let row_height = (GLYPH_SIZE * TEXT_SCALE) as f32 + ROW_GAP;
    let label_width = entries
        .iter()
        .map(|e| text_width(&e.label))
        .fold(0.0_f32, f32::max);
    let box_width = MARGIN * 3.0 + MARKER_RADIUS * 2.0 + label_width;
    let box_height = MARGIN * 2.0 + row_height * entries.len() as f32 - ROW_GAP;

    let x = canvas.width() as f32 - box_width - MARGIN;
    let y = MARGIN;

    canvas.fill_rect(x, y, box_width, box_height, FRAME_FILL);
    canvas.stroke_rect(x, y, box_width, box_height, FRAME_EDGE, 1.0);

    for (i, entry) in entries.iter().enumerate() {
        let row_top = y + MARGIN + i as f32 * row_height;
        let text_height = (GLYPH_SIZE * TEXT_SCALE) as f32;
        canvas.fill_circle(
            x + MARGIN + MARKER_RADIUS,
            row_top + text_height / 2.0,
            MARKER_RADIUS,
            entry.color,
        );
        draw_text(
            canvas,
            &entry.label,
            x + MARGIN * 2.0 + MARKER_RADIUS * 2.0,
            row_top,
            TEXT_COLOR,
        );
    }
}
