//! Raster canvas with a geographic viewport.
//!
//! Longitude/latitude are mapped linearly to pixels (plate carrée) with the
//! aspect ratio preserved and the drawing centred on the canvas.

use std::fs;
use std::path::Path;

use geo::{LineString, MultiPolygon};
use image::{DynamicImage, RgbaImage};
use tiny_skia::{FillRule, Mask, Path as SkPath, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::error::{RenderError, RenderResult};
use super::style::{solid_paint, Rgba};
use crate::geometry::BoundingBox;

/// Smallest extent in degrees a viewport will cover.
const MIN_EXTENT_DEGREES: f64 = 1e-6;

/// Maps geographic coordinates to pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: BoundingBox,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Fit `bounds` inside a `width` x `height` canvas.
    ///
    /// `padding` grows the box by that fraction of its larger side before
    /// fitting.
    pub fn fit(bounds: &BoundingBox, width: u32, height: u32, padding: f64) -> Self {
        let padded = bounds.padded(padding);
        let extent_x = padded.width().max(MIN_EXTENT_DEGREES);
        let extent_y = padded.height().max(MIN_EXTENT_DEGREES);

        let scale = (width as f64 / extent_x).min(height as f64 / extent_y);
        let offset_x = (width as f64 - extent_x * scale) / 2.0;
        let offset_y = (height as f64 - extent_y * scale) / 2.0;

        Self {
            bounds: padded,
            scale,
            offset_x,
            offset_y,
        }
    }

    /// The padded geographic box covered by the viewport.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Pixels per degree.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a lon/lat pair into pixel coordinates (y grows downward).
    pub fn to_px(&self, lon: f64, lat: f64) -> (f32, f32) {
        let x = self.offset_x + (lon - self.bounds.min_lon) * self.scale;
        let y = self.offset_y + (self.bounds.max_lat - lat) * self.scale;
        (x as f32, y as f32)
    }
}

/// Build a tiny-skia path from every ring of a multi-polygon.
///
/// Holes are regular rings; fill with [`FillRule::EvenOdd`].
pub fn polygon_path(geometry: &MultiPolygon<f64>, viewport: &Viewport) -> Option<SkPath> {
    let mut builder = PathBuilder::new();
    for polygon in &geometry.0 {
        add_ring(&mut builder, polygon.exterior(), viewport);
        for hole in polygon.interiors() {
            add_ring(&mut builder, hole, viewport);
        }
    }
    builder.finish()
}

fn add_ring(builder: &mut PathBuilder, ring: &LineString<f64>, viewport: &Viewport) {
    let mut coords = ring.coords();
    let Some(first) = coords.next() else {
        return;
    };
    let (x, y) = viewport.to_px(first.x, first.y);
    builder.move_to(x, y);
    for coord in coords {
        let (x, y) = viewport.to_px(coord.x, coord.y);
        builder.line_to(x, y);
    }
    builder.close();
}

/// A pixmap plus the viewport used to draw into it.
pub struct Canvas {
    pixmap: Pixmap,
    viewport: Viewport,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    pub fn new(width: u32, height: u32, viewport: Viewport, background: Rgba) -> RenderResult<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidCanvas { width, height })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.0,
            background.1,
            background.2,
            background.3,
        ));
        Ok(Self { pixmap, viewport })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fill polygons and optionally outline them.
    pub fn fill_polygons(&mut self, geometry: &MultiPolygon<f64>, fill: Rgba, edge: Option<(Rgba, f32)>) {
        let Some(path) = polygon_path(geometry, &self.viewport) else {
            return;
        };

        self.pixmap.fill_path(
            &path,
            &solid_paint(fill),
            FillRule::EvenOdd,
            Transform::identity(),
            None,
        );

        if let Some((color, width)) = edge {
            if width > 0.0 {
                self.pixmap.stroke_path(
                    &path,
                    &solid_paint(color),
                    &Stroke {
                        width,
                        ..Default::default()
                    },
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    /// Draw `//` diagonal lines clipped to the polygons.
    pub fn hatch_polygons(&mut self, geometry: &MultiPolygon<f64>, color: Rgba, width: f32, spacing: f32) {
        let Some(area) = polygon_path(geometry, &self.viewport) else {
            return;
        };
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            return;
        };
        mask.fill_path(&area, FillRule::EvenOdd, true, Transform::identity());

        let Some(lines) = hatch_lines(self.pixmap.width(), self.pixmap.height(), spacing) else {
            return;
        };
        self.pixmap.stroke_path(
            &lines,
            &solid_paint(color),
            &Stroke {
                width,
                ..Default::default()
            },
            Transform::identity(),
            Some(&mask),
        );
    }

    /// Fill an axis-aligned pixel rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            self.pixmap
                .fill_rect(rect, &solid_paint(color), Transform::identity(), None);
        }
    }

    /// Outline an axis-aligned pixel rectangle.
    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba, line: f32) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &Stroke {
                width: line,
                ..Default::default()
            },
            Transform::identity(),
            None,
        );
    }

    /// Fill a circle centred on a pixel position.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.pixmap.fill_path(
                &path,
                &solid_paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Colour of a pixel with alpha removed from the premultiplication.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            (c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Write the canvas to an image file. The format follows the extension.
    pub fn save(&self, path: &Path) -> RenderResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }

        // Flatten to RGB so JPEG and other alpha-less formats work too
        DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .save(path)
            .map_err(|source| RenderError::Save {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Parallel lines rising left to right, covering the whole canvas.
fn hatch_lines(width: u32, height: u32, spacing: f32) -> Option<SkPath> {
    let (w, h) = (width as f32, height as f32);
    let spacing = spacing.max(1.0);
    let mut builder = PathBuilder::new();
    let mut start = -h;
    while start <= w {
        builder.move_to(start, h);
        builder.line_to(start + h, 0.0);
        start += spacing;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;

    const WHITE: Rgba = (255, 255, 255, 255);
    const RED: Rgba = (255, 0, 0, 255);

    #[test]
    fn test_viewport_preserves_aspect_and_centres() {
        // 20 x 10 degrees into a square canvas: scale 5 px/deg, 25 px margin
        let bounds = BoundingBox::new(0.0, 0.0, 20.0, 10.0);
        let vp = Viewport::fit(&bounds, 100, 100, 0.0);

        assert!((vp.scale() - 5.0).abs() < 1e-9);
        assert_eq!(vp.to_px(0.0, 10.0), (0.0, 25.0));
        assert_eq!(vp.to_px(20.0, 0.0), (100.0, 75.0));
    }

    #[test]
    fn test_viewport_of_degenerate_box() {
        let bounds = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
        let vp = Viewport::fit(&bounds, 10, 10, 0.0);
        assert!(vp.scale().is_finite());
    }

    #[test]
    fn test_fill_polygons_paints_inside_only() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let vp = Viewport::fit(&bounds, 100, 100, 0.0);
        let mut canvas = Canvas::new(100, 100, vp, WHITE).unwrap();

        canvas.fill_polygons(&square(0.0, 0.0, 5.0), RED, None);

        // Lower-left quadrant in geographic terms is the bottom-left in pixels
        assert_eq!(canvas.pixel(20, 80), Some(RED));
        assert_eq!(canvas.pixel(80, 20), Some(WHITE));
    }

    #[test]
    fn test_hatch_stays_inside_polygon() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let vp = Viewport::fit(&bounds, 100, 100, 0.0);
        let mut canvas = Canvas::new(100, 100, vp, WHITE).unwrap();

        canvas.hatch_polygons(&square(0.0, 0.0, 5.0), RED, 4.0, 8.0);

        // Nothing outside the left-bottom quadrant is touched
        for y in 0..45 {
            for x in 0..100 {
                assert_eq!(canvas.pixel(x, y), Some(WHITE), "pixel {},{}", x, y);
            }
        }
        let painted = (55..100)
            .flat_map(|y| (0..45).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != Some(WHITE))
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn test_invalid_canvas_size() {
        let vp = Viewport::fit(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0, 0, 0.0);
        assert!(matches!(
            Canvas::new(0, 0, vp, WHITE),
            Err(RenderError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Figs").join("canvas.png");
        let vp = Viewport::fit(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), 8, 8, 0.0);
        let canvas = Canvas::new(8, 8, vp, WHITE).unwrap();

        canvas.save(&path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
    }
}
