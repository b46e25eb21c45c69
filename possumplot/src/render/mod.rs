//! Overlap plot renderer.
//!
//! Draws, bottom to top:
//!
//! 1. land polygons (semi-transparent gray, black outline)
//! 2. the larger range's exclusive layer
//! 3. the smaller range's exclusive layer
//! 4. the intersection, filled with the larger range's colour
//! 5. `//` hatching of the intersection in the smaller range's colour
//! 6. the legend in the top-right corner

mod canvas;
mod error;
mod legend;
mod style;

pub use canvas::{polygon_path, Canvas, Viewport};
pub use error::{RenderError, RenderResult};
pub use legend::{draw_legend, draw_text, text_width, LegendEntry};
pub use style::{format_color, parse_color, PlotStyle, Rgba};

use tracing::debug;

use crate::geometry::{BoundingBox, AMERICAS_BOUNDS};
use crate::land::LandLayer;
use crate::overlap::{Overlap, Side};

impl PlotStyle {
    /// Colour assigned to a side of the requested pair.
    pub fn color_for(&self, side: Side) -> Rgba {
        match side {
            Side::First => self.first_color,
            Side::Second => self.second_color,
        }
    }
}

/// Bounding box of everything that will be drawn.
///
/// Falls back to the Americas view when there is nothing to draw.
pub fn scene_bounds(overlap: &Overlap, land: &LandLayer) -> BoundingBox {
    land.polygons()
        .iter()
        .chain([overlap.first.geometry(), overlap.second.geometry()])
        .filter_map(BoundingBox::of)
        .reduce(|a, b| a.union(&b))
        .unwrap_or(AMERICAS_BOUNDS)
}

/// Render an overlap plot onto a new canvas.
pub fn render_overlap(overlap: &Overlap, land: &LandLayer, style: &PlotStyle) -> RenderResult<Canvas> {
    let bounds = scene_bounds(overlap, land);
    let viewport = Viewport::fit(&bounds, style.width, style.height, style.padding);
    let mut canvas = Canvas::new(style.width, style.height, viewport, style.background)?;

    debug!(
        min_lon = bounds.min_lon,
        max_lon = bounds.max_lon,
        min_lat = bounds.min_lat,
        max_lat = bounds.max_lat,
        land_features = land.polygons().len(),
        "Rendering overlap plot"
    );

    for polygons in land.polygons() {
        canvas.fill_polygons(
            polygons,
            style.land_fill,
            Some((style.land_edge, style.edge_width)),
        );
    }

    let background = overlap.order.background;
    let foreground = overlap.order.foreground;
    let background_color = style.color_for(background);
    let foreground_color = style.color_for(foreground);

    canvas.fill_polygons(overlap.exclusive_layer(background), background_color, None);
    canvas.fill_polygons(overlap.exclusive_layer(foreground), foreground_color, None);

    if overlap.layers.overlaps() {
        canvas.fill_polygons(&overlap.layers.shared, background_color, None);
        canvas.hatch_polygons(
            &overlap.layers.shared,
            foreground_color,
            style.hatch_width,
            style.hatch_spacing,
        );
    }

    draw_legend(
        &mut canvas,
        &[
            LegendEntry::new(overlap.first.name(), style.first_color),
            LegendEntry::new(overlap.second.name(), style.second_color),
        ],
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;
    use crate::overlap::ResolveOptions;
    use crate::store::Region;

    fn overlap() -> Overlap {
        // Large range at lon -100..-70, small one at -75..-65 straddling its edge
        let big = Region::new("Didelphis marsupialis", "Didelphis", square(-100.0, 0.0, 30.0));
        let small = Region::new("Didelphis virginiana", "Didelphis", square(-75.0, 10.0, 10.0));
        Overlap::resolve(small, big, ResolveOptions::default())
    }

    #[test]
    fn test_scene_bounds_covers_both_ranges() {
        let bounds = scene_bounds(&overlap(), &LandLayer::empty());
        assert_eq!(bounds, BoundingBox::new(-100.0, 0.0, -65.0, 30.0));
    }

    #[test]
    fn test_scene_bounds_falls_back_when_empty() {
        let empty = geo::MultiPolygon::new(Vec::new());
        let o = Overlap::resolve(
            Region::new("a b", "a", empty.clone()),
            Region::new("c d", "c", empty),
            ResolveOptions::default(),
        );
        assert_eq!(scene_bounds(&o, &LandLayer::empty()), AMERICAS_BOUNDS);
    }

    #[test]
    fn test_color_for_side() {
        let style = PlotStyle::default();
        assert_eq!(style.color_for(Side::First), style.first_color);
        assert_eq!(style.color_for(Side::Second), style.second_color);
    }

    #[test]
    fn test_render_uses_both_colours() {
        let style = PlotStyle {
            width: 400,
            height: 400,
            ..PlotStyle::default()
        };
        let canvas = render_overlap(&overlap(), &LandLayer::empty(), &style).unwrap();

        let mut greenish = 0;
        let mut blueish = 0;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if let Some((r, g, b, _)) = canvas.pixel(x, y) {
                    if g > 100 && r < 50 && b < 50 {
                        greenish += 1;
                    }
                    if b > 200 && r < 50 && g < 50 {
                        blueish += 1;
                    }
                }
            }
        }
        assert!(greenish > 0, "first range colour missing");
        assert!(blueish > 0, "second range colour missing");
    }

    /// Count exact colour matches in a lon/lat box.
    fn count_in(canvas: &Canvas, lon: (f64, f64), lat: (f64, f64), color: Rgba) -> usize {
        let (x0, y0) = canvas.viewport().to_px(lon.0, lat.1);
        let (x1, y1) = canvas.viewport().to_px(lon.1, lat.0);
        let mut count = 0;
        for y in y0.ceil() as u32..y1.floor() as u32 {
            for x in x0.ceil() as u32..x1.floor() as u32 {
                if canvas.pixel(x, y) == Some(color) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_shared_area_is_hatched_over_background_colour() {
        let style = PlotStyle {
            width: 400,
            height: 400,
            ..PlotStyle::default()
        };
        let o = overlap();
        // The small first range is the foreground
        assert_eq!(o.order.foreground, Side::First);
        let canvas = render_overlap(&o, &LandLayer::empty(), &style).unwrap();

        let green = style.first_color;
        let blue = style.second_color;

        // Shared area is lon -75..-70, lat 10..20; sample inside its edges
        let shared = ((-74.5, -70.5), (10.5, 19.5));
        let hatch = count_in(&canvas, shared.0, shared.1, green);
        let fill = count_in(&canvas, shared.0, shared.1, blue);
        assert!(hatch > 0, "no foreground hatch in shared area");
        assert!(fill > hatch, "shared area not filled with background colour");

        // Exclusive parts carry only their own colour
        assert_eq!(count_in(&canvas, (-69.5, -65.5), (10.5, 19.5), blue), 0);
        assert!(count_in(&canvas, (-69.5, -65.5), (10.5, 19.5), green) > 0);
        assert_eq!(count_in(&canvas, (-99.5, -80.5), (0.5, 9.5), green), 0);
        assert!(count_in(&canvas, (-99.5, -80.5), (0.5, 9.5), blue) > 0);
    }
}
