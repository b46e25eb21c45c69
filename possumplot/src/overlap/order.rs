//! Area-based stacking of two ranges.
//!
//! The larger range is drawn underneath. The shared area takes the hatch and
//! edge colour of the smaller range so the larger one shows through.

use std::cmp::Ordering;

use crate::geometry::Projection;
use crate::store::Region;

/// Position of a range in the requested pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Stacking decision for a pair of ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOrder {
    /// The larger range, drawn underneath.
    pub background: Side,
    /// The smaller range, owner of the intersection hatch.
    pub foreground: Side,
    /// Projected area of the first range.
    pub first_area: f64,
    /// Projected area of the second range.
    pub second_area: f64,
}

impl DrawOrder {
    /// Compare the projected areas of the untrimmed ranges.
    ///
    /// Equal areas fall back to name order (the smaller name is the
    /// foreground) so swapping the inputs selects the same range.
    pub fn decide(first: &Region, second: &Region, projection: Projection) -> Self {
        let first_area = first.area(projection);
        let second_area = second.area(projection);

        let first_is_larger = match first_area.total_cmp(&second_area) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => first.name() > second.name(),
        };

        let background = if first_is_larger {
            Side::First
        } else {
            Side::Second
        };

        Self {
            background,
            foreground: background.other(),
            first_area,
            second_area,
        }
    }

    /// Range owning the intersection hatch.
    pub fn foreground_region<'a>(&self, first: &'a Region, second: &'a Region) -> &'a Region {
        match self.foreground {
            Side::First => first,
            Side::Second => second,
        }
    }

    /// Range drawn underneath.
    pub fn background_region<'a>(&self, first: &'a Region, second: &'a Region) -> &'a Region {
        match self.background {
            Side::First => first,
            Side::Second => second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;

    fn region(name: &str, lon: f64, lat: f64, size: f64) -> Region {
        Region::new(name, "Didelphis", square(lon, lat, size))
    }

    #[test]
    fn test_larger_region_is_background() {
        let big = region("Didelphis marsupialis", -90.0, -10.0, 30.0);
        let small = region("Didelphis virginiana", -100.0, 15.0, 10.0);

        let order = DrawOrder::decide(&big, &small, Projection::EqualArea);
        assert_eq!(order.background, Side::First);
        assert_eq!(order.foreground, Side::Second);
        assert!(order.first_area > order.second_area);
        assert_eq!(order.foreground_region(&big, &small).name(), "Didelphis virginiana");
        assert_eq!(order.background_region(&big, &small).name(), "Didelphis marsupialis");
    }

    #[test]
    fn test_swapped_inputs_select_same_foreground() {
        let a = region("Didelphis marsupialis", -90.0, -10.0, 30.0);
        let b = region("Didelphis virginiana", -100.0, 15.0, 10.0);

        let ab = DrawOrder::decide(&a, &b, Projection::EqualArea);
        let ba = DrawOrder::decide(&b, &a, Projection::EqualArea);
        assert_eq!(
            ab.foreground_region(&a, &b).name(),
            ba.foreground_region(&b, &a).name()
        );
    }

    #[test]
    fn test_equal_areas_break_ties_by_name() {
        // Identical polygons so the areas compare exactly equal
        let a = region("Didelphis aurita", -60.0, -20.0, 5.0);
        let b = region("Didelphis albiventris", -60.0, -20.0, 5.0);

        let ab = DrawOrder::decide(&a, &b, Projection::EqualArea);
        let ba = DrawOrder::decide(&b, &a, Projection::EqualArea);
        assert_eq!(ab.foreground_region(&a, &b).name(), "Didelphis albiventris");
        assert_eq!(ba.foreground_region(&b, &a).name(), "Didelphis albiventris");
    }

    #[test]
    fn test_projection_can_flip_the_decision() {
        // Equatorial block versus a smaller high-latitude block:
        // Mercator inflates the northern one past the equatorial one.
        let band = region("Didelphis marsupialis", -80.0, 0.0, 10.0);
        let north = region("Didelphis virginiana", -80.0, 60.0, 8.0);

        let equal = DrawOrder::decide(&band, &north, Projection::EqualArea);
        let merc = DrawOrder::decide(&band, &north, Projection::WebMercator);
        assert_eq!(equal.background, Side::First);
        assert_eq!(merc.background, Side::Second);
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::First.other(), Side::Second);
        assert_eq!(Side::Second.other(), Side::First);
    }
}
