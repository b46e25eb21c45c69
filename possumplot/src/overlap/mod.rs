//! Range overlap resolver.
//!
//! Given exactly two species ranges `A` and `B`, computes three layers and
//! the order they are stacked in:
//!
//! ```text
//!   A − B        drawn in A's colour
//!   B − A        drawn in B's colour
//!   A ∩ B        filled with the larger range's colour,
//!                hatched with the smaller range's colour
//! ```
//!
//! The decision of which range is "larger" compares projected areas of the
//! untrimmed ranges (see [`DrawOrder`]).

mod layers;
mod order;

pub use layers::{OverlapLayers, SubtractionBasis};
pub use order::{DrawOrder, Side};

use thiserror::Error;
use tracing::debug;

use crate::geometry::Projection;
use crate::store::Region;

/// Number of ranges the resolver works on.
pub const SUPPORTED_REGIONS: usize = 2;

/// Errors from validating a resolver request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlapError {
    /// Only pairs of ranges are supported.
    #[error("overlap plots need exactly 2 species, got {0}")]
    UnsupportedCardinality(usize),
}

/// Check that exactly two names were requested and return them as a pair.
pub fn require_pair<T>(items: &[T]) -> Result<(&T, &T), OverlapError> {
    match items {
        [first, second] => Ok((first, second)),
        _ => Err(OverlapError::UnsupportedCardinality(items.len())),
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Projection used for the area comparison.
    pub projection: Projection,
    /// Geometry the second range is trimmed against.
    pub basis: SubtractionBasis,
}

/// Result of resolving two ranges.
#[derive(Debug, Clone)]
pub struct Overlap {
    pub first: Region,
    pub second: Region,
    pub layers: OverlapLayers,
    pub order: DrawOrder,
}

impl Overlap {
    /// Resolve two ranges into layers and a draw order.
    pub fn resolve(first: Region, second: Region, options: ResolveOptions) -> Self {
        let layers = OverlapLayers::compute(first.geometry(), second.geometry(), options.basis);
        let order = DrawOrder::decide(&first, &second, options.projection);

        debug!(
            first = first.name(),
            second = second.name(),
            first_area = order.first_area,
            second_area = order.second_area,
            projection = %options.projection,
            basis = %options.basis,
            overlaps = layers.overlaps(),
            "Resolved range overlap"
        );

        Self {
            first,
            second,
            layers,
            order,
        }
    }

    pub fn region(&self, side: Side) -> &Region {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    /// Difference layer belonging to a side.
    pub fn exclusive_layer(&self, side: Side) -> &geo::MultiPolygon<f64> {
        match side {
            Side::First => &self.layers.first_only,
            Side::Second => &self.layers.second_only,
        }
    }

    /// The range drawn underneath.
    pub fn background(&self) -> &Region {
        self.region(self.order.background)
    }

    /// The range that owns the intersection hatch.
    pub fn foreground(&self) -> &Region {
        self.region(self.order.foreground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;
    use geo::Area;

    #[test]
    fn test_require_pair_accepts_two() {
        let names = ["Didelphis virginiana", "Didelphis marsupialis"];
        let (a, b) = require_pair(&names).unwrap();
        assert_eq!(*a, "Didelphis virginiana");
        assert_eq!(*b, "Didelphis marsupialis");
    }

    #[test]
    fn test_require_pair_rejects_other_counts() {
        let three = ["a", "b", "c"];
        assert_eq!(
            require_pair(&three),
            Err(OverlapError::UnsupportedCardinality(3))
        );
        assert_eq!(
            require_pair::<&str>(&[]),
            Err(OverlapError::UnsupportedCardinality(0))
        );
        assert_eq!(
            require_pair(&["a"]),
            Err(OverlapError::UnsupportedCardinality(1))
        );
    }

    #[test]
    fn test_cardinality_error_message() {
        let err = OverlapError::UnsupportedCardinality(3);
        assert_eq!(err.to_string(), "overlap plots need exactly 2 species, got 3");
    }

    #[test]
    fn test_resolve_contained_range() {
        let outer = Region::new("Didelphis marsupialis", "Didelphis", square(-90.0, -10.0, 30.0));
        let inner = Region::new("Didelphis virginiana", "Didelphis", square(-80.0, 0.0, 5.0));

        let overlap = Overlap::resolve(outer, inner, ResolveOptions::default());

        assert!(overlap.layers.second_only.unsigned_area() < 1e-9);
        assert!((overlap.layers.first_only.unsigned_area() - 875.0).abs() < 1e-6);
        assert!((overlap.layers.shared.unsigned_area() - 25.0).abs() < 1e-6);
        assert_eq!(overlap.background().name(), "Didelphis marsupialis");
        assert_eq!(overlap.foreground().name(), "Didelphis virginiana");
        assert!((overlap.exclusive_layer(Side::First).unsigned_area() - 875.0).abs() < 1e-6);
    }
}
