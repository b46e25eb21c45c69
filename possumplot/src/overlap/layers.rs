//! Difference and intersection layers of two ranges.

use std::fmt;
use std::str::FromStr;

use geo::{BooleanOps, MultiPolygon};

/// Which geometry the second range is trimmed against.
///
/// `Original` is the default because only `B − A` keeps the three layers
/// disjoint, so their union equals `A ∪ B` by area. `Trimmed` reproduces the
/// reference plotting script and is kept for side-by-side comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtractionBasis {
    /// `B − A`. The three layers partition `A ∪ B`.
    #[default]
    Original,
    /// `B − (A − B)`, which leaves the shared area inside the second layer.
    Trimmed,
}

impl SubtractionBasis {
    pub fn name(&self) -> &'static str {
        match self {
            SubtractionBasis::Original => "original",
            SubtractionBasis::Trimmed => "trimmed",
        }
    }
}

impl fmt::Display for SubtractionBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubtractionBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "original" => Ok(SubtractionBasis::Original),
            "trimmed" => Ok(SubtractionBasis::Trimmed),
            other => Err(format!("unknown subtraction basis '{}'", other)),
        }
    }
}

/// The three layers derived from two ranges `A` and `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapLayers {
    /// `A − B`.
    pub first_only: MultiPolygon<f64>,
    /// `B − A` (or `B − (A − B)` with [`SubtractionBasis::Trimmed`]).
    pub second_only: MultiPolygon<f64>,
    /// `A ∩ B`, from the untrimmed inputs.
    pub shared: MultiPolygon<f64>,
}

impl OverlapLayers {
    /// Compute the layers in order: `A − B`, then `B − …`, then `A ∩ B`.
    pub fn compute(
        first: &MultiPolygon<f64>,
        second: &MultiPolygon<f64>,
        basis: SubtractionBasis,
    ) -> Self {
        let first_only = first.difference(second);
        let second_only = match basis {
            SubtractionBasis::Original => second.difference(first),
            SubtractionBasis::Trimmed => second.difference(&first_only),
        };
        let shared = first.intersection(second);

        Self {
            first_only,
            second_only,
            shared,
        }
    }

    /// True when the ranges share any area.
    pub fn overlaps(&self) -> bool {
        !self.shared.0.is_empty()
    }
}
