//! Plot entry points.
//!
//! [`plot_species`] draws the ranges of exactly two species with their
//! overlap hatched. Genus-level plots are declared but not available yet.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::PlotSettings;
use crate::land::LandLayer;
use crate::overlap::{require_pair, Overlap, OverlapError, ResolveOptions};
use crate::render::{render_overlap, PlotStyle, RenderError};
use crate::store::StoreError;
use crate::workspace::Workspace;

/// Errors from producing a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Other than two species were requested.
    #[error(transparent)]
    Overlap(#[from] OverlapError),

    /// A species could not be resolved.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Drawing or saving failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The plot kind has no implementation.
    #[error("{0} is not implemented yet")]
    Unimplemented(&'static str),
}

/// Everything that controls how a plot looks and is computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotOptions {
    pub style: PlotStyle,
    pub resolve: ResolveOptions,
}

impl From<&PlotSettings> for PlotOptions {
    fn from(settings: &PlotSettings) -> Self {
        Self {
            style: settings.style(),
            resolve: settings.resolve_options(),
        }
    }
}

/// Plot the ranges of two species and save the figure.
///
/// `filename` is relative to the workspace figures directory. Returns the
/// path written. Nothing is written when fewer or more than two species are
/// given or a species cannot be found.
pub fn plot_species(
    workspace: &Workspace,
    species: &[String],
    land: &LandLayer,
    filename: &str,
    options: &PlotOptions,
) -> Result<PathBuf, PlotError> {
    let (first, second) = require_pair(species)?;

    let first = workspace.store().find_species(first)?;
    let second = workspace.store().find_species(second)?;

    info!(first = first.name(), second = second.name(), "plotting");

    let overlap = Overlap::resolve(first, second, options.resolve);
    let canvas = render_overlap(&overlap, land, &options.style)?;

    let path = workspace.figure_path(filename);
    canvas.save(&path)?;

    info!(
        path = %path.display(),
        background = overlap.background().name(),
        foreground = overlap.foreground().name(),
        "Saved overlap plot"
    );
    Ok(path)
}

/// Plot whole genera, one colour per genus with overlaps hatched.
pub fn plot_genera(
    _workspace: &Workspace,
    _genera: &[String],
    _land: &LandLayer,
    _filename: &str,
    _options: &PlotOptions,
) -> Result<PathBuf, PlotError> {
    Err(PlotError::Unimplemented("plotting whole genera"))
}

/// Plot every member species of a genus.
pub fn plot_genus_members(
    _workspace: &Workspace,
    _genus: &str,
    _land: &LandLayer,
    _filename: &str,
    _options: &PlotOptions,
) -> Result<PathBuf, PlotError> {
    Err(PlotError::Unimplemented("plotting genus members"))
}
