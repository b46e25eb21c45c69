//! Run command - initialize, then plot the default species pair.

use std::path::PathBuf;

use possumplot::config::ConfigFile;
use possumplot::workspace::Workspace;

use super::common::{DEFAULT_FIGURE, DEFAULT_SPECIES};
use super::plot::{plot, PlotArgs};
use crate::error::CliError;

/// Run the default scenario.
pub fn run(config: &ConfigFile, land: Option<PathBuf>) -> Result<(), CliError> {
    let (workspace, _) = Workspace::initialize(&config.paths)?;

    let args = PlotArgs {
        species: DEFAULT_SPECIES.iter().map(|s| s.to_string()).collect(),
        output: Some(DEFAULT_FIGURE.to_string()),
        land,
    };
    plot(&workspace, config, args)
}
