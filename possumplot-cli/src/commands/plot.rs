//! Plot command - overlap plot of two species.

use std::path::PathBuf;

use possumplot::config::ConfigFile;
use possumplot::plot::{plot_species, PlotOptions};
use possumplot::workspace::Workspace;

use super::common::{land_notice, load_land, DEFAULT_FIGURE};
use crate::error::CliError;

/// Arguments for the plot command.
#[derive(Debug, Default)]
pub struct PlotArgs {
    pub species: Vec<String>,
    pub output: Option<String>,
    pub land: Option<PathBuf>,
}

/// Run the plot command against an existing workspace.
pub fn run(config: &ConfigFile, args: PlotArgs) -> Result<(), CliError> {
    let workspace = Workspace::from_paths(&config.paths);
    plot(&workspace, config, args)
}

/// Plot into a workspace that is already open.
pub(crate) fn plot(workspace: &Workspace, config: &ConfigFile, args: PlotArgs) -> Result<(), CliError> {
    let land = load_land(args.land, config)?;
    let filename = args.output.as_deref().unwrap_or(DEFAULT_FIGURE);

    let path = plot_species(
        workspace,
        &args.species,
        &land,
        filename,
        &PlotOptions::from(&config.plot),
    )?;

    if let Some(notice) = land_notice(&land) {
        println!("{}", notice);
    }
    println!("Saved {}", path.display());
    Ok(())
}
