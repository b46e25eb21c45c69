//! Helpers shared across CLI commands.

use std::path::{Path, PathBuf};

use possumplot::config::ConfigFile;
use possumplot::geometry::AMERICAS_BOUNDS;
use possumplot::land::LandLayer;
use possumplot::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};

use crate::error::CliError;

/// Scientific names plotted when no command is given.
pub const DEFAULT_SPECIES: [&str; 2] = ["Didelphis virginiana", "Didelphis marsupialis"];

/// Figure written by the default run.
pub const DEFAULT_FIGURE: &str = "plotSpeciesTest.png";

/// Load the config from an explicit path or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Install logging for commands that do real work.
pub fn start_logging() -> Result<LoggingGuard, CliError> {
    init_logging(default_log_dir(), default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

/// Load land polygons, preferring the command-line path over the config.
pub fn load_land(cli_land: Option<PathBuf>, config: &ConfigFile) -> Result<LandLayer, CliError> {
    let path = cli_land.or_else(|| config.paths.land.clone());
    Ok(LandLayer::load_optional(path.as_deref(), &AMERICAS_BOUNDS)?)
}

/// Notice shown when a figure is drawn without land polygons.
pub fn land_notice(land: &LandLayer) -> Option<&'static str> {
    land.is_empty().then_some(
        "No land background: set one with 'possumplot config set paths.land <FILE>' \
         or pass --land <FILE> (.geojson, .json or .gpkg)",
    )
}
