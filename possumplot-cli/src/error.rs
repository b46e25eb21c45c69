//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use possumplot::config::ConfigFileError;
use possumplot::land::LandError;
use possumplot::overlap::OverlapError;
use possumplot::plot::PlotError;
use possumplot::store::StoreError;
use possumplot::workspace::WorkspaceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Workspace bootstrap failed
    Workspace(WorkspaceError),
    /// Land background could not be loaded
    Land(LandError),
    /// Plotting failed
    Plot(PlotError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Workspace(WorkspaceError::MissingMaster { .. }) => {
                eprintln!();
                eprintln!("Place MDD_Didelphimorphia.gpkg in the working directory, or point");
                eprintln!("the config at it:");
                eprintln!("  possumplot config set paths.master /path/to/MDD_Didelphimorphia.gpkg");
            }
            CliError::Plot(PlotError::Overlap(OverlapError::UnsupportedCardinality(_))) => {
                eprintln!();
                eprintln!("Give exactly two quoted scientific names, e.g.:");
                eprintln!("  possumplot plot \"Didelphis virginiana\" \"Didelphis marsupialis\"");
            }
            CliError::Plot(PlotError::Store(StoreError::GenusNotFound { .. })) => {
                eprintln!();
                eprintln!("Genus files are created by 'possumplot init'. If it has already run,");
                eprintln!("check the genus spelling and capitalisation.");
            }
            CliError::Plot(PlotError::Store(StoreError::SpeciesNotFound { .. })) => {
                eprintln!();
                eprintln!("Names must match the dataset's sciname column exactly,");
                eprintln!("e.g. \"Didelphis virginiana\".");
            }
            CliError::Land(_) => {
                eprintln!();
                eprintln!("Land files must be GeoJSON (.geojson/.json) or GeoPackage (.gpkg).");
                eprintln!("Clear the setting to plot without land: possumplot config set paths.land \"\"");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Workspace(e) => write!(f, "Initialization failed: {}", e),
            CliError::Land(e) => write!(f, "Failed to load land background: {}", e),
            CliError::Plot(e) => write!(f, "Plot failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Workspace(e) => Some(e),
            CliError::Land(e) => Some(e),
            CliError::Plot(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<WorkspaceError> for CliError {
    fn from(e: WorkspaceError) -> Self {
        CliError::Workspace(e)
    }
}

impl From<LandError> for CliError {
    fn from(e: LandError) -> Self {
        CliError::Land(e)
    }
}

impl From<PlotError> for CliError {
    fn from(e: PlotError) -> Self {
        CliError::Plot(e)
    }
}
