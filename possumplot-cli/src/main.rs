//! possumplot CLI - Command-line interface
//!
//! Without a subcommand, initializes the workspace and plots
//! *Didelphis virginiana* against *Didelphis marsupialis*.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use possumplot::config::{config_file_path, ConfigFile};
use tracing::debug;

use commands::common::{load_config, start_logging};
use commands::config::ConfigCommands;
use commands::plot::PlotArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "possumplot")]
#[command(version, about = "Overlap plots of opossum species ranges", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.possumplot/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize, then plot the default species pair to plotSpeciesTest.png
    Run {
        /// Land polygons (.geojson, .json or .gpkg), overrides paths.land
        #[arg(long, value_name = "PATH")]
        land: Option<PathBuf>,
    },

    /// Create the workspace directories and split the master dataset by genus
    Init,

    /// Plot the ranges of two species with their overlap hatched
    Plot {
        /// Scientific names, quoted (e.g. "Didelphis virginiana")
        species: Vec<String>,

        /// Output file name inside the figures directory; the extension picks the format
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,

        /// Land polygons (.geojson, .json or .gpkg), overrides paths.land
        #[arg(long, value_name = "PATH")]
        land: Option<PathBuf>,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config;

    match cli.command.unwrap_or(Commands::Run { land: None }) {
        Commands::Config { command } => {
            let path = config_path.unwrap_or_else(config_file_path);
            commands::config::run(command, &path)
        }
        Commands::Run { land } => with_config(config_path, |config| {
            commands::run::run(config, land)
        }),
        Commands::Init => with_config(config_path, commands::init::run),
        Commands::Plot {
            species,
            output,
            land,
        } => with_config(config_path, |config| {
            commands::plot::run(
                config,
                PlotArgs {
                    species,
                    output,
                    land,
                },
            )
        }),
    }
}

/// Load the config and start logging, then run a command.
fn with_config(
    path: Option<PathBuf>,
    command: impl FnOnce(&ConfigFile) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let config = load_config(path.as_deref())?;
    let _logging = start_logging()?;
    debug!(?config, "Loaded configuration");
    command(&config)
}
