//! Init command - create the workspace and split the master dataset.

use possumplot::config::ConfigFile;
use possumplot::workspace::{InitOutcome, Workspace};

use crate::error::CliError;

/// Run the init command.
pub fn run(config: &ConfigFile) -> Result<(), CliError> {
    let (workspace, outcome) = Workspace::initialize(&config.paths)?;

    match outcome {
        InitOutcome::AlreadyInitialized => {
            println!(
                "Genus files already present in {}",
                workspace.store().dir().display()
            );
        }
        InitOutcome::Partitioned(summary) => {
            println!(
                "Split {} records into {} genus files:",
                summary.record_count(),
                summary.genus_count()
            );
            for (genus, count) in &summary.genera {
                println!("  {:<20} {}", genus, count);
            }
            println!();
            println!(
                "Initialization Complete: you can delete {} now",
                config.paths.master.display()
            );
        }
    }

    println!("Figures are written to {}", workspace.figures_dir().display());
    Ok(())
}
