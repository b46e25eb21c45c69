//! possumplot - Species range overlap plots
//!
//! This library splits the Mammal Diversity Database *Didelphimorphia*
//! GeoPackage into one file per genus and renders overlap plots of two
//! species' geographic ranges: each range's exclusive area in its own
//! colour, the shared area hatched, and the larger range underneath.
//!
//! # Example
//!
//! ```no_run
//! use possumplot::config::ConfigFile;
//! use possumplot::geometry::AMERICAS_BOUNDS;
//! use possumplot::land::LandLayer;
//! use possumplot::plot::{plot_species, PlotOptions};
//! use possumplot::workspace::Workspace;
//!
//! let config = ConfigFile::default();
//! let (workspace, _) = Workspace::initialize(&config.paths)?;
//! let land = LandLayer::load_optional(config.paths.land.as_deref(), &AMERICAS_BOUNDS)?;
//! let species = vec![
//!     "Didelphis virginiana".to_string(),
//!     "Didelphis marsupialis".to_string(),
//! ];
//! plot_species(&workspace, &species, &land, "plotSpeciesTest.png", &PlotOptions::from(&config.plot))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod geometry;
pub mod gpkg;
pub mod land;
pub mod logging;
pub mod overlap;
pub mod plot;
pub mod record;
pub mod render;
pub mod store;
pub mod taxon;
pub mod workspace;
