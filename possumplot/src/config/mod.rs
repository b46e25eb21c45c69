//! User configuration.
//!
//! Settings are read from an INI file (`~/.possumplot/config.ini` unless a
//! path is given) and overlaid on built-in defaults. A missing file means
//! defaults.

mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, PathsConfig, PlotSettings, DEFAULT_FIGURES_DIR, DEFAULT_MASTER,
    DEFAULT_SHAPES_DIR,
};
