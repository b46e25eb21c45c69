//! CLI command implementations.
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`init`] - Workspace bootstrap
//! - [`plot`] - Overlap plot of two species
//! - [`run`] - Default scenario (init, then plot the default pair)

pub mod common;
pub mod config;
pub mod init;
pub mod plot;
pub mod run;
