//! Parsing and validation of `tempo.toml` project configuration files.
//!
//! A project file names the design, points at its clock, library and netlist
//! files, and carries analysis and report settings. Command-line flags
//! override anything set here.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_path, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
