//! Configuration module
//!
//! Handles loading and validating configuration from TOML files, environment
//! variables and flat properties.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_properties, load_config_from_str};
pub use types::*;
