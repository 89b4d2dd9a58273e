//! Parsing and validation of `spur.toml` build configuration files.
//!
//! The configuration selects validation mode, the property-ordering policy
//! shared by the scanner and the synthesizer, and the suffixes synthesized
//! artifacts are named with.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
