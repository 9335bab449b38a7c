//! Configuration file parsing for coursesync
//!
//! Supports:
//! - `.coursesync/config.toml` - Server and behavior settings

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
