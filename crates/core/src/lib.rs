//! Climate API Core Library
//!
//! Shared utilities for the climate API server:
//! - Configuration loading (XDG-compliant)
//! - Dataset file lookup

mod config;
pub mod fs;

pub use config::{find_config_file, get_xdg_data_dir, load_config, ConfigSource};
pub use fs::{is_readable_file, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Dataset file name looked up when no explicit path is configured
pub const DEFAULT_DATABASE_FILE: &str = "hawaii.sqlite";

/// Default number of pooled read-only connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
