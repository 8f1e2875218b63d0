// Configuration loading

pub mod error;
pub mod settings;
pub mod store;

use std::path::PathBuf;

pub use error::ConfigError;
pub use settings::{load_heuristic, Settings};
pub use store::{LocalStore, StoredLocation};

/// Per-user directory holding settings.json and store.json.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qservicos")
}
