use std::fmt;
use std::path::Path;

use qservicos_address::AddressError;

#[derive(Debug)]
pub enum ConfigError {
    /// File read/write failure.
    Io { path: String, message: String },
    /// Stored JSON could not be decoded or encoded.
    Parse(String),
    /// Heuristic TOML rejected.
    Heuristic(AddressError),
}

impl ConfigError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{path}: {message}"),
            Self::Parse(msg) => write!(f, "store parse error: {msg}"),
            Self::Heuristic(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
