use std::fmt;

#[derive(Debug)]
pub enum AddressError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty keyword, duplicate field key, etc.).
    ConfigValidation(String),
    /// Draft JSON is not a flat object.
    DraftShape(String),
    /// Draft or location JSON could not be decoded.
    Json(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::DraftShape(msg) => write!(f, "draft must be a JSON object: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for AddressError {}

impl From<serde_json::Error> for AddressError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
