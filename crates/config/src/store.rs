//! Local key-value store mirroring what the wizard keeps in browser storage:
//! the last picked location and the in-progress registration draft.
//!
//! The whole store is one JSON object on disk. Every write goes straight
//! through to the file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use qservicos_address::{RawLocation, RegistrationDraft};

use crate::error::ConfigError;

pub const USER_LOCATION_KEY: &str = "userLocation";
pub const REGISTRATION_DRAFT_KEY: &str = "registrationDraft";

/// A location as persisted, stamped with when it was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLocation {
    #[serde(flatten)]
    pub location: RawLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl LocalStore {
    pub fn default_path() -> PathBuf {
        crate::config_dir().join("store.json")
    }

    /// Open a store file. Missing or unreadable files start empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    log::warn!("{} is not a JSON object; starting empty", path.display());
                    Map::new()
                }
                Err(e) => {
                    log::warn!("cannot parse {}: {e}; starting empty", path.display());
                    Map::new()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("cannot read {}: {e}; starting empty", path.display());
                }
                Map::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), ConfigError> {
        self.entries.insert(key.into(), value);
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, ConfigError> {
        let old = self.entries.shift_remove(key);
        if old.is_some() {
            self.flush()?;
        }
        Ok(old)
    }

    fn flush(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| ConfigError::io(&self.path, e))
    }

    // -----------------------------------------------------------------------
    // userLocation
    // -----------------------------------------------------------------------

    /// Last picked location. An undecodable entry reads as absent.
    pub fn user_location(&self) -> Option<StoredLocation> {
        let value = self.entries.get(USER_LOCATION_KEY)?.clone();
        match serde_json::from_value(value) {
            Ok(stored) => Some(stored),
            Err(e) => {
                log::warn!("ignoring malformed {USER_LOCATION_KEY}: {e}");
                None
            }
        }
    }

    pub fn save_user_location(&mut self, location: &RawLocation) -> Result<StoredLocation, ConfigError> {
        let stored = StoredLocation {
            location: location.clone(),
            saved_at: Some(Utc::now()),
        };
        let value = serde_json::to_value(&stored).map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.set(USER_LOCATION_KEY, value)?;
        Ok(stored)
    }

    pub fn clear_user_location(&mut self) -> Result<bool, ConfigError> {
        Ok(self.remove(USER_LOCATION_KEY)?.is_some())
    }

    // -----------------------------------------------------------------------
    // registrationDraft
    // -----------------------------------------------------------------------

    /// Stored draft, or an empty one if none was saved yet.
    pub fn registration_draft(&self) -> Result<RegistrationDraft, ConfigError> {
        match self.entries.get(REGISTRATION_DRAFT_KEY) {
            Some(value) => RegistrationDraft::from_value(value.clone())
                .map_err(|e| ConfigError::Parse(format!("{REGISTRATION_DRAFT_KEY}: {e}"))),
            None => Ok(RegistrationDraft::new()),
        }
    }

    pub fn save_registration_draft(&mut self, draft: &RegistrationDraft) -> Result<(), ConfigError> {
        self.set(REGISTRATION_DRAFT_KEY, draft.clone().into_value())
    }

    /// Drop the draft (after a successful final submission).
    pub fn clear_registration_draft(&mut self) -> Result<bool, ConfigError> {
        Ok(self.remove(REGISTRATION_DRAFT_KEY)?.is_some())
    }
}
