// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON config blobs for console preferences, over a pluggable byte store.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::ports::PrefsPort;
use crate::prefs::ConsolePrefs;

/// Key under which console preferences are stored.
pub const PREFS_KEY: &str = "console_prefs";

/// Byte storage behind [`ConfigService`].
///
/// Keys are flat names such as [`PREFS_KEY`]; the host picks where the bytes
/// live (a prefs directory, browser storage, an in-memory map in tests).
pub trait ConfigStore {
    /// Bytes last saved under `key`, or [`ConfigError::NotFound`] if none.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replace whatever is stored under `key` with `data`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Why a preference blob could not be read or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing has been saved under the key yet.
    #[error("no stored value for key")]
    NotFound,
    /// The backing store failed to read or write.
    #[error("config store i/o: {0}")]
    Io(#[from] std::io::Error),
    /// Stored bytes do not decode as the requested preference type.
    #[error("config json: {0}")]
    Serde(#[from] serde_json::Error),
    /// Rejected by the store itself, e.g. an unusable key.
    #[error("config store: {0}")]
    Other(String),
}

/// Serializes values to JSON and delegates bytes to a [`ConfigStore`].
#[derive(Debug)]
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Service over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Load `key`. Missing and empty blobs are `Ok(None)`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Store `value` under `key` as pretty JSON.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

impl<S: ConfigStore> PrefsPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<ConsolePrefs> {
        match self.load(PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(error = %err, "console prefs unreadable; using defaults");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &ConsolePrefs) {
        if let Err(err) = self.save(PREFS_KEY, prefs) {
            warn!(error = %err, "failed to save console prefs");
        }
    }
}
