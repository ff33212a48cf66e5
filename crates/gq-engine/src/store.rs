//! Ledger persistence.
//!
//! A store maps a session key to the ledger's JSON form. The only contract
//! is that a saved ledger loads back equal, so the data survives restarts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use gq_core::ProgressLedger;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Somewhere a ledger can be saved and loaded.
pub trait ProgressStore {
    /// Load the ledger stored under `key`. `Ok(None)` if nothing is stored.
    fn load(&self, key: &str) -> StoreResult<Option<ProgressLedger>>;

    /// Replace whatever is stored under `key`.
    fn save(&mut self, key: &str, ledger: &ProgressLedger) -> StoreResult<()>;
}

/// An in-memory store that keeps the serialized JSON.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store raw text under `key`, valid or not.
    pub fn insert_raw(&mut self, key: impl Into<String>, json: impl Into<String>) {
        self.values.insert(key.into(), json.into());
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<ProgressLedger>> {
        self.values
            .get(key)
            .map(|json| serde_json::from_str(json))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&mut self, key: &str, ledger: &ProgressLedger) -> StoreResult<()> {
        let json = serde_json::to_string(ledger)?;
        self.values.insert(key.to_string(), json);
        Ok(())
    }
}

/// Stores each ledger as `<dir>/<key>.json`.
///
/// Saves go through a temporary file and a rename, so a crash mid-write
/// leaves the previous ledger in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory ledgers live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a key is stored in.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let bad = key.is_empty()
        || key == "."
        || key.contains("..")
        || key.chars().any(|c| c == '/' || c == '\\' || c.is_control());
    if bad {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl ProgressStore for JsonFileStore {
    fn load(&self, key: &str) -> StoreResult<Option<ProgressLedger>> {
        let path = self.path_for(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "loaded ledger");
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, key: &str, ledger: &ProgressLedger) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "saved ledger");
        Ok(())
    }
}
