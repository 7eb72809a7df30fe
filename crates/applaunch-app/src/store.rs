//! Identifier persistence
//!
//! The identifier is scoped per platform and stored under a platform key
//! (see [`Platform::storage_key`]). An absent key reads as `""`, which means
//! "unset".

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;

use applaunch_core::prelude::*;
use applaunch_core::Platform;

use crate::config::settings::APPLAUNCH_DIR;

const STATE_FILENAME: &str = "state.toml";

/// Key-value store for the per-platform application identifier
///
/// `set` persists whatever it is given; validation is the caller's job.
#[cfg_attr(test, mockall::automock)]
pub trait IdentifierStore {
    fn get(&self, platform: Platform) -> String;
    fn set(&self, platform: Platform, value: &str) -> Result<()>;
}

/// Store backed by `<project>/.applaunch/state.toml`
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    path: PathBuf,
}

impl WorkspaceStore {
    pub fn new(project_path: &Path) -> Self {
        Self {
            path: project_path.join(APPLAUNCH_DIR).join(STATE_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file; a missing file is an empty store
    fn load(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(Error::store(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        toml::from_str(&content).map_err(|e| {
            Error::store(format!(
                "State file {} is corrupt, fix or delete it: {}",
                self.path.display(),
                e.message()
            ))
        })
    }

    /// Exclusive lock held across read-modify-write
    fn lock(&self, dir: &Path) -> Result<std::fs::File> {
        let lock = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(".state.lock"))
            .map_err(|e| Error::store(format!("Failed to open state lock: {}", e)))?;
        lock.lock_exclusive()
            .map_err(|e| Error::store(format!("Failed to lock state: {}", e)))?;
        Ok(lock)
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let content = toml::to_string(values)
            .map_err(|e| Error::store(format!("Failed to serialize state: {}", e)))?;

        let tmp_path = self.path.with_extension("toml.tmp");
        let mut tmp = std::fs::File::create(&tmp_path)
            .map_err(|e| Error::store(format!("Failed to create {:?}: {}", tmp_path, e)))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| Error::store(format!("Failed to write state: {}", e)))?;
        drop(tmp);

        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| Error::store(format!("Failed to replace state file: {}", e)))?;

        debug!("Saved state to {:?}", self.path);
        Ok(())
    }
}

impl IdentifierStore for WorkspaceStore {
    fn get(&self, platform: Platform) -> String {
        match self.load() {
            Ok(mut values) => values.remove(platform.storage_key()).unwrap_or_default(),
            Err(e) => {
                warn!("{}", e);
                String::new()
            }
        }
    }

    /// Never overwrites a state file it cannot parse
    fn set(&self, platform: Platform, value: &str) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::store(format!("Invalid state path {:?}", self.path)))?;
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::store(format!("Failed to create {:?}: {}", dir, e)))?;

        let _lock = self.lock(dir)?;
        let mut values = self.load()?;
        values.insert(platform.storage_key().to_string(), value.to_string());
        self.save(&values)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(platform: Platform, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(platform.storage_key(), value.to_string());
        }
        store
    }
}

impl IdentifierStore for MemoryStore {
    fn get(&self, platform: Platform) -> String {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(platform.storage_key()).cloned())
            .unwrap_or_default()
    }

    fn set(&self, platform: Platform, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::store("identifier store poisoned"))?;
        values.insert(platform.storage_key(), value.to_string());
        Ok(())
    }
}
