//! Key-value preference storage.
//!
//! The host application owns the concrete store; the core only talks to
//! [`PreferenceStore`]. Two implementations ship here: [`MemoryStore`] for
//! tests and embedding, and [`FileStore`] which keeps the map in a TOML file.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::debug;

/// Preference keys. Values are stable; they name entries in existing stores.
pub mod keys {
    pub const FAVORITE_CITY: &str = "favoriteCity";
    pub const FAVORITE_CITIES: &str = "favoriteCities";
    pub const DARK_THEME: &str = "darkTheme";
    pub const METRIC_UNITS: &str = "metricUnits";
    pub const NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

pub trait PreferenceStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Store `value` under `key`. Returns once the value is persisted.
    fn set(&self, key: &str, value: PrefValue) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    fn string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(PrefValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    fn string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key) {
            Some(PrefValue::List(list)) => Some(list),
            _ => None,
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(PrefValue::Flag(b)) => Some(b),
            _ => None,
        }
    }
}

type PrefMap = BTreeMap<String, PrefValue>;

fn lock(map: &Mutex<PrefMap>) -> MutexGuard<'_, PrefMap> {
    // A panic while holding the lock cannot leave the map half-written.
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<PrefMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: PrefValue) -> Result<()> {
        lock(&self.values).insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// Store backed by a TOML file that is rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<PrefMap>,
}

impl FileStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?
        } else {
            PrefMap::new()
        };

        Ok(Self { path, values: Mutex::new(values) })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the map, persist it, then commit it in memory.
    fn mutate(&self, change: impl FnOnce(&mut PrefMap)) -> Result<()> {
        let mut values = lock(&self.values);
        let mut next = values.clone();
        change(&mut next);

        self.write(&next)?;
        *values = next;
        Ok(())
    }

    fn write(&self, values: &PrefMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(values).context("Failed to serialize preferences")?;
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preferences file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), entries = values.len(), "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: PrefValue) -> Result<()> {
        self.mutate(|values| {
            values.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.mutate(|values| {
            values.remove(key);
        })
    }
}
