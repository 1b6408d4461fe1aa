//! Bookmarked cities, persisted as a full JSON snapshot on every change.

use std::{collections::HashMap, fs, path::PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::model::FavoriteLocation;

/// Key under which the favorites list is stored in the substrate.
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not access favorites storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored favorites are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("could not determine platform data directory")]
    NoDataDir,
}

/// String-keyed get/set store backing the favorites list.
pub trait KeyValueStore: Send + std::fmt::Debug {
    /// The stored value, or `None` when the key was never set or cannot be
    /// read.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform data directory.
    pub fn open() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast").ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    /// Store rooted at an explicit directory.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// Volatile store for tests and sessions without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable favorites list over a [`KeyValueStore`].
#[derive(Debug)]
pub struct FavoritesStore {
    store: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Favorites store over the platform data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(Box::new(FileStore::open()?)))
    }

    /// Read the persisted list. Absent or unreadable data yields an empty
    /// list; the old content is overwritten on the next persist.
    pub fn load(&self) -> Vec<FavoriteLocation> {
        let Some(raw) = self.store.get(FAVORITES_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "stored favorites are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored value with a full snapshot of `list`.
    pub fn persist(&mut self, list: &[FavoriteLocation]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(list)?;
        self.store.set(FAVORITES_KEY, &raw)
    }
}

/// Bookmark `name`, or drop the bookmark if one already exists.
///
/// Pure with respect to the input list; the caller persists the result.
/// A re-added city gets a fresh id. Routing every mutation through here
/// keeps names unique in the list.
pub fn toggle(name: &str, list: &[FavoriteLocation]) -> Vec<FavoriteLocation> {
    if list.iter().any(|fav| fav.name == name) {
        return list
            .iter()
            .filter(|fav| fav.name != name)
            .cloned()
            .collect();
    }

    let mut next = list.to_vec();
    next.push(FavoriteLocation {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
    });
    next
}
