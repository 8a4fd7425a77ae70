//! Async facade over the local key-value database.
//!
//! [`Store`] owns only the database path. Each operation opens a connection
//! and runs on the blocking pool, so callers can await storage from async
//! code without stalling the runtime.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use tokio::task;

use crate::{
    db::Database,
    error::{JoinResultExt, PathwayError, Result},
};

pub mod keys;

/// Handle to the persistent key-value store.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the store at `db_path`.
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PathwayError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(|_| ()))
            .await
            .join_context()?;

        Ok(Self { db_path })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Reads the raw value stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_value(&key)
        })
        .await
        .join_context()
    }

    /// Writes a raw value under `key`.
    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        let value = value.into();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_value(&key, &value)
        })
        .await
        .join_context()
    }

    /// Removes the listed keys.
    pub async fn remove(&self, keys: &[&str]) -> Result<()> {
        let db_path = self.db_path.clone();
        let keys: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();

        let removed = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            db.remove_values(&refs)
        })
        .await
        .join_context()?;

        debug!("Removed {removed} stored values");
        Ok(())
    }

    /// Reads and decodes a JSON value.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Reads a JSON value, treating absent or undecodable records as the
    /// default. Undecodable records are logged, not returned as errors.
    pub async fn get_json_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.get(key).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(e) => {
                    warn!("Ignoring unreadable record under '{key}': {e}");
                    Ok(T::default())
                }
            },
            None => Ok(T::default()),
        }
    }

    /// Encodes and writes a JSON value.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, raw).await
    }
}
