// src/storage/repository.rs
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::{
    errors::{Result, StorageError},
    handler::SaveHandler,
};

/// An entity that can be stored as a single text record.
///
/// `from_record` must accept every string `to_record` produces and rebuild an
/// equal value.
pub trait Saveable: Default + Clone + Send + Sync + 'static {
    fn to_record(&self) -> Result<String>;

    fn from_record(data: &str) -> Result<Self>;
}

/// Opt-in marker: stores the type as JSON through serde.
///
/// JSON has no representation for NaN or infinite floats; serde_json writes
/// them as `null`, which then fails to load as a number. Types whose float
/// fields may hold non-finite values should implement [`Saveable`] directly.
pub trait JsonSaveable {}

impl<T> Saveable for T
where
    T: JsonSaveable + Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    fn to_record(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| StorageError::InvalidFormat(e.to_string()))
    }

    fn from_record(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| StorageError::InvalidFormat(e.to_string()))
    }
}

/// Cached copy of one entity, kept in step with a single record.
///
/// The cache always holds a value: `T::default()` until a save or a load
/// that found data replaces it. Saves update the cache before the write is
/// attempted, so `get` reflects the newest value even if the write fails.
/// Concurrent saves and loads on one repository are not ordered against
/// each other; callers serialize them.
pub struct Repository<T: Saveable> {
    handler: Arc<dyn SaveHandler>,
    key: String,
    cache: RwLock<T>,
}

impl<T: Saveable> Repository<T> {
    pub fn new(handler: Arc<dyn SaveHandler>, key: impl Into<String>) -> Self {
        Self {
            handler,
            key: key.into(),
            cache: RwLock::new(T::default()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cached value without touching storage.
    pub fn get(&self) -> T {
        self.cache.read().clone()
    }

    /// Reloads from storage. If nothing is stored the cache is kept as is.
    /// A record that fails to deserialize is reported and leaves the cache
    /// untouched.
    pub fn load(&self) -> Result<T> {
        let data = self.handler.get(&self.key)?;
        self.apply_loaded(&data)
    }

    pub async fn load_async(&self) -> Result<T> {
        let data = self.handler.get_async(&self.key).await?;
        self.apply_loaded(&data)
    }

    pub fn save(&self, value: T) -> Result<()> {
        let record = value.to_record();
        *self.cache.write() = value;
        self.handler.put(&self.key, &record?)
    }

    pub async fn save_async(&self, value: T) -> Result<()> {
        let record = value.to_record();
        *self.cache.write() = value;
        self.handler.put_async(&self.key, &record?).await
    }

    fn apply_loaded(&self, data: &str) -> Result<T> {
        if data.is_empty() {
            debug!(key = %self.key, "Nothing stored, keeping cached value");
            return Ok(self.get());
        }

        let value = T::from_record(data)?;
        *self.cache.write() = value.clone();
        debug!(key = %self.key, "Cache refreshed from storage");
        Ok(value)
    }
}
