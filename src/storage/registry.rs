// src/storage/registry.rs
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    build_handler, errors::Result, handler::SaveHandler, primitive::PrimitiveCodec,
    repository::{Repository, Saveable},
};
use crate::utils::config::StorageConfig;

/// Owns one [`Repository`] per entity type, all sharing a single handler.
///
/// Construct one registry and pass it to whoever needs it; there is no
/// process-wide instance.
pub struct RepositoryRegistry {
    handler: Arc<dyn SaveHandler>,
    primitives: PrimitiveCodec,
    repositories: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl RepositoryRegistry {
    pub fn new(handler: Arc<dyn SaveHandler>) -> Self {
        Self {
            primitives: PrimitiveCodec::new(handler.clone()),
            handler,
            repositories: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(build_handler(config)?))
    }

    /// Registers the repository for `T` under `key`.
    ///
    /// The first registration for a type wins: later calls return the
    /// existing repository and their `key` is ignored.
    pub fn register<T: Saveable>(&self, key: &str) -> Arc<Repository<T>> {
        let mut repositories = self.repositories.write();
        if let Some(existing) = repositories.get(&TypeId::of::<T>()) {
            if let Some(repo) = downcast::<T>(existing) {
                debug!(
                    entity = std::any::type_name::<T>(),
                    requested_key = key,
                    bound_key = repo.key(),
                    "Repository already registered"
                );
                return repo;
            }
        }

        let repo = Arc::new(Repository::<T>::new(self.handler.clone(), key));
        repositories.insert(TypeId::of::<T>(), repo.clone());
        info!(entity = std::any::type_name::<T>(), key, "Registered repository");
        repo
    }

    pub fn repository<T: Saveable>(&self) -> Option<Arc<Repository<T>>> {
        self.repositories
            .read()
            .get(&TypeId::of::<T>())
            .and_then(downcast::<T>)
    }

    pub fn is_registered<T: Saveable>(&self) -> bool {
        self.repositories.read().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.repositories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.read().is_empty()
    }

    /// Typed access to single-value settings through the shared handler.
    pub fn raw(&self) -> &PrimitiveCodec {
        &self.primitives
    }

    pub fn handler(&self) -> Arc<dyn SaveHandler> {
        self.handler.clone()
    }
}

fn downcast<T: Saveable>(entry: &Arc<dyn Any + Send + Sync>) -> Option<Arc<Repository<T>>> {
    entry.clone().downcast::<Repository<T>>().ok()
}
