// src/storage/mod.rs
pub mod encrypted;
pub mod errors;
pub mod file;
pub mod handler;
pub mod primitive;
pub mod registry;
pub mod repository;

pub use encrypted::{AeadCipher, FileSaveHandler, Passthrough, RecordCipher, XorCipher};
pub use errors::{Result, StorageError};
pub use file::FileBackend;
pub use handler::SaveHandler;
pub use primitive::PrimitiveCodec;
pub use registry::RepositoryRegistry;
pub use repository::{JsonSaveable, Repository, Saveable};

use std::sync::Arc;
use tracing::info;

use crate::utils::config::{HandlerKind, StorageConfig};

/// Builds the save handler selected by the storage configuration.
pub fn build_handler(config: &StorageConfig) -> Result<Arc<dyn SaveHandler>> {
    info!(
        data_dir = %config.data_dir.display(),
        handler = ?config.handler,
        "Initializing save handler"
    );

    let handler: Arc<dyn SaveHandler> = match config.handler {
        HandlerKind::Plain => Arc::new(FileSaveHandler::plain(&config.data_dir)),
        HandlerKind::Obfuscated => Arc::new(FileSaveHandler::obfuscated(&config.data_dir)),
        HandlerKind::Sealed => {
            let passphrase = config.passphrase.as_deref().unwrap_or_default();
            Arc::new(FileSaveHandler::sealed(&config.data_dir, passphrase)?)
        }
    };

    Ok(handler)
}
