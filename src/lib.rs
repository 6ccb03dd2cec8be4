//! Typed save-data persistence.
//!
//! Entities are registered once per type with a [`RepositoryRegistry`],
//! cached in memory and written as single-file records through a pluggable
//! [`SaveHandler`]. Single-value settings go through [`PrimitiveCodec`].
//!
//! ```no_run
//! use savestate::{utils::config::Config, JsonSaveable, RepositoryRegistry};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Profile {
//!     level: u32,
//! }
//!
//! impl JsonSaveable for Profile {}
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new()?;
//! let registry = RepositoryRegistry::from_config(&config.storage)?;
//!
//! let profiles = registry.register::<Profile>("profile");
//! profiles.save(Profile { level: 5 })?;
//! assert_eq!(profiles.load()?.level, 5);
//! # Ok(())
//! # }
//! ```

pub mod storage;
pub mod utils;

pub use storage::{
    build_handler, AeadCipher, FileBackend, FileSaveHandler, JsonSaveable, Passthrough,
    PrimitiveCodec, RecordCipher, Repository, RepositoryRegistry, SaveHandler, Saveable,
    StorageError, XorCipher,
};
pub use utils::{
    config::{Config, HandlerKind, LoggingConfig, StorageConfig},
    error::ServiceError,
};
