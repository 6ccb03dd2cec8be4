// src/utils/config.rs
use config::{Config as ConfigLib, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::error::{Result, ServiceError};

pub const APP_QUALIFIER: &str = "com";
pub const APP_ORG: &str = "savestate";
pub const APP_NAME: &str = "savestate";
pub const ENV_PREFIX: &str = "SAVESTATE";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Records and keys stored as readable text.
    Plain,
    /// XOR obfuscation with the embedded secret.
    Obfuscated,
    /// AES-256-GCM keyed by `passphrase`.
    Sealed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub handler: HandlerKind,
    pub passphrase: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Loads defaults, then `config/default` and `config/local` if present,
    /// then `SAVESTATE_*` environment variables (`__` separates sections).
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();

        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::finish(config)
    }

    /// Loads defaults overridden by a single configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::from(path.as_ref()))
            .build()?;

        Self::finish(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = ConfigLib::builder()
            .set_default(
                "storage.data_dir",
                default_data_dir().to_string_lossy().into_owned(),
            )?
            .set_default("storage.handler", "obfuscated")?
            .set_default("logging.level", "info")?;

        Ok(builder)
    }

    fn finish(config: ConfigLib) -> Result<Self> {
        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ServiceError::Config("storage.data_dir must be set".into()));
        }

        if self.storage.handler == HandlerKind::Sealed
            && self.storage.passphrase.as_deref().map_or(true, str::is_empty)
        {
            return Err(ServiceError::Config(
                "storage.passphrase must be set when storage.handler is \"sealed\"".into(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ServiceError::Config("logging.level must be set".into()));
        }

        Ok(())
    }
}

/// Platform data directory for save files, or `./save-data` when the
/// platform does not provide one.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("save-data"))
}

impl From<ConfigError> for ServiceError {
    fn from(error: ConfigError) -> Self {
        ServiceError::Config(error.to_string())
    }
}
