// src/storage/handler.rs
use async_trait::async_trait;

use super::errors::Result;

/// Key/value string store backing repositories and primitive settings.
///
/// Blocking and async forms behave identically. A key that was never
/// written reads back as an empty string.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaveHandler: Send + Sync {
    fn put(&self, key: &str, data: &str) -> Result<()>;

    fn get(&self, key: &str) -> Result<String>;

    fn exists(&self, key: &str) -> bool;

    async fn put_async(&self, key: &str, data: &str) -> Result<()>;

    async fn get_async(&self, key: &str) -> Result<String>;

    async fn exists_async(&self, key: &str) -> bool;
}
