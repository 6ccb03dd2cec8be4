// src/storage/encrypted/store.rs
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, warn};

use super::{AeadCipher, Passthrough, RecordCipher, XorCipher};
use crate::storage::{
    errors::{Result, StorageError},
    file::FileBackend,
    handler::SaveHandler,
};

/// Longest filename accepted by common filesystems (ext4, APFS, NTFS).
pub const MAX_FILE_NAME_LEN: usize = 255;

/// A [`SaveHandler`] that stores one file per key, with both the key and the
/// payload passed through a [`RecordCipher`].
///
/// Keys whose encoded filename would exceed [`MAX_FILE_NAME_LEN`] bytes are
/// rejected with [`StorageError::InvalidKey`]. With the XOR and passthrough
/// ciphers that is roughly 190 bytes of UTF-8 key.
pub struct FileSaveHandler<C: RecordCipher> {
    backend: FileBackend,
    cipher: C,
}

impl FileSaveHandler<Passthrough> {
    pub fn plain<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::with_cipher(data_dir, Passthrough)
    }
}

impl FileSaveHandler<XorCipher> {
    /// Obfuscated handler using the secret compiled into the crate.
    pub fn obfuscated<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::with_cipher(data_dir, XorCipher::embedded())
    }
}

impl FileSaveHandler<AeadCipher> {
    pub fn sealed<P: AsRef<Path>>(data_dir: P, passphrase: &str) -> Result<Self> {
        Ok(Self::with_cipher(
            data_dir,
            AeadCipher::new(passphrase.as_bytes())?,
        ))
    }
}

impl<C: RecordCipher> FileSaveHandler<C> {
    pub fn with_cipher<P: AsRef<Path>>(data_dir: P, cipher: C) -> Self {
        Self {
            backend: FileBackend::new(data_dir),
            cipher,
        }
    }

    pub fn backend(&self) -> &FileBackend {
        &self.backend
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    fn file_name(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key must not be empty".into()));
        }
        let name = self.cipher.encode_key(key);
        if name.len() > MAX_FILE_NAME_LEN {
            return Err(StorageError::InvalidKey(format!(
                "key encodes to {} bytes, the limit is {MAX_FILE_NAME_LEN}",
                name.len()
            )));
        }
        Ok(name)
    }

    fn open_record(&self, key: &str, record: Option<String>) -> Result<String> {
        match record {
            Some(record) if !record.is_empty() => self.cipher.open(&record).map_err(|e| {
                warn!(key, error = %e, "Stored record could not be opened");
                e
            }),
            _ => {
                debug!(key, "No data stored for key");
                Ok(String::new())
            }
        }
    }
}

#[async_trait]
impl<C: RecordCipher> SaveHandler for FileSaveHandler<C> {
    fn put(&self, key: &str, data: &str) -> Result<()> {
        let name = self.file_name(key)?;
        let record = self.cipher.seal(data)?;
        self.backend.write(&name, &record)
    }

    fn get(&self, key: &str) -> Result<String> {
        let name = self.file_name(key)?;
        let record = self.backend.read(&name)?;
        self.open_record(key, record)
    }

    fn exists(&self, key: &str) -> bool {
        match self.file_name(key) {
            Ok(name) => self.backend.exists(&name),
            Err(_) => false,
        }
    }

    async fn put_async(&self, key: &str, data: &str) -> Result<()> {
        let name = self.file_name(key)?;
        let record = self.cipher.seal(data)?;
        self.backend.write_async(&name, &record).await
    }

    async fn get_async(&self, key: &str) -> Result<String> {
        let name = self.file_name(key)?;
        let record = self.backend.read_async(&name).await?;
        self.open_record(key, record)
    }

    async fn exists_async(&self, key: &str) -> bool {
        match self.file_name(key) {
            Ok(name) => self.backend.exists_async(&name).await,
            Err(_) => false,
        }
    }
}
