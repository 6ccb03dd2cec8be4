// src/storage/file.rs
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use super::errors::Result;

/// Whole-file storage rooted at a persistent data directory.
///
/// Every record lives in its own file directly under `root`. Writes always
/// overwrite the full file and are not atomic; a concurrent reader may see a
/// partially written record.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path_for(name);

        let result = create_parent_dirs(&path).and_then(|_| std::fs::write(&path, content));
        if let Err(e) = result {
            error!(path = %path.display(), error = %e, "Failed to write record");
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = content.len(), "Record written");
        Ok(())
    }

    pub async fn write_async(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path_for(name);

        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                error!(path = %path.display(), error = %e, "Failed to create record directory");
                return Err(e.into());
            }
        }

        if let Err(e) = tokio::fs::write(&path, content).await {
            error!(path = %path.display(), error = %e, "Failed to write record");
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = content.len(), "Record written");
        Ok(())
    }

    /// Reads a record. `Ok(None)` means the file does not exist; any other
    /// failure is logged and returned.
    pub fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.path_for(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) => missing_or_fault(&path, e),
        }
    }

    pub async fn read_async(&self, name: &str) -> Result<Option<String>> {
        let path = self.path_for(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) => missing_or_fault(&path, e),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    pub async fn exists_async(&self, name: &str) -> bool {
        match tokio::fs::metadata(self.path_for(name)).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }
}

fn missing_or_fault(path: &Path, e: std::io::Error) -> Result<Option<String>> {
    if e.kind() == std::io::ErrorKind::NotFound {
        debug!(path = %path.display(), "No record on disk");
        return Ok(None);
    }

    error!(path = %path.display(), error = %e, "Failed to read record");
    Err(e.into())
}

fn create_parent_dirs(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}
