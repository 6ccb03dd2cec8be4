// tests/common/mod.rs
#![allow(dead_code)]

use savestate::{FileSaveHandler, JsonSaveable, RepositoryRegistry, SaveHandler};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub level: u32,
    pub name: String,
    pub unlocked: Vec<String>,
}

impl JsonSaveable for PlayerProfile {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub master: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master: 0.8,
            muted: false,
        }
    }
}

impl JsonSaveable for AudioSettings {}

pub struct TestContext {
    pub registry: RepositoryRegistry,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn obfuscated() -> Self {
        let temp_dir = tempdir().unwrap();
        let registry = registry_at(temp_dir.path());
        Self { registry, temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A second registry over the same directory, as a new process would see it.
    pub fn reopen(&self) -> RepositoryRegistry {
        registry_at(self.path())
    }
}

pub fn registry_at(path: &Path) -> RepositoryRegistry {
    let handler: Arc<dyn SaveHandler> = Arc::new(FileSaveHandler::obfuscated(path));
    RepositoryRegistry::new(handler)
}

pub fn sample_profile() -> PlayerProfile {
    PlayerProfile {
        level: 5,
        name: "Ada".to_string(),
        unlocked: vec!["forest".to_string(), "caves".to_string()],
    }
}
