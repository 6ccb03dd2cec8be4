// src/storage/encrypted/mod.rs
mod cipher;
mod obfuscation;
mod store;

pub use cipher::AeadCipher;
pub use obfuscation::{Passthrough, XorCipher, EMBEDDED_SECRET};
pub use store::FileSaveHandler;

use super::errors::Result;

/// Transform applied to records and their keys before they touch disk.
///
/// `encode_key` must be a pure function of the key: the same key always
/// resolves to the same file. `open(seal(p))` must return `p`.
pub trait RecordCipher: Send + Sync {
    /// Derives a filename-safe token for a logical key.
    fn encode_key(&self, key: &str) -> String;

    fn seal(&self, payload: &str) -> Result<String>;

    fn open(&self, record: &str) -> Result<String>;
}
