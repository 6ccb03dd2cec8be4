// src/storage/encrypted/obfuscation.rs
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use super::RecordCipher;
use crate::storage::errors::{Result, StorageError};

/// Secret baked into every build of the obfuscated handler.
///
/// It is shared by all installations, so anyone holding a binary can undo
/// the transform. Use [`super::AeadCipher`] when stored data must stay
/// confidential.
pub const EMBEDDED_SECRET: &str = ";V2)9.;&SqZB]{p4";

/// Repeating-key XOR over the characters of a string.
///
/// This is obfuscation, not encryption: it keeps casual users from editing
/// save files by hand and offers no protection against anyone who looks.
#[derive(Debug, Clone)]
pub struct XorCipher {
    secret: Vec<u8>,
}

impl XorCipher {
    /// The secret must be non-empty ASCII.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(StorageError::InvalidSecret("secret must not be empty".into()));
        }
        if !secret.is_ascii() {
            return Err(StorageError::InvalidSecret(
                "secret must contain only ASCII characters".into(),
            ));
        }

        Ok(Self {
            secret: secret.as_bytes().to_vec(),
        })
    }

    pub fn embedded() -> Self {
        Self {
            secret: EMBEDDED_SECRET.as_bytes().to_vec(),
        }
    }

    /// XORs each character with the secret, cycling the secret over the
    /// input. Applying it twice with the same secret restores the input.
    pub fn transform(&self, text: &str) -> String {
        text.chars()
            .zip(self.secret.iter().cycle())
            .map(|(c, &k)| xor_char(c, k))
            .collect()
    }

    /// Transforms the key, then encodes its UTF-8 bytes as unpadded URL-safe
    /// base64 so the result is usable as a filename.
    pub fn encode_key_for_path(&self, key: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.transform(key).as_bytes())
    }
}

impl Default for XorCipher {
    fn default() -> Self {
        Self::embedded()
    }
}

// ASCII key bytes only flip the low seven bits, so the result is always a
// valid scalar value.
fn xor_char(c: char, k: u8) -> char {
    char::from_u32(c as u32 ^ u32::from(k)).unwrap_or(c)
}

impl RecordCipher for XorCipher {
    fn encode_key(&self, key: &str) -> String {
        self.encode_key_for_path(key)
    }

    fn seal(&self, payload: &str) -> Result<String> {
        Ok(self.transform(payload))
    }

    fn open(&self, record: &str) -> Result<String> {
        Ok(self.transform(record))
    }
}

/// Leaves payloads untouched. Keys are still base64 encoded so any logical
/// key maps to a valid filename.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl RecordCipher for Passthrough {
    fn encode_key(&self, key: &str) -> String {
        URL_SAFE_NO_PAD.encode(key.as_bytes())
    }

    fn seal(&self, payload: &str) -> Result<String> {
        Ok(payload.to_string())
    }

    fn open(&self, record: &str) -> Result<String> {
        Ok(record.to_string())
    }
}
