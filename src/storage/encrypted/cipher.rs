// src/storage/encrypted/cipher.rs
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use rand::{rngs::OsRng, RngCore};
use sha3::{Digest, Sha3_256};

use super::RecordCipher;
use crate::storage::errors::{Result, StorageError};

const NONCE_LEN: usize = 12;

/// Authenticated encryption for records (AES-256-GCM).
///
/// The cipher key is the SHA3-256 digest of a passphrase. Each record is
/// `base64(nonce || ciphertext)` with a fresh random nonce. Filenames are a
/// keyed SHA3-256 digest of the logical key, so they reveal nothing about it.
pub struct AeadCipher {
    cipher: Aes256Gcm,
    key_salt: [u8; 32],
}

impl AeadCipher {
    pub fn new(passphrase: &[u8]) -> Result<Self> {
        if passphrase.is_empty() {
            return Err(StorageError::InvalidSecret(
                "passphrase must not be empty".into(),
            ));
        }

        let hash = Sha3_256::digest(passphrase);
        let cipher_key = Key::<Aes256Gcm>::from_slice(hash.as_slice());
        let cipher = Aes256Gcm::new(cipher_key);

        let key_salt = Sha3_256::new()
            .chain_update(b"savestate.key-salt")
            .chain_update(passphrase)
            .finalize()
            .into();

        Ok(Self { cipher, key_salt })
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, data)
            .map_err(|e| StorageError::EncryptionError(e.to_string()))?;

        let mut result = Vec::with_capacity(nonce_bytes.len() + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    pub fn decrypt(&self, encrypted_data: &[u8]) -> Result<Vec<u8>> {
        if encrypted_data.len() < NONCE_LEN {
            return Err(StorageError::DecryptionError(
                "Invalid encrypted data length".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = encrypted_data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| StorageError::DecryptionError(e.to_string()))
    }
}

impl RecordCipher for AeadCipher {
    fn encode_key(&self, key: &str) -> String {
        let digest = Sha3_256::new()
            .chain_update(self.key_salt)
            .chain_update(key.as_bytes())
            .finalize();
        URL_SAFE_NO_PAD.encode(digest)
    }

    fn seal(&self, payload: &str) -> Result<String> {
        let encrypted = self.encrypt(payload.as_bytes())?;
        Ok(STANDARD.encode(encrypted))
    }

    fn open(&self, record: &str) -> Result<String> {
        let encrypted = STANDARD
            .decode(record.trim())
            .map_err(|e| StorageError::DecryptionError(e.to_string()))?;
        let decrypted = self.decrypt(&encrypted)?;

        String::from_utf8(decrypted).map_err(|e| StorageError::InvalidFormat(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_and_open() {
        let cipher = AeadCipher::new(b"correct horse battery staple").unwrap();

        let record = cipher.seal("{\"level\":5}").unwrap();
        assert!(!record.contains("level"));
        assert_eq!(cipher.open(&record).unwrap(), "{\"level\":5}");
    }

    #[test]
    fn test_nonce_is_fresh_per_record() {
        let cipher = AeadCipher::new(b"passphrase").unwrap();

        let first = cipher.seal("same payload").unwrap();
        let second = cipher.seal("same payload").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let writer = AeadCipher::new(b"passphrase").unwrap();
        let reader = AeadCipher::new(b"another passphrase").unwrap();

        let record = writer.seal("secret").unwrap();
        assert!(matches!(
            reader.open(&record),
            Err(StorageError::DecryptionError(_))
        ));
    }

    #[test]
    fn test_tampered_record_fails() {
        let cipher = AeadCipher::new(b"passphrase").unwrap();
        let mut bytes = STANDARD.decode(cipher.seal("secret").unwrap()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        assert!(cipher.open(&STANDARD.encode(bytes)).is_err());
        assert!(matches!(
            cipher.decrypt(&[0u8; 4]),
            Err(StorageError::DecryptionError(_))
        ));
    }

    #[test]
    fn test_encoded_key() {
        let cipher = AeadCipher::new(b"passphrase").unwrap();
        let again = AeadCipher::new(b"passphrase").unwrap();

        let token = cipher.encode_key("profile");
        assert_eq!(token, again.encode_key("profile"));
        assert_ne!(token, cipher.encode_key("settings"));
        assert!(!token.contains(['+', '/', '=']));
    }

    #[test]
    fn test_rejects_empty_passphrase() {
        assert!(matches!(
            AeadCipher::new(b""),
            Err(StorageError::InvalidSecret(_))
        ));
    }
}
