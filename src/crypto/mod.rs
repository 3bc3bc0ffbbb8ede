//! Cryptographic primitives: AES-256-GCM sealing and random material.
//!
//! `seal` generates a fresh random 12-byte nonce per call and prepends
//! it to the ciphertext, so callers store a single blob:
//!
//! ```text
//! [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//! ```
//!
//! `open` splits the nonce back out and verifies the auth tag; a wrong
//! key or a flipped bit fails closed rather than yielding garbage.

pub mod kdf;
pub mod keys;
pub mod recovery;

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use rand::RngCore;

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Length of symmetric keys and salts (256 bits).
pub const KEY_LEN: usize = 32;

/// Encrypt `plaintext` under a 32-byte `key`, returning nonce || ciphertext.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob produced by `seal`.
///
/// Returns `VaultCorrupt` on any authentication or framing failure so
/// callers never see silently wrong plaintext.
pub fn open(key: &[u8; KEY_LEN], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_LEN {
        return Err(VaultError::VaultCorrupt(
            "ciphertext shorter than its nonce".into(),
        ));
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| VaultError::VaultCorrupt("invalid key length".into()))?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::VaultCorrupt("authentication failed".into()))
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; KEY_LEN] {
    random_bytes()
}

/// Generate a fresh random 32-byte symmetric key.
pub fn random_key() -> [u8; KEY_LEN] {
    random_bytes()
}

fn random_bytes() -> [u8; KEY_LEN] {
    let mut buf = [0u8; KEY_LEN];
    rand::rng().fill_bytes(&mut buf);
    buf
}
