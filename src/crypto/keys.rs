//! The vault's two-layer key hierarchy.
//!
//! The record collection is encrypted with a random *data key* that is
//! never derived from the password. Instead the data key is stored
//! wrapped (encrypted) twice in the vault file:
//!
//! - under a wrap key derived from the Argon2id access key (normal
//!   password unlock), and
//! - under a wrap key derived from the recovery secret in the `.dat`
//!   file (the no-password disaster-recovery path).
//!
//! Both paths unwrap to the same data key, so recovery can re-key the
//! vault without ever learning the forgotten password. HKDF-SHA256
//! turns the access key into independent sub-keys: one becomes the
//! stored password verifier, one wraps the data key.

use hkdf::Hkdf;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::crypto::{self, KEY_LEN};
use crate::errors::{Result, VaultError};

/// Which unlock path produced a piece of key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPath {
    /// Derived through the master password.
    Password,
    /// Unwrapped with the recovery secret from the `.dat` file.
    Recovery,
}

/// The symmetric data key, zeroed on drop, tagged with its origin.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial {
    bytes: [u8; KEY_LEN],
    #[zeroize(skip)]
    path: KeyPath,
}

impl KeyMaterial {
    /// Generate a brand-new random data key (counts as the password path
    /// since it is always immediately wrapped under the access key).
    pub fn generate() -> Self {
        Self {
            bytes: crypto::random_key(),
            path: KeyPath::Password,
        }
    }

    /// Raw key bytes, for sealing and unsealing the record collection.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// The path this key material came through.
    pub fn path(&self) -> KeyPath {
        self.path
    }
}

/// Compute the stored password verifier from an access key.
///
/// A one-way HKDF sub-key: knowing the verifier does not reveal the
/// wrap key, so the vault file leaks nothing useful to an offline
/// guesser beyond the Argon2 work factor itself.
pub fn password_verifier(access_key: &[u8; KEY_LEN]) -> Result<[u8; KEY_LEN]> {
    hkdf_subkey(access_key, b"termvault:verifier")
}

/// Check a candidate access key against the stored verifier.
///
/// Constant-time comparison; the result does not depend on how many
/// bytes happened to match.
pub fn verify_password(access_key: &[u8; KEY_LEN], stored_verifier: &[u8]) -> Result<bool> {
    let candidate = password_verifier(access_key)?;
    Ok(candidate.ct_eq(stored_verifier).into())
}

/// Wrap the data key under the password-derived access key.
pub fn wrap_with_password(access_key: &[u8; KEY_LEN], data_key: &KeyMaterial) -> Result<Vec<u8>> {
    let mut wrap_key = hkdf_subkey(access_key, b"termvault:key-wrap")?;
    let wrapped = crypto::seal(&wrap_key, data_key.as_bytes());
    wrap_key.zeroize();
    wrapped
}

/// Unwrap the data key through the password path.
pub fn unwrap_with_password(access_key: &[u8; KEY_LEN], wrapped: &[u8]) -> Result<KeyMaterial> {
    let mut wrap_key = hkdf_subkey(access_key, b"termvault:key-wrap")?;
    let result = unwrap(&wrap_key, wrapped, KeyPath::Password);
    wrap_key.zeroize();
    result
}

/// Wrap the data key under the recovery secret from the `.dat` file.
pub fn wrap_with_recovery(recovery_secret: &[u8], data_key: &KeyMaterial) -> Result<Vec<u8>> {
    let mut wrap_key = hkdf_subkey_from_slice(recovery_secret, b"termvault:recovery-wrap")?;
    let wrapped = crypto::seal(&wrap_key, data_key.as_bytes());
    wrap_key.zeroize();
    wrapped
}

/// Unwrap the data key through the recovery path.
pub fn unwrap_with_recovery(recovery_secret: &[u8], wrapped: &[u8]) -> Result<KeyMaterial> {
    let mut wrap_key = hkdf_subkey_from_slice(recovery_secret, b"termvault:recovery-wrap")?;
    let result = unwrap(&wrap_key, wrapped, KeyPath::Recovery);
    wrap_key.zeroize();
    result
}

fn unwrap(wrap_key: &[u8; KEY_LEN], wrapped: &[u8], path: KeyPath) -> Result<KeyMaterial> {
    let mut plain = crypto::open(wrap_key, wrapped)?;

    if plain.len() != KEY_LEN {
        plain.zeroize();
        return Err(VaultError::VaultCorrupt(
            "wrapped data key has the wrong length".into(),
        ));
    }

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&plain);
    plain.zeroize();

    Ok(KeyMaterial { bytes, path })
}

/// HKDF-SHA256 expand with the given context string.
///
/// Extract is skipped: the input keying material already has full
/// entropy (Argon2id output or a random recovery secret).
fn hkdf_subkey(ikm: &[u8; KEY_LEN], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    hkdf_subkey_from_slice(ikm, info)
}

fn hkdf_subkey_from_slice(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}
