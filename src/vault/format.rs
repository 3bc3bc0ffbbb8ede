//! The on-disk vault file and atomic writes.
//!
//! `<name>.json` is a single JSON document:
//!
//! - credential metadata: username, salt, KDF params, password verifier
//! - the data key wrapped twice (password path and recovery path)
//! - plaintext lockout state (must be readable before unlock)
//! - the AES-256-GCM ciphertext of the record collection
//!
//! Binary fields serialize as base64 strings. Tampering with the
//! ciphertext is caught by the GCM auth tag on unlock; tampering with
//! the plaintext header at worst denies service to the local operator,
//! who could delete the file anyway.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::KdfParams;
use crate::errors::{Result, VaultError};
use crate::vault::lockout::LockoutState;

/// Current vault file format version.
pub const FORMAT_VERSION: u8 = 1;

/// The complete durable state of one vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultFile {
    /// Format version, checked on read.
    pub format_version: u8,

    /// The master credential's username.
    pub username: String,

    /// Argon2id salt (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// KDF parameters used at creation, replayed on every unlock.
    pub kdf: KdfParams,

    /// Password verifier: an HKDF sub-key of the access key (base64).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub verifier: Vec<u8>,

    /// Data key wrapped under the password-derived wrap key (base64).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub wrapped_key: Vec<u8>,

    /// Data key wrapped under the recovery secret (base64).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub recovery_wrapped_key: Vec<u8>,

    /// When the vault was first created.
    pub created_at: DateTime<Utc>,

    /// Lockout state, persisted so failures survive restarts.
    #[serde(default)]
    pub lockout: LockoutState,

    /// Encrypted record collection (base64 of nonce || ciphertext).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,
}

/// Read and parse a vault file.
///
/// A missing file is `VaultNotFound`; anything unparseable or from an
/// unknown format version is `VaultCorrupt`.
pub fn read_vault(path: &Path) -> Result<VaultFile> {
    if !path.exists() {
        return Err(VaultError::VaultNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;

    let file: VaultFile = serde_json::from_slice(&data)
        .map_err(|e| VaultError::VaultCorrupt(format!("vault JSON: {e}")))?;

    if file.format_version != FORMAT_VERSION {
        return Err(VaultError::VaultCorrupt(format!(
            "unsupported format version {}, expected {FORMAT_VERSION}",
            file.format_version
        )));
    }

    Ok(file)
}

/// Write a vault file to disk **atomically**.
///
/// Serializes to a temp file in the same directory, then renames over
/// the target. A crash mid-write leaves the previous valid file
/// untouched; readers never see a half-written vault.
pub fn write_vault(path: &Path, file: &VaultFile) -> Result<()> {
    let json = serde_json::to_vec_pretty(file)
        .map_err(|e| VaultError::SerializationError(format!("vault file: {e}")))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &json)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
