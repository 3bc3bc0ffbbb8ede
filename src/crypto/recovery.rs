//! The recovery secret stored in `<name>.dat`.
//!
//! A 32-byte random file written once at vault creation (and rewritten
//! on every re-key). It protects the recovery-path wrap of the data
//! key, which is what makes the no-password disaster-recovery flow
//! possible. It is never consulted during a normal password unlock.

use std::fs;
use std::path::Path;

use rand::RngCore;

use crate::errors::{Result, VaultError};

/// Exact length of the recovery secret in bytes (256 bits).
const RECOVERY_LEN: usize = 32;

/// Generate a fresh recovery secret and write it to `path`.
///
/// Overwrites any previous secret: re-keying invalidates the old one
/// by design. Written with owner-only permissions on Unix. Returns the
/// raw bytes so the caller can wrap the data key immediately.
pub fn generate_recovery_secret(path: &Path) -> Result<Vec<u8>> {
    let mut secret = vec![0u8; RECOVERY_LEN];
    rand::rng().fill_bytes(&mut secret);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::RecoveryKeyError(format!("cannot create recovery key directory: {e}"))
            })?;
        }
    }

    fs::write(path, &secret)
        .map_err(|e| VaultError::RecoveryKeyError(format!("failed to write recovery key: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            VaultError::RecoveryKeyError(format!("failed to set recovery key permissions: {e}"))
        })?;
    }

    Ok(secret)
}

/// Load the recovery secret from disk and validate its length.
pub fn load_recovery_secret(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(VaultError::RecoveryKeyError(format!(
            "recovery key not found at {}",
            path.display()
        )));
    }

    let data = fs::read(path)
        .map_err(|e| VaultError::RecoveryKeyError(format!("failed to read recovery key: {e}")))?;

    if data.len() != RECOVERY_LEN {
        return Err(VaultError::RecoveryKeyError(format!(
            "recovery key must be exactly {RECOVERY_LEN} bytes, got {}",
            data.len()
        )));
    }

    Ok(data)
}
