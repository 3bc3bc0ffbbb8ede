//! Credential rotation and disaster recovery.
//!
//! Three flows, all ending in the engine's `rekey` primitive:
//!
//! - `change_credentials` — authenticated; new username + new password.
//! - `reset_password` — authenticated; username kept.
//! - `disaster_recovery` — unauthenticated escape hatch for a lost
//!   password: the data key is unwrapped through the recovery secret in
//!   `<name>.dat` instead of the password path, the records are
//!   decrypted, and a brand-new credential is installed over them.
//!
//! Disaster recovery deliberately lets anyone with local access to the
//! vault file pair replace the credentials and keep the records without
//! knowing the old password; the CLI gates it behind an explicit typed
//! acknowledgment. See DESIGN.md for the security-review flag.

use crate::crypto::kdf::KdfParams;
use crate::crypto::{self, keys, recovery as recovery_key};
use crate::errors::{Result, VaultError};
use crate::vault::format;
use crate::vault::lockout::LockoutPolicy;
use crate::vault::paths::VaultPaths;
use crate::vault::record::SecretRecord;
use crate::vault::Vault;

/// Replace username and password on an unlocked vault.
///
/// Re-keys the vault, re-stamps every record's `owner_username`, and
/// persists atomically. The old key material is discarded.
pub fn change_credentials(
    vault: &mut Vault,
    new_username: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<()> {
    if new_password != confirm_password {
        return Err(VaultError::ConfirmationMismatch);
    }
    vault.rekey(Some(new_username), new_password)
}

/// Replace only the password on an unlocked vault; username unchanged.
pub fn reset_password(
    vault: &mut Vault,
    new_password: &str,
    confirm_password: &str,
) -> Result<()> {
    if new_password != confirm_password {
        return Err(VaultError::ConfirmationMismatch);
    }
    vault.rekey(None, new_password)
}

/// Recover a vault whose password is lost.
///
/// Unwraps the data key through the recovery path (`<name>.dat`),
/// decrypts the existing records, installs the new credential, and
/// persists. Returns the resulting unlocked engine. The confirmation
/// prompt lives in the CLI; by the time this runs the operator has
/// already acknowledged that the old credential is being discarded.
pub fn disaster_recovery(
    paths: &VaultPaths,
    kdf_params: KdfParams,
    lockout_policy: LockoutPolicy,
    new_username: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<Vault> {
    if new_password != confirm_password {
        return Err(VaultError::ConfirmationMismatch);
    }

    let file = format::read_vault(&paths.vault)?;
    let recovery_secret = recovery_key::load_recovery_secret(&paths.recovery)?;

    let key = keys::unwrap_with_recovery(&recovery_secret, &file.recovery_wrapped_key)?;
    let plaintext = crypto::open(key.as_bytes(), &file.ciphertext)?;
    let records: Vec<SecretRecord> = serde_json::from_slice(&plaintext)
        .map_err(|e| VaultError::VaultCorrupt(format!("record collection: {e}")))?;

    let mut vault =
        Vault::resume_unlocked(paths.clone(), kdf_params, lockout_policy, file, key, records);

    vault.rekey(Some(new_username), new_password)?;
    Ok(vault)
}
