//! Integration tests for credential rotation and disaster recovery.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use termvault::crypto::kdf::KdfParams;
use termvault::errors::VaultError;
use termvault::recovery;
use termvault::vault::{LockoutPolicy, Vault, VaultPaths};

fn fast_params() -> KdfParams {
    KdfParams {
        memory_kib: 8192,
        iterations: 1,
        parallelism: 1,
    }
}

fn paths_in(dir: &Path) -> VaultPaths {
    VaultPaths::from_vault_file(&dir.join("vault.json"))
}

fn vault_in(dir: &Path) -> Vault {
    Vault::new(paths_in(dir), fast_params(), LockoutPolicy::default())
}

/// Helper: a vault owned by `olduser`/`oldpassword` with one record.
fn seeded_vault(dir: &Path) -> Vault {
    let mut vault = vault_in(dir);
    vault.create_new("olduser", "oldpassword").unwrap();
    vault
        .add_entry("Test Note", "Secret Note Content", &["test".to_string()])
        .unwrap();
    vault.save().unwrap();
    vault
}

// ---------------------------------------------------------------------------
// Full credential change (authenticated)
// ---------------------------------------------------------------------------

#[test]
fn change_credentials_preserves_records_and_restamps_owner() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());

    recovery::change_credentials(&mut vault, "newuser", "newpassword", "newpassword")
        .expect("rotate credentials");

    // The new credentials unlock a fresh engine.
    let mut vault2 = vault_in(dir.path());
    vault2.unlock(Some("newuser"), "newpassword").expect("unlock with new credentials");

    let records = vault2.get_entries(None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].payload, "Secret Note Content");
    assert_eq!(records[0].owner_username, "newuser");
}

#[test]
fn old_credentials_stop_working_after_rotation() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());

    recovery::change_credentials(&mut vault, "newuser", "newpassword", "newpassword").unwrap();

    let mut vault2 = vault_in(dir.path());
    let result = vault2.unlock(Some("olduser"), "oldpassword");
    assert!(matches!(result, Err(VaultError::WrongCredentials)));
}

#[test]
fn mismatched_confirmation_aborts_rotation() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());

    let result = recovery::change_credentials(&mut vault, "newuser", "newpassword", "different");
    assert!(matches!(result, Err(VaultError::ConfirmationMismatch)));

    // Nothing changed on disk.
    let mut vault2 = vault_in(dir.path());
    vault2.unlock(Some("olduser"), "oldpassword").expect("old credentials intact");
}

#[test]
fn rotation_replaces_the_recovery_secret() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());
    let before = fs::read(&paths_in(dir.path()).recovery).unwrap();

    recovery::change_credentials(&mut vault, "newuser", "newpassword", "newpassword").unwrap();

    let after = fs::read(&paths_in(dir.path()).recovery).unwrap();
    assert_ne!(before, after, "recovery secret must be regenerated");
}

// ---------------------------------------------------------------------------
// Password reset (username kept)
// ---------------------------------------------------------------------------

#[test]
fn reset_password_keeps_the_username() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());

    recovery::reset_password(&mut vault, "freshpassword", "freshpassword").unwrap();

    let mut vault2 = vault_in(dir.path());
    vault2.unlock(Some("olduser"), "freshpassword").expect("same username, new password");
    assert_eq!(vault2.get_entries(None).unwrap()[0].owner_username, "olduser");

    let mut vault3 = vault_in(dir.path());
    let old = vault3.unlock(Some("olduser"), "oldpassword");
    assert!(matches!(old, Err(VaultError::WrongCredentials)));
}

// ---------------------------------------------------------------------------
// Disaster recovery (no password)
// ---------------------------------------------------------------------------

#[test]
fn disaster_recovery_preserves_data_without_the_password() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());
    vault.lock();
    drop(vault);

    // Only the files on disk remain; the old password is never supplied.
    let recovered = recovery::disaster_recovery(
        &paths_in(dir.path()),
        fast_params(),
        LockoutPolicy::default(),
        "rescueuser",
        "rescuepassword",
        "rescuepassword",
    )
    .expect("disaster recovery");
    assert_eq!(recovered.entry_count().unwrap(), 1);

    let mut vault2 = vault_in(dir.path());
    vault2.unlock(Some("rescueuser"), "rescuepassword").expect("unlock after recovery");

    let records = vault2.get_entries(None).unwrap();
    assert_eq!(records[0].title, "Test Note");
    assert_eq!(records[0].payload, "Secret Note Content");
    assert_eq!(records[0].owner_username, "rescueuser");
}

#[test]
fn disaster_recovery_fails_without_the_recovery_file() {
    let dir = TempDir::new().unwrap();
    let vault = seeded_vault(dir.path());
    let paths = paths_in(dir.path());
    drop(vault);

    fs::remove_file(&paths.recovery).unwrap();

    let result = recovery::disaster_recovery(
        &paths,
        fast_params(),
        LockoutPolicy::default(),
        "rescueuser",
        "rescuepassword",
        "rescuepassword",
    );
    assert!(matches!(result, Err(VaultError::RecoveryKeyError(_))));
}

#[test]
fn disaster_recovery_clears_a_standing_lockout() {
    let dir = TempDir::new().unwrap();
    let mut vault = seeded_vault(dir.path());
    vault.lock();

    // Lock the vault out with repeated bad passwords.
    for _ in 0..5 {
        let _ = vault.unlock(Some("olduser"), "wrong");
    }
    drop(vault);

    recovery::disaster_recovery(
        &paths_in(dir.path()),
        fast_params(),
        LockoutPolicy::default(),
        "rescueuser",
        "rescuepassword",
        "rescuepassword",
    )
    .expect("recovery ignores the lockout");

    // The new credentials are usable immediately.
    let mut vault2 = vault_in(dir.path());
    vault2.unlock(Some("rescueuser"), "rescuepassword").expect("lockout cleared");
}
