//! The Vault Engine: `Uninitialized → Locked ⇄ Unlocked`.
//!
//! An explicitly constructed object — paths, KDF parameters, and
//! lockout policy are injected, so tests run isolated instances. The
//! engine owns the in-memory record collection and the data key while
//! unlocked; `lock()` drops both (the key zeroes itself).

use chrono::Utc;

use crate::crypto::kdf::{self, KdfParams};
use crate::crypto::{self, keys, recovery};
use crate::errors::{Result, VaultError};
use crate::vault::format::{self, VaultFile, FORMAT_VERSION};
use crate::vault::lockout::{Attempt, LockoutPolicy};
use crate::vault::paths::VaultPaths;
use crate::vault::record::SecretRecord;

/// Everything held in memory only while the vault is unlocked.
struct Session {
    key: keys::KeyMaterial,
    file: VaultFile,
    records: Vec<SecretRecord>,
}

/// The vault engine handle.
pub struct Vault {
    paths: VaultPaths,
    kdf_params: KdfParams,
    lockout_policy: LockoutPolicy,
    session: Option<Session>,
}

impl Vault {
    /// Construct a locked engine for the given vault.
    pub fn new(paths: VaultPaths, kdf_params: KdfParams, lockout_policy: LockoutPolicy) -> Self {
        Self {
            paths,
            kdf_params,
            lockout_policy,
            session: None,
        }
    }

    /// The resolved file triad this engine operates on.
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn is_locked(&self) -> bool {
        self.session.is_none()
    }

    /// The current credential's username. `Unlocked` only.
    pub fn username(&self) -> Result<&str> {
        Ok(&self.unlocked()?.file.username)
    }

    // ------------------------------------------------------------------
    // State transitions
    // ------------------------------------------------------------------

    /// Create a brand-new vault: `Uninitialized → Unlocked`.
    ///
    /// Generates a fresh salt, data key, and recovery secret; writes
    /// `<name>.json` and `<name>.dat`. The engine comes back unlocked
    /// with an empty record collection.
    pub fn create_new(&mut self, username: &str, password: &str) -> Result<()> {
        if self.paths.vault.exists() {
            return Err(VaultError::VaultAlreadyExists(self.paths.vault.clone()));
        }

        let salt = crypto::generate_salt();
        let access_key = kdf::derive_access_key(password.as_bytes(), &salt, &self.kdf_params)?;
        let verifier = keys::password_verifier(&access_key)?;

        let data_key = keys::KeyMaterial::generate();
        let recovery_secret = recovery::generate_recovery_secret(&self.paths.recovery)?;

        let file = VaultFile {
            format_version: FORMAT_VERSION,
            username: username.to_string(),
            salt: salt.to_vec(),
            kdf: self.kdf_params,
            verifier: verifier.to_vec(),
            wrapped_key: keys::wrap_with_password(&access_key, &data_key)?,
            recovery_wrapped_key: keys::wrap_with_recovery(&recovery_secret, &data_key)?,
            created_at: Utc::now(),
            lockout: Default::default(),
            ciphertext: Vec::new(),
        };

        self.session = Some(Session {
            key: data_key,
            file,
            records: Vec::new(),
        });

        self.save()
    }

    /// Unlock the vault: `Locked → Unlocked`.
    ///
    /// The lockout check runs first; a blocked attempt fails without
    /// spending a key derivation. A wrong username and a wrong password
    /// are indistinguishable in the returned error.
    pub fn unlock(&mut self, username: Option<&str>, password: &str) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        let mut file = format::read_vault(&self.paths.vault)?;
        let now = Utc::now();

        if let Attempt::Blocked { remaining_secs } = file.lockout.check(now) {
            return Err(VaultError::LockedOut(remaining_secs));
        }

        let access_key = kdf::derive_access_key(password.as_bytes(), &file.salt, &file.kdf)?;

        // Evaluate both checks before branching so a username mismatch
        // costs the same as a verifier mismatch.
        let password_ok = keys::verify_password(&access_key, &file.verifier)?;
        let username_ok = username.map_or(true, |u| u == file.username);

        if !(password_ok && username_ok) {
            file.lockout.record_failure(now, &self.lockout_policy);
            format::write_vault(&self.paths.vault, &file)?;
            return Err(VaultError::WrongCredentials);
        }

        // The verifier passed, so any failure past this point is
        // corruption, not a wrong password.
        let key = keys::unwrap_with_password(&access_key, &file.wrapped_key)?;
        let plaintext = crypto::open(key.as_bytes(), &file.ciphertext)?;
        let records: Vec<SecretRecord> = serde_json::from_slice(&plaintext)
            .map_err(|e| VaultError::VaultCorrupt(format!("record collection: {e}")))?;

        if file.lockout.consecutive_failures > 0 || file.lockout.locked_until.is_some() {
            file.lockout.record_success();
            format::write_vault(&self.paths.vault, &file)?;
        }

        self.session = Some(Session { key, file, records });
        Ok(())
    }

    /// Lock the vault, discarding key material and plaintext records.
    pub fn lock(&mut self) {
        // KeyMaterial zeroes itself on drop.
        self.session = None;
    }

    // ------------------------------------------------------------------
    // Record operations (Unlocked only)
    // ------------------------------------------------------------------

    /// Append a new record; returns its assigned id.
    ///
    /// In-memory only until `save()`.
    pub fn add_entry(&mut self, title: &str, payload: &str, tags: &[String]) -> Result<String> {
        let session = self.unlocked_mut()?;
        let record = SecretRecord::new(title, payload, tags, &session.file.username);
        let id = record.id.clone();
        session.records.push(record);
        Ok(id)
    }

    /// Snapshot of records in insertion order, optionally filtered to
    /// those carrying the given tag (exact, case-sensitive).
    pub fn get_entries(&self, tag_filter: Option<&str>) -> Result<Vec<&SecretRecord>> {
        let session = self.unlocked()?;
        Ok(session
            .records
            .iter()
            .filter(|r| tag_filter.map_or(true, |tag| r.has_tag(tag)))
            .collect())
    }

    /// Remove the record with the given id.
    pub fn delete_entry(&mut self, id: &str) -> Result<()> {
        let session = self.unlocked_mut()?;
        let before = session.records.len();
        session.records.retain(|r| r.id != id);

        if session.records.len() == before {
            return Err(VaultError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Number of records currently loaded.
    pub fn entry_count(&self) -> Result<usize> {
        Ok(self.unlocked()?.records.len())
    }

    /// When the vault was created.
    pub fn created_at(&self) -> Result<chrono::DateTime<Utc>> {
        Ok(self.unlocked()?.file.created_at)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize and re-encrypt the record collection, then atomically
    /// replace `<name>.json`. The sole authority for what becomes
    /// durable; never emits any plaintext artifact.
    pub fn save(&mut self) -> Result<()> {
        let vault_path = self.paths.vault.clone();
        let session = self.unlocked_mut()?;

        let plaintext = serde_json::to_vec(&session.records)
            .map_err(|e| VaultError::SerializationError(format!("record collection: {e}")))?;

        session.file.ciphertext = crypto::seal(session.key.as_bytes(), &plaintext)?;
        format::write_vault(&vault_path, &session.file)
    }

    /// Replace the authentication material wholesale: new salt, new
    /// verifier, new data key, new recovery secret. Every record is
    /// re-stamped with the effective username and the result persisted.
    ///
    /// `new_username: None` keeps the current username (password reset).
    /// Driven by the recovery & rotation protocol, never by record ops.
    pub fn rekey(&mut self, new_username: Option<&str>, new_password: &str) -> Result<()> {
        let kdf_params = self.kdf_params;
        let recovery_path = self.paths.recovery.clone();
        let session = self.unlocked_mut()?;

        let username = new_username
            .unwrap_or(&session.file.username)
            .to_string();

        let salt = crypto::generate_salt();
        let access_key = kdf::derive_access_key(new_password.as_bytes(), &salt, &kdf_params)?;
        let verifier = keys::password_verifier(&access_key)?;

        let data_key = keys::KeyMaterial::generate();
        let recovery_secret = recovery::generate_recovery_secret(&recovery_path)?;

        for record in &mut session.records {
            record.owner_username = username.clone();
        }

        session.file.username = username;
        session.file.salt = salt.to_vec();
        session.file.kdf = kdf_params;
        session.file.verifier = verifier.to_vec();
        session.file.wrapped_key = keys::wrap_with_password(&access_key, &data_key)?;
        session.file.recovery_wrapped_key = keys::wrap_with_recovery(&recovery_secret, &data_key)?;
        session.file.lockout = Default::default();
        session.key = data_key;

        self.save()
    }

    /// Rebuild an unlocked engine from parts the disaster-recovery
    /// flow decrypted through the recovery path.
    pub(crate) fn resume_unlocked(
        paths: VaultPaths,
        kdf_params: KdfParams,
        lockout_policy: LockoutPolicy,
        file: VaultFile,
        key: keys::KeyMaterial,
        records: Vec<SecretRecord>,
    ) -> Self {
        Self {
            paths,
            kdf_params,
            lockout_policy,
            session: Some(Session { key, file, records }),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn unlocked(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(VaultError::NotUnlocked)
    }

    fn unlocked_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or(VaultError::NotUnlocked)
    }
}
