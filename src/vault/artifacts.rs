//! Plaintext artifact lifecycle: the CSV export, the full plaintext
//! dump, and the startup purge that keeps dumps from outliving a
//! session.
//!
//! `save()` never produces any of these; each is written only by the
//! command explicitly asked for it.

use std::fs;
use std::path::PathBuf;

use crate::errors::{Result, VaultError};
use crate::vault::paths::VaultPaths;
use crate::vault::record::SecretRecord;

/// Delete any stale `<name>_plain.json` from a previous session.
///
/// Idempotent; invoked exactly once by the entry point before any
/// command dispatch, so a forgotten plaintext dump cannot linger on
/// disk past the run that created it.
pub fn purge_stale_plaintext(paths: &VaultPaths) -> Result<()> {
    if paths.plain.exists() {
        fs::remove_file(&paths.plain)?;
    }
    Ok(())
}

/// Write the plaintext CSV export to `<name>.csv`.
///
/// Columns: `id,title,payload,tags,owner_username,created_at`, one row
/// per record in insertion order. Tags are comma-joined inside their
/// cell (the csv writer quotes as needed). Returns the path written.
pub fn export_csv(paths: &VaultPaths, records: &[SecretRecord]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(&paths.csv)
        .map_err(|e| VaultError::CommandFailed(format!("cannot create CSV: {e}")))?;

    writer
        .write_record(["id", "title", "payload", "tags", "owner_username", "created_at"])
        .map_err(|e| VaultError::CommandFailed(format!("CSV header: {e}")))?;

    for record in records {
        let tags = record.tags.join(",");
        let created_at = record.created_at.to_rfc3339();
        writer
            .write_record([
                record.id.as_str(),
                record.title.as_str(),
                record.payload.as_str(),
                tags.as_str(),
                record.owner_username.as_str(),
                created_at.as_str(),
            ])
            .map_err(|e| VaultError::CommandFailed(format!("CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| VaultError::CommandFailed(format!("CSV flush: {e}")))?;

    Ok(paths.csv.clone())
}

/// Write the full plaintext dump to `<name>_plain.json`.
///
/// Pretty-printed JSON array of every record. The next process run
/// deletes it unconditionally (see `purge_stale_plaintext`).
pub fn write_plain_dump(paths: &VaultPaths, records: &[SecretRecord]) -> Result<PathBuf> {
    let json = serde_json::to_vec_pretty(records)
        .map_err(|e| VaultError::SerializationError(format!("plaintext dump: {e}")))?;

    fs::write(&paths.plain, json)?;
    Ok(paths.plain.clone())
}
