//! The file triad derived from the configured vault path.
//!
//! Everything the vault touches on disk shares one base name:
//!
//! - `<name>.json` — the encrypted vault file (the only durable truth)
//! - `<name>.dat` — the recovery secret
//! - `<name>.csv` — plaintext export, written only by `export`
//! - `<name>_plain.json` — plaintext dump, written only by `show-plain`
//!
//! Deriving them once here replaces ad hoc string concatenation at the
//! call sites; every component that touches disk takes a `VaultPaths`.

use std::path::{Path, PathBuf};

/// Resolved paths for one vault.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// The encrypted vault file.
    pub vault: PathBuf,
    /// The recovery secret file.
    pub recovery: PathBuf,
    /// The CSV export target.
    pub csv: PathBuf,
    /// The full plaintext dump target.
    pub plain: PathBuf,
}

impl VaultPaths {
    /// Derive the triad from the configured vault file path.
    ///
    /// The base name is the vault path without its extension, so
    /// `secrets/vault.json` yields `secrets/vault.dat`,
    /// `secrets/vault.csv`, and `secrets/vault_plain.json`.
    pub fn from_vault_file(vault_file: &Path) -> Self {
        let parent = vault_file.parent().unwrap_or(Path::new(""));
        let stem = vault_file
            .file_stem()
            .map_or_else(|| "vault".to_string(), |s| s.to_string_lossy().into_owned());

        Self {
            vault: vault_file.to_path_buf(),
            recovery: parent.join(format!("{stem}.dat")),
            csv: parent.join(format!("{stem}.csv")),
            plain: parent.join(format!("{stem}_plain.json")),
        }
    }
}
