//! `termvault init` — create a new vault.

use std::fs;

use crate::cli::{audit_log, output, prompt_new_password, prompt_username, vault_paths, Cli};
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let paths = vault_paths(cli, settings);

    if paths.vault.exists() {
        output::tip("Use `termvault add` to store records in the existing vault.");
        return Err(VaultError::VaultAlreadyExists(paths.vault.clone()));
    }

    // Make sure the vault directory exists before the engine writes.
    if let Some(parent) = paths.vault.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            output::info(&format!("Created vault directory: {}", parent.display()));
        }
    }

    let username = prompt_username()?;
    let password = prompt_new_password()?;

    let mut vault = Vault::new(paths, settings.kdf_params(), settings.lockout_policy());
    vault.create_new(&username, &password)?;

    audit_log(settings).log("init", Some("vault created"));

    output::success(&format!(
        "Vault created for '{username}' at {}",
        vault.paths().vault.display()
    ));
    output::tip("Run `termvault add --title <title>` to store your first record.");
    output::tip("Keep the .dat recovery file safe — it is the only way back in if you forget the password.");

    Ok(())
}
