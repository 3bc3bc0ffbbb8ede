//! `termvault reset-credentials` — disaster recovery for a lost
//! password.
//!
//! No authentication: the data key is recovered through the `.dat`
//! file, so the operator must first type a literal `yes` acknowledging
//! that the current credentials are being thrown away.

use crate::cli::{
    audit_log, confirm_recovery, output, prompt_new_password, prompt_new_username, vault_paths, Cli,
};
use crate::config::Settings;
use crate::errors::Result;
use crate::recovery;

/// Execute the `reset-credentials` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    output::warning("Disaster recovery replaces the vault credentials WITHOUT the old password.");
    confirm_recovery()?;

    let new_username = prompt_new_username()?;
    let new_password = prompt_new_password()?;

    let paths = vault_paths(cli, settings);
    let vault = recovery::disaster_recovery(
        &paths,
        settings.kdf_params(),
        settings.lockout_policy(),
        &new_username,
        &new_password,
        &new_password,
    )?;

    audit_log(settings).log("reset-credentials", Some("vault recovered"));

    output::success(&format!(
        "Vault recovered — {} record(s) preserved, now owned by '{new_username}'.",
        vault.entry_count()?
    ));

    Ok(())
}
