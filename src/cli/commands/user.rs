//! `termvault user` — change username and password.

use crate::cli::{audit_log, authenticate, output, prompt_new_password, prompt_new_username, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::recovery;

/// Execute the `user` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let mut vault = authenticate(cli, settings)?;

    let new_username = prompt_new_username()?;
    let new_password = prompt_new_password()?;

    recovery::change_credentials(&mut vault, &new_username, &new_password, &new_password)?;

    audit_log(settings).log("user", Some("credentials changed"));

    output::success(&format!("Credentials changed — the vault now belongs to '{new_username}'."));
    output::tip("The old password no longer unlocks the vault.");

    Ok(())
}
