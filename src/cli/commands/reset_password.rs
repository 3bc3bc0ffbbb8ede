//! `termvault reset-password` — change the password, username kept.

use crate::cli::{audit_log, authenticate, output, prompt_new_password, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::recovery;

/// Execute the `reset-password` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let mut vault = authenticate(cli, settings)?;

    let new_password = prompt_new_password()?;

    recovery::reset_password(&mut vault, &new_password, &new_password)?;

    audit_log(settings).log("reset-password", None);

    output::success("Password changed.");
    output::tip("The old password no longer unlocks the vault.");

    Ok(())
}
