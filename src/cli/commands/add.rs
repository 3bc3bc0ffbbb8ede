//! `termvault add` — store a new secret record.

use crate::cli::{audit_log, authenticate, output, parse_tags, Cli};
use crate::config::Settings;
use crate::errors::{Result, VaultError};

/// Execute the `add` command.
pub fn execute(cli: &Cli, settings: &Settings, title: &str, tags: Option<&str>) -> Result<()> {
    let mut vault = authenticate(cli, settings)?;

    let payload = prompt_payload()?;
    let tags = parse_tags(tags);

    vault.add_entry(title, &payload, &tags)?;
    vault.save()?;

    audit_log(settings).log("add", Some(&format!("record '{title}'")));

    output::success(&format!("Record '{title}' stored."));
    Ok(())
}

/// Read the record content, from `TERMVAULT_PAYLOAD` or a prompt.
fn prompt_payload() -> Result<String> {
    if let Ok(payload) = std::env::var("TERMVAULT_PAYLOAD") {
        if !payload.is_empty() {
            return Ok(payload);
        }
    }

    dialoguer::Input::new()
        .with_prompt("Content")
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("content prompt: {e}")))
}
