//! `termvault show-plain` — dump all records to a plaintext JSON file.
//!
//! The dump is transient by contract: the next process run deletes it
//! before executing any command.

use crate::cli::{audit_log, authenticate, output, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::vault::{artifacts, SecretRecord};

/// Execute the `show-plain` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let vault = authenticate(cli, settings)?;

    let records: Vec<SecretRecord> = vault.get_entries(None)?.into_iter().cloned().collect();
    let path = artifacts::write_plain_dump(vault.paths(), &records)?;

    audit_log(settings).log("show-plain", Some(&format!("{} records", records.len())));

    output::success(&format!(
        "Wrote {} record(s) in plaintext to {}",
        records.len(),
        path.display()
    ));
    output::warning("This file is plaintext and will be deleted the next time termvault runs.");

    Ok(())
}
