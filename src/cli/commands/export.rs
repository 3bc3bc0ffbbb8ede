//! `termvault export` — write all records to a plaintext CSV.
//!
//! The only command that produces `<name>.csv`; `save()` never does.

use crate::cli::{audit_log, authenticate, output, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::vault::{artifacts, SecretRecord};

/// Execute the `export` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let vault = authenticate(cli, settings)?;

    let records: Vec<SecretRecord> = vault.get_entries(None)?.into_iter().cloned().collect();
    let path = artifacts::export_csv(vault.paths(), &records)?;

    audit_log(settings).log("export", Some(&format!("{} records", records.len())));

    output::success(&format!(
        "Exported {} record(s) to {}",
        records.len(),
        path.display()
    ));
    output::warning("The CSV is plaintext — delete it when you are done.");

    Ok(())
}
