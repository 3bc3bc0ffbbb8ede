//! `termvault get` — list records, optionally filtered.
//!
//! `--tag` is an exact, case-sensitive tag match done by the engine;
//! `--search` is a case-insensitive substring match over title and
//! content done here at the presentation layer.

use crate::cli::{authenticate, output, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(
    cli: &Cli,
    settings: &Settings,
    search: Option<&str>,
    tag: Option<&str>,
) -> Result<()> {
    let vault = authenticate(cli, settings)?;

    let mut records = vault.get_entries(tag)?;

    if let Some(term) = search {
        let needle = term.to_lowercase();
        records.retain(|r| {
            r.title.to_lowercase().contains(&needle) || r.payload.to_lowercase().contains(&needle)
        });
    }

    output::info(&format!("Found {} record(s)", records.len()));
    output::print_records_table(&records);

    Ok(())
}
