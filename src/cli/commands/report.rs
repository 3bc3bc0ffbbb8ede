//! `termvault report` — summary of the unlocked vault.

use std::collections::BTreeMap;

use comfy_table::{ContentArrangement, Table};

use crate::cli::{authenticate, output, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `report` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let vault = authenticate(cli, settings)?;

    let records = vault.get_entries(None)?;

    output::info(&format!("Owner: {}", vault.username()?));
    output::info(&format!(
        "Created: {}",
        vault.created_at()?.format("%Y-%m-%d %H:%M:%S")
    ));
    output::info(&format!("Records: {}", records.len()));

    // Tag histogram, sorted by tag for deterministic output.
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &records {
        for tag in &record.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    if !counts.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Tag", "Records"]);
        for (tag, count) in counts {
            table.add_row(vec![tag.to_string(), count.to_string()]);
        }
        println!("{table}");
    }

    Ok(())
}
