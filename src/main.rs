use clap::Parser;
use termvault::cli::{output, vault_paths, Cli, Commands};
use termvault::config::Settings;
use termvault::vault::{artifacts, VaultPaths};

fn main() {
    let settings = match load_settings() {
        Ok(s) => s,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Plaintext hygiene runs on every startup, before any command —
    // including `--help`, which clap handles inside `parse()` below.
    let configured = VaultPaths::from_vault_file(&settings.vault_file_path());
    purge(&configured);

    let cli = Cli::parse();

    // A --vault override names a different file triad; purge that one
    // too before the command touches it.
    if cli.vault.is_some() {
        purge(&vault_paths(&cli, &settings));
    }

    let result = match cli.command {
        Commands::Init => termvault::cli::commands::init::execute(&cli, &settings),
        Commands::Add { ref title, ref tags } => {
            termvault::cli::commands::add::execute(&cli, &settings, title, tags.as_deref())
        }
        Commands::Get {
            ref search,
            ref tag,
        } => termvault::cli::commands::get::execute(&cli, &settings, search.as_deref(), tag.as_deref()),
        Commands::Report => termvault::cli::commands::report::execute(&cli, &settings),
        Commands::User => termvault::cli::commands::user::execute(&cli, &settings),
        Commands::ResetPassword => {
            termvault::cli::commands::reset_password::execute(&cli, &settings)
        }
        Commands::ResetCredentials => {
            termvault::cli::commands::reset_credentials::execute(&cli, &settings)
        }
        Commands::Export => termvault::cli::commands::export::execute(&cli, &settings),
        Commands::ShowPlain => termvault::cli::commands::show_plain::execute(&cli, &settings),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn load_settings() -> termvault::errors::Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

fn purge(paths: &VaultPaths) {
    if let Err(e) = artifacts::purge_stale_plaintext(paths) {
        output::warning(&format!("could not remove stale plaintext dump: {e}"));
    }
}
