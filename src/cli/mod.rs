//! CLI module — Clap argument parser, prompt helpers, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::audit::AuditLog;
use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::{Vault, VaultPaths};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// TermVault CLI: encrypted vault for personal secret notes.
#[derive(Parser)]
#[command(
    name = "termvault",
    about = "Encrypted terminal vault for personal secrets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file path (overrides the config file)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

/// All available subcommands. Each process run executes exactly one.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault
    Init,

    /// Add a secret record (content is prompted)
    Add {
        /// Record title
        #[arg(long)]
        title: String,

        /// Comma-separated tags (e.g. work,email)
        #[arg(long)]
        tags: Option<String>,
    },

    /// List records, optionally filtered
    Get {
        /// Case-insensitive substring match over title and content
        #[arg(long)]
        search: Option<String>,

        /// Exact tag filter
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show a summary of the vault
    Report,

    /// Change username and password
    User,

    /// Change the password, keeping the username
    ResetPassword,

    /// Recover a vault with a lost password (discards old credentials)
    ResetCredentials,

    /// Export all records to a plaintext CSV
    Export,

    /// Dump all records to a plaintext JSON file (removed on next run)
    ShowPlain,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault file path: `--vault` flag beats the config file.
pub fn vault_paths(cli: &Cli, settings: &Settings) -> VaultPaths {
    let vault_file = cli
        .vault
        .as_ref()
        .map_or_else(|| settings.vault_file_path(), PathBuf::from);
    VaultPaths::from_vault_file(&vault_file)
}

/// Construct a locked engine from the CLI arguments and settings.
pub fn build_vault(cli: &Cli, settings: &Settings) -> Vault {
    Vault::new(
        vault_paths(cli, settings),
        settings.kdf_params(),
        settings.lockout_policy(),
    )
}

/// Prompt for credentials and unlock the vault.
pub fn authenticate(cli: &Cli, settings: &Settings) -> Result<Vault> {
    let mut vault = build_vault(cli, settings);
    let username = prompt_username()?;
    let password = prompt_password()?;
    vault.unlock(Some(&username), &password)?;
    Ok(vault)
}

/// The operation log at the configured path.
pub fn audit_log(settings: &Settings) -> AuditLog {
    AuditLog::open(&settings.log_file_path())
}

/// Get the username, from `TERMVAULT_USERNAME` or an interactive prompt.
pub fn prompt_username() -> Result<String> {
    if let Ok(user) = std::env::var("TERMVAULT_USERNAME") {
        if !user.is_empty() {
            return Ok(user);
        }
    }

    dialoguer::Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("username prompt: {e}")))
}

/// Get the vault password, from `TERMVAULT_PASSWORD` (scripted use) or
/// a masked interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on
/// drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("TERMVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Get the replacement username during rotation/recovery.
pub fn prompt_new_username() -> Result<String> {
    if let Ok(user) = std::env::var("TERMVAULT_NEW_USERNAME") {
        if !user.is_empty() {
            return Ok(user);
        }
    }

    dialoguer::Input::new()
        .with_prompt("New username")
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("username prompt: {e}")))
}

/// Prompt for a new password, entered twice.
///
/// `TERMVAULT_NEW_PASSWORD` skips the prompt (and the confirmation)
/// for scripted use. Mismatched entries are `ConfirmationMismatch`,
/// and a minimum length is enforced either way.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("TERMVAULT_NEW_PASSWORD") {
        if !pw.is_empty() {
            check_password_length(&pw)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    let password = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("New password")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
    );
    let confirm = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Confirm new password")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
    );

    if *password != *confirm {
        return Err(VaultError::ConfirmationMismatch);
    }
    check_password_length(&password)?;

    Ok(password)
}

fn check_password_length(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(VaultError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Require the literal `yes` acknowledgment before disaster recovery.
///
/// `TERMVAULT_CONFIRM_RECOVERY=yes` answers it for scripted use.
/// Anything other than an exact `yes` cancels the operation.
pub fn confirm_recovery() -> Result<()> {
    let answer = match std::env::var("TERMVAULT_CONFIRM_RECOVERY") {
        Ok(v) if !v.is_empty() => v,
        _ => dialoguer::Input::new()
            .with_prompt("This discards the current credentials. Type 'yes' to continue")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| VaultError::CommandFailed(format!("confirmation prompt: {e}")))?,
    };

    if answer == "yes" {
        Ok(())
    } else {
        Err(VaultError::UserCancelled)
    }
}

/// Split a comma-separated tag list, trimming whitespace and dropping
/// empty fragments.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map_or_else(Vec::new, |s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
}
