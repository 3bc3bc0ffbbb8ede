use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::KdfParams;
use crate::errors::{Result, VaultError};
use crate::vault::lockout::LockoutPolicy;

/// Configuration, loaded from `.termvault.toml` in the working
/// directory.
///
/// Every field has a sensible default so the tool works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the encrypted vault file.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Path to the operation log file.
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Failed unlocks tolerated before the cooldown starts (default: 3).
    #[serde(default = "default_lockout_threshold")]
    pub lockout_threshold: u32,

    /// First cooldown length in seconds (default: 30).
    #[serde(default = "default_lockout_base_delay_secs")]
    pub lockout_base_delay_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.json".to_string()
}

fn default_log_file() -> String {
    "vault.log".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_lockout_threshold() -> u32 {
    3
}

fn default_lockout_base_delay_secs() -> u64 {
    30
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            log_file: default_log_file(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            lockout_threshold: default_lockout_threshold(),
            lockout_base_delay_secs: default_lockout_base_delay_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".termvault.toml";

    /// Load settings from `<dir>/.termvault.toml`.
    ///
    /// If the file does not exist, defaults are returned. If it exists
    /// but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// The configured vault file path.
    pub fn vault_file_path(&self) -> PathBuf {
        PathBuf::from(&self.vault_file)
    }

    /// The configured log file path.
    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(&self.log_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Convert the lockout settings into a policy.
    pub fn lockout_policy(&self) -> LockoutPolicy {
        LockoutPolicy {
            threshold: self.lockout_threshold,
            base_delay_secs: self.lockout_base_delay_secs,
            ..LockoutPolicy::default()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
