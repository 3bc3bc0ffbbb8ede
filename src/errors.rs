use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in TermVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Authentication & lockout ---
    //
    // Deliberately generic: the message never reveals whether the
    // username or the password was the wrong half.
    #[error("Wrong credentials")]
    WrongCredentials,

    #[error("Too many failed attempts — try again in {0} seconds")]
    LockedOut(u64),

    #[error("Vault is locked — unlock it before accessing records")]
    NotUnlocked,

    // --- Integrity ---
    #[error("Vault file is corrupt: {0}")]
    VaultCorrupt(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Record '{0}' not found")]
    RecordNotFound(String),

    // --- Recovery key errors ---
    #[error("Recovery key error: {0}")]
    RecoveryKeyError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

/// Convenience type alias for TermVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
