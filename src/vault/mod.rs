//! The vault: record model, on-disk format, lockout state, and the
//! engine that ties them together.

pub mod artifacts;
pub mod engine;
pub mod format;
pub mod lockout;
pub mod paths;
pub mod record;

pub use engine::Vault;
pub use lockout::{Attempt, LockoutPolicy, LockoutState};
pub use paths::VaultPaths;
pub use record::SecretRecord;
