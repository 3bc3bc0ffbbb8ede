//! One module per subcommand.

pub mod add;
pub mod export;
pub mod get;
pub mod init;
pub mod report;
pub mod reset_credentials;
pub mod reset_password;
pub mod show_plain;
pub mod user;
