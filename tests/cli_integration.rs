//! Integration tests for the TermVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. The
//! interactive prompts all honor `TERMVAULT_*` environment variables,
//! so every flow runs non-interactively. Each test works inside its
//! own temp dir with a `.termvault.toml` pinning Argon2 to the fastest
//! legal parameters.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the termvault binary.
fn termvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("termvault").expect("binary should exist")
}

/// Write a config with the fastest Argon2 parameters the KDF accepts.
fn write_fast_config(dir: &TempDir) {
    let config = r#"
vault_file = "vault.json"
log_file = "vault.log"
argon2_memory_kib = 8192
argon2_iterations = 1
argon2_parallelism = 1
"#;
    fs::write(dir.path().join(".termvault.toml"), config).expect("write config");
}

/// Helper: run `init` in the given dir with scripted credentials.
fn init_vault(dir: &TempDir) {
    termvault()
        .arg("init")
        .current_dir(dir.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_NEW_PASSWORD", "masterpass")
        .assert()
        .success();
}

/// Helper: run `add` with the usual test record.
fn add_test_note(dir: &TempDir) {
    termvault()
        .args(["add", "--title", "Test Note", "--tags", "test"])
        .current_dir(dir.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .env("TERMVAULT_PAYLOAD", "Secret Note Content")
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Structural checks
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_all_subcommands() {
    termvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Encrypted terminal vault for personal secrets",
        ))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("user"))
        .stdout(predicate::str::contains("reset-password"))
        .stdout(predicate::str::contains("reset-credentials"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("show-plain"));
}

#[test]
fn version_flag_shows_version() {
    termvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("termvault"));
}

#[test]
fn no_args_shows_usage() {
    termvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_the_vault_file_pair() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    init_vault(&tmp);

    assert!(tmp.path().join("vault.json").exists());
    assert!(tmp.path().join("vault.dat").exists());
    // No plaintext artifacts on creation.
    assert!(!tmp.path().join("vault.csv").exists());
    assert!(!tmp.path().join("vault_plain.json").exists());
}

#[test]
fn vault_flag_overrides_the_configured_path() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    termvault()
        .args(["init", "--vault", "deep/custom.json"])
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_NEW_PASSWORD", "masterpass")
        .assert()
        .success();

    assert!(tmp.path().join("deep/custom.json").exists());
    assert!(tmp.path().join("deep/custom.dat").exists());
    assert!(!tmp.path().join("vault.json").exists());
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);

    termvault()
        .arg("init")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_NEW_PASSWORD", "masterpass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_passwords() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);

    termvault()
        .arg("init")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_NEW_PASSWORD", "short")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));

    assert!(!tmp.path().join("vault.json").exists());
}

// ---------------------------------------------------------------------------
// add / get
// ---------------------------------------------------------------------------

#[test]
fn add_then_get_shows_the_record() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);
    add_test_note(&tmp);

    termvault()
        .arg("get")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Note"))
        .stdout(predicate::str::contains("Secret Note Content"));
}

#[test]
fn get_search_is_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);
    add_test_note(&tmp);

    termvault()
        .args(["get", "--search", "secret note"])
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Note"));

    termvault()
        .args(["get", "--search", "no such content"])
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Note").not());
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);

    termvault()
        .arg("get")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "not-the-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong credentials"));
}

// ---------------------------------------------------------------------------
// export / show-plain and the startup purge
// ---------------------------------------------------------------------------

#[test]
fn export_writes_a_readable_csv() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);
    add_test_note(&tmp);

    termvault()
        .arg("export")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .success();

    let csv = fs::read_to_string(tmp.path().join("vault.csv")).expect("read csv");
    assert!(csv.contains("Test Note"));
    assert!(csv.contains("Secret Note Content"));
}

#[test]
fn plain_dump_is_purged_on_the_next_run() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);
    add_test_note(&tmp);

    termvault()
        .arg("show-plain")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .success();
    assert!(tmp.path().join("vault_plain.json").exists());

    // Any subsequent invocation removes the dump before running.
    termvault()
        .arg("report")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .success();
    assert!(!tmp.path().join("vault_plain.json").exists());
}

// ---------------------------------------------------------------------------
// Rotation and recovery, end to end
// ---------------------------------------------------------------------------

#[test]
fn user_command_rotates_both_credentials() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);
    add_test_note(&tmp);

    termvault()
        .arg("user")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .env("TERMVAULT_NEW_USERNAME", "newadmin")
        .env("TERMVAULT_NEW_PASSWORD", "brand-new-pass")
        .assert()
        .success();

    // Old credentials are dead; the new ones see the same record.
    termvault()
        .arg("get")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "admin")
        .env("TERMVAULT_PASSWORD", "masterpass")
        .assert()
        .failure();

    termvault()
        .arg("get")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "newadmin")
        .env("TERMVAULT_PASSWORD", "brand-new-pass")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Note"));
}

#[test]
fn reset_credentials_recovers_without_the_password() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);
    add_test_note(&tmp);

    // No TERMVAULT_PASSWORD anywhere: recovery goes through vault.dat.
    termvault()
        .arg("reset-credentials")
        .current_dir(tmp.path())
        .env("TERMVAULT_CONFIRM_RECOVERY", "yes")
        .env("TERMVAULT_NEW_USERNAME", "rescued")
        .env("TERMVAULT_NEW_PASSWORD", "rescue-pass")
        .assert()
        .success();

    termvault()
        .arg("get")
        .current_dir(tmp.path())
        .env("TERMVAULT_USERNAME", "rescued")
        .env("TERMVAULT_PASSWORD", "rescue-pass")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret Note Content"));
}

#[test]
fn reset_credentials_requires_the_literal_yes() {
    let tmp = TempDir::new().unwrap();
    write_fast_config(&tmp);
    init_vault(&tmp);

    termvault()
        .arg("reset-credentials")
        .current_dir(tmp.path())
        .env("TERMVAULT_CONFIRM_RECOVERY", "y")
        .env("TERMVAULT_NEW_USERNAME", "rescued")
        .env("TERMVAULT_NEW_PASSWORD", "rescue-pass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cancelled"));
}
