/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI
/// invocation to output, using `assert_cmd` and `tempfile` for isolated
/// test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG_FILENAME: &str = "solution-pruner.config.yml";
const ASSEMBLY: &str = "aaaaaaaa-0000-4000-8000-000000000001";

// ============================================================================
// Helper Functions
// ============================================================================

/// Copy the plugin fixture snapshot into the test directory.
fn copy_snapshot(dir: &Path) -> PathBuf {
    let target = dir.join("org.json");
    fs::copy(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/plugin-org.json"),
        &target,
    )
    .unwrap();
    target
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

// ============================================================================
// Auto-discovery
// ============================================================================

#[test]
fn test_discovered_config_supplies_snapshot_and_format() {
    let dir = TempDir::new().unwrap();
    copy_snapshot(dir.path());
    write_config(
        &dir.path().join(CONFIG_FILENAME),
        "snapshot: org.json\nformat: json\n",
    );

    let output = cargo_bin_cmd!("solution-pruner")
        .current_dir(dir.path())
        .args(["components", "--solution", "Core"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["components"].as_array().unwrap().len(), 5);
}

#[test]
fn test_cli_format_overrides_config() {
    let dir = TempDir::new().unwrap();
    copy_snapshot(dir.path());
    write_config(
        &dir.path().join(CONFIG_FILENAME),
        "snapshot: org.json\nformat: json\n",
    );

    cargo_bin_cmd!("solution-pruner")
        .current_dir(dir.path())
        .args(["components", "--solution", "Core", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Solution Core: 5 component(s)"));
}

#[test]
fn test_config_unmanaged_only_applies_to_delete() {
    let dir = TempDir::new().unwrap();
    let snapshot = copy_snapshot(dir.path());
    let managed = fs::read_to_string(&snapshot)
        .unwrap()
        .replace(
            r#""name": "Contoso.Plugins", "ismanaged": false"#,
            r#""name": "Contoso.Plugins", "ismanaged": true"#,
        );
    fs::write(&snapshot, managed).unwrap();
    write_config(
        &dir.path().join(CONFIG_FILENAME),
        "snapshot: org.json\nunmanaged_only: true\n",
    );

    cargo_bin_cmd!("solution-pruner")
        .current_dir(dir.path())
        .args(["delete", "--kind", "PluginAssembly", "--id", ASSEMBLY])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2 of 3 component(s) removed"))
        .stdout(predicate::str::contains("skipped (managed)"));
}

// ============================================================================
// Explicit --config and validation
// ============================================================================

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let snapshot = copy_snapshot(dir.path());
    let config_path = dir.path().join("custom.yml");
    write_config(
        &config_path,
        &format!("snapshot: {}\nformat: json\n", snapshot.display()),
    );

    let output = cargo_bin_cmd!("solution-pruner")
        .arg("--config")
        .arg(&config_path)
        .args(["for-delete", "--kind", "PluginAssembly", "--id", ASSEMBLY])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["components"].as_array().unwrap().len(), 3);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    cargo_bin_cmd!("solution-pruner")
        .args(["--config", "/nonexistent/config.yml"])
        .args(["components", "--solution", "Core"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_invalid_config_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(&dir.path().join(CONFIG_FILENAME), "max_depth: 0\n");

    cargo_bin_cmd!("solution-pruner")
        .current_dir(dir.path())
        .args(["components", "--solution", "Core"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("max_depth must be at least 1"));
}

#[test]
fn test_unknown_config_field_warns() {
    let dir = TempDir::new().unwrap();
    copy_snapshot(dir.path());
    write_config(
        &dir.path().join(CONFIG_FILENAME),
        "snapshot: org.json\ncheck_cve: true\n",
    );

    cargo_bin_cmd!("solution-pruner")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["components", "--solution", "Core"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown config field 'check_cve'"));
}
