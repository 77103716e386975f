//! Exit-code contract of the `locale-sync` binary

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{
    Value,
    json,
};
use tempfile::TempDir;

fn write_locale(dir: &Path, identifier: &str, tree: &Value) {
    std::fs::write(dir.join(format!("{identifier}.json")), tree.to_string()).unwrap();
}

fn workspace(locales: &[(&str, Value)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("locales")).unwrap();
    for (identifier, tree) in locales {
        write_locale(&dir.path().join("locales"), identifier, tree);
    }
    dir
}

fn out_of_sync() -> TempDir {
    workspace(&[
        ("en", json!({ "_meta": { "name": "English" }, "app": { "name": "Tool", "version": "Version {version}" } })),
        ("ja", json!({ "app": { "name": "ツール" } })),
    ])
}

fn locale_sync(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("locale-sync").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn in_sync_exits_zero() {
    let dir = workspace(&[
        ("en", json!({ "a": "A", "b": { "c": "C" } })),
        ("ja", json!({ "_meta": { "name": "Japanese" }, "a": "あ", "b": { "c": "し" } })),
    ]);

    locale_sync(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ ja: 2 keys, 100.00% coverage"));
}

#[test]
fn strict_fails_on_missing_keys() {
    let dir = out_of_sync();

    locale_sync(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing: app.version"));

    locale_sync(&dir).arg("--strict").assert().code(1);
}

#[test]
fn lenient_modes_exit_zero() {
    let dir = out_of_sync();

    locale_sync(&dir).arg("--warn-only").assert().success();
    locale_sync(&dir).arg("--allow-missing").assert().success();
}

#[test]
fn help_exits_zero() {
    let dir = TempDir::new().unwrap();

    locale_sync(&dir).arg("--help").assert().success().stdout(predicate::str::contains("--warn-only"));
    locale_sync(&dir).arg("-h").assert().success();
}

#[test]
fn missing_master_is_fatal_in_every_mode() {
    let dir = workspace(&[("ja", json!({ "a": "あ" }))]);

    locale_sync(&dir).assert().code(1).stderr(predicate::str::contains("en.json"));
    locale_sync(&dir).arg("--warn-only").assert().code(1);
}

#[test]
fn corrupt_locale_is_fatal() {
    let dir = workspace(&[("en", json!({ "a": "A" }))]);
    std::fs::write(dir.path().join("locales").join("fr.json"), "{ \"a\": ").unwrap();

    locale_sync(&dir)
        .arg("--allow-missing")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fr.json"));
}

#[test]
fn report_flag_writes_default_file() {
    let dir = out_of_sync();

    locale_sync(&dir).args(["--report", "--warn-only"]).assert().success();

    let report: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("locale-sync-report.json")).unwrap(),
    )
    .unwrap();

    assert_eq!(report["master"], json!({ "name": "en", "keyCount": 2 }));
    assert_eq!(report["summary"], json!({ "totalTargets": 1, "totalDiscrepancies": 1 }));
    assert_eq!(report["results"][0]["missing"], json!(["app.version"]));
    assert_eq!(report["results"][0]["coverage"], json!(50.0));
    assert!(report["timestamp"].is_string());
}

#[test]
fn flags_override_settings_file() {
    let dir = out_of_sync();
    std::fs::write(
        dir.path().join(".locale-sync.json"),
        r#"{ "localesDir": "missing", "fallbackLocale": "ja" }"#,
    )
    .unwrap();

    locale_sync(&dir)
        .args(["--locales-dir", "locales", "--master", "en"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Master locale: en (2 keys)"));
}

#[cfg(unix)]
#[test]
fn dangling_symlink_still_fails_strict_run() {
    let dir = out_of_sync();
    let locales = dir.path().join("locales");
    std::os::unix::fs::symlink(locales.join("gone.json"), locales.join("zz.json")).unwrap();

    locale_sync(&dir)
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing: app.version"));
}

#[test]
fn missing_locales_directory_is_fatal() {
    let dir = TempDir::new().unwrap();

    locale_sync(&dir).arg("--warn-only").assert().code(1);
}

#[test]
fn settings_file_found_from_subdirectory() {
    let dir = out_of_sync();
    std::fs::write(dir.path().join(".locale-sync.json"), r#"{ "localesDir": "locales" }"#).unwrap();
    let nested = dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    let mut cmd = Command::cargo_bin("locale-sync").unwrap();
    cmd.current_dir(&nested)
        .env_remove("RUST_LOG")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Master locale: en (2 keys)"));
}
