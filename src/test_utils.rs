//! Test helpers shared by unit test modules.
#![cfg(test)]
#![allow(clippy::expect_used)]

use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use crate::config::LocaleFileMatcher;

/// Matcher for the default `*.json` pattern.
pub(crate) fn json_matcher() -> LocaleFileMatcher {
    LocaleFileMatcher::from_pattern("*.json").expect("valid pattern")
}

/// Write `tree` as `<dir>/<identifier>.json`.
pub(crate) fn write_locale(dir: &Path, identifier: &str, tree: &Value) {
    let content = serde_json::to_string_pretty(tree).expect("serializable tree");
    write_raw_locale(dir, identifier, &content);
}

/// Write raw text as `<dir>/<identifier>.json`, e.g. to produce a corrupt file.
pub(crate) fn write_raw_locale(dir: &Path, identifier: &str, content: &str) {
    std::fs::write(dir.join(format!("{identifier}.json")), content)
        .expect("writable temp directory");
}

/// Create a temporary locales directory holding the given trees.
pub(crate) fn locales_dir(locales: &[(&str, Value)]) -> TempDir {
    let dir = TempDir::new().expect("temp directory");
    for (identifier, tree) in locales {
        write_locale(dir.path(), identifier, tree);
    }
    dir
}
