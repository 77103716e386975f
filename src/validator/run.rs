//! Directory-level validation: load the master and every target, then compare.

use std::path::Path;

use serde_json::Value;

use super::compare::{
    ValidationOutcome,
    validate_all_with,
};
use crate::config::LocaleFileMatcher;
use crate::loader::{
    LoadError,
    LocaleLoader,
};
use crate::tree::METADATA_PREFIX;

/// Outcome of validating one locales directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRun {
    /// Master locale identifier
    pub master: String,
    pub outcome: ValidationOutcome,
}

impl ValidationRun {
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.outcome.is_synchronized()
    }
}

/// Validate every locale file in `dir` against `master`.
///
/// # Errors
/// - The master has no source (`LoadError::FallbackMissing`)
/// - The directory cannot be enumerated (`LoadError::ListDirectory`)
/// - The master or any target cannot be read or parsed; the run stops at the
///   first such file
pub fn validate_directory(
    dir: &Path,
    master: &str,
    matcher: LocaleFileMatcher,
) -> Result<ValidationRun, LoadError> {
    validate_directory_with(dir, master, matcher, METADATA_PREFIX)
}

/// Same as [`validate_directory`] with a custom metadata prefix.
///
/// # Errors
/// See [`validate_directory`].
pub fn validate_directory_with(
    dir: &Path,
    master: &str,
    matcher: LocaleFileMatcher,
    reserved: char,
) -> Result<ValidationRun, LoadError> {
    let mut loader = LocaleLoader::new(dir, master, matcher);
    let sources = loader.scan_sources()?;

    match sources.get(master) {
        Some(path) => loader.load_path(master, path)?,
        None => {
            loader.load(master)?;
        }
    }

    let targets: Vec<&str> =
        sources.keys().map(String::as_str).filter(|identifier| *identifier != master).collect();
    tracing::debug!(master, ?targets, "Validating locales");

    for (identifier, path) in &sources {
        loader.load_path(identifier, path)?;
    }

    let tree = |identifier: &str| {
        loader.get(identifier).ok_or_else(|| LoadError::FallbackMissing {
            identifier: identifier.to_string(),
            path: loader.source_path(identifier),
        })
    };

    let master_tree = tree(master)?;
    let target_trees = targets
        .iter()
        .map(|identifier| tree(*identifier).map(|value| (*identifier, value)))
        .collect::<Result<Vec<(&str, &Value)>, _>>()?;

    let outcome = validate_all_with(master_tree, &target_trees, reserved);

    Ok(ValidationRun { master: master.to_string(), outcome })
}
