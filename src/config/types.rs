use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::tree::{
    KEY_SEPARATOR,
    METADATA_PREFIX,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "filePattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings shared by the translator and the `locale-sync` validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Directory holding one `<identifier>.json` file per locale.
    pub locales_dir: PathBuf,

    /// Explicit active locale. When unset, the locale is detected from the
    /// process environment.
    pub locale: Option<String>,

    /// Locale used when a key is missing. Doubles as the validator's master.
    pub fallback_locale: String,

    /// Glob matched against file names inside `localesDir`.
    pub file_pattern: String,

    /// Keys starting with this character are metadata, not translations.
    pub metadata_prefix: char,

    /// Where `--report` writes the JSON summary.
    pub report_file: PathBuf,
}

impl LocaleSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Identifier containing a path or key separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "localesDir",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.fallback_locale.is_empty() {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The fallback locale cannot be empty. Example: \"en\"",
            ));
        } else if !is_valid_identifier(&self.fallback_locale) {
            errors.push(ValidationError::new(
                "fallbackLocale",
                format!(
                    "Invalid locale identifier '{}'. Use the file name without extension, e.g. \"en\"",
                    self.fallback_locale
                ),
            ));
        }

        if let Some(locale) = &self.locale
            && !is_valid_identifier(locale)
        {
            errors.push(ValidationError::new(
                "locale",
                format!("Invalid locale identifier '{locale}'. Remove this field to auto-detect"),
            ));
        }

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        if self.metadata_prefix == KEY_SEPARATOR {
            errors.push(ValidationError::new(
                "metadataPrefix",
                format!("The prefix cannot be the key separator '{KEY_SEPARATOR}'"),
            ));
        }

        if self.report_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "reportFile",
                "The report path cannot be empty. Example: \"locale-sync-report.json\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Identifiers name files directly, so they must not escape the directory.
fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.contains(['/', '\\', KEY_SEPARATOR])
        && !identifier.chars().any(char::is_whitespace)
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("locales"),
            locale: None,
            fallback_locale: "en".to_string(),
            file_pattern: "*.json".to_string(),
            metadata_prefix: METADATA_PREFIX,
            report_file: PathBuf::from("locale-sync-report.json"),
        }
    }
}
