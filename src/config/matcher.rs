//! File name matcher for locale sources.

use std::path::Path;

use globset::{
    Glob,
    GlobMatcher,
};

use super::LocaleSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid locale file pattern '{pattern}': {source}")]
    InvalidFilePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Decides which files in the locales directory are locale sources.
///
/// Only the file name is matched, so `*.json` never picks up files from
/// nested directories.
#[derive(Debug, Clone)]
pub struct LocaleFileMatcher {
    /// Compiled `filePattern`
    matcher: GlobMatcher,
}

impl LocaleFileMatcher {
    /// Creates a matcher from `filePattern`.
    pub fn new(settings: &LocaleSettings) -> Result<Self, MatcherError> {
        Self::from_pattern(&settings.file_pattern)
    }

    /// Creates a matcher from a raw glob.
    pub fn from_pattern(pattern: &str) -> Result<Self, MatcherError> {
        let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidFilePattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { matcher: glob.compile_matcher() })
    }

    /// Returns true if the file name of `path` matches the pattern.
    #[must_use]
    pub fn is_locale_file(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.matcher.is_match(name))
    }

    /// Locale identifier of a matching file: its name without the last
    /// extension (`locales/pt-BR.json` → `pt-BR`).
    #[must_use]
    pub fn identifier(&self, path: &Path) -> Option<String> {
        if !self.is_locale_file(path) {
            return None;
        }
        path.file_stem().map(|stem| stem.to_string_lossy().to_string())
    }
}
