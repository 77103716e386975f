//! Locale source loading and the per-instance locale registry.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use crate::config::LocaleFileMatcher;

/// Extension of locale source files.
pub const LOCALE_FILE_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum LoadError {
    /// The fallback (or master) locale has no source, so nothing can be resolved.
    #[error("Fallback locale '{identifier}' not found at {}", path.display())]
    FallbackMissing { identifier: String, path: PathBuf },

    #[error("Failed to read locale file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse locale file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Locale file {} must contain a JSON object at the root", path.display())]
    NotATree { path: PathBuf },

    #[error("Failed to list locale files in {}: {message}", path.display())]
    ListDirectory { path: PathBuf, message: String },
}

impl LoadError {
    /// Path of the offending source.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::FallbackMissing { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::NotATree { path }
            | Self::ListDirectory { path, .. } => path,
        }
    }
}

/// Read and parse a locale tree from `path`.
///
/// # Errors
/// Returns error if the file cannot be read, is not JSON, or its root is not
/// an object.
pub fn read_tree(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;

    let tree: Value = serde_json::from_str(&content)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;

    if !tree.is_object() {
        return Err(LoadError::NotATree { path: path.to_path_buf() });
    }

    Ok(tree)
}

/// Loads locale trees from a directory on demand and keeps them by identifier.
#[derive(Debug, Clone)]
pub struct LocaleLoader {
    /// Directory holding `<identifier>.json` files
    locales_dir: PathBuf,
    /// Identifier whose absence is a configuration error
    fallback: String,
    /// Filter for `list_available`
    matcher: LocaleFileMatcher,
    /// Loaded trees
    registry: BTreeMap<String, Value>,
}

impl LocaleLoader {
    #[must_use]
    pub fn new(
        locales_dir: impl Into<PathBuf>,
        fallback: impl Into<String>,
        matcher: LocaleFileMatcher,
    ) -> Self {
        Self {
            locales_dir: locales_dir.into(),
            fallback: fallback.into(),
            matcher,
            registry: BTreeMap::new(),
        }
    }

    /// Path of the source for `identifier`.
    #[must_use]
    pub fn source_path(&self, identifier: &str) -> PathBuf {
        self.locales_dir.join(format!("{identifier}.{LOCALE_FILE_EXTENSION}"))
    }

    /// Load `identifier` into the registry.
    ///
    /// # Returns
    /// - `Ok(true)`: loaded now or already registered (no I/O in that case)
    /// - `Ok(false)`: no source for a non-fallback identifier
    ///
    /// # Errors
    /// - The fallback identifier has no source
    /// - The source exists but cannot be read or parsed as a tree
    pub fn load(&mut self, identifier: &str) -> Result<bool, LoadError> {
        if self.registry.contains_key(identifier) {
            return Ok(true);
        }

        let path = self.source_path(identifier);
        if !path.is_file() {
            if identifier == self.fallback {
                return Err(LoadError::FallbackMissing { identifier: identifier.to_string(), path });
            }
            tracing::debug!(locale = identifier, path = %path.display(), "Locale file not found");
            return Ok(false);
        }

        let tree = read_tree(&path)?;
        tracing::debug!(locale = identifier, path = %path.display(), "Loaded locale");
        self.registry.insert(identifier.to_string(), tree);

        Ok(true)
    }

    /// Identifiers of all locale files in the directory, sorted.
    ///
    /// Never fails: if the directory cannot be read, a warning is logged and
    /// only the fallback identifier is returned.
    #[must_use]
    pub fn list_available(&self) -> Vec<String> {
        match self.scan_sources() {
            Ok(sources) => sources.into_keys().collect(),
            Err(error) => {
                tracing::warn!("{error}. Using '{}' only", self.fallback);
                vec![self.fallback.clone()]
            }
        }
    }

    /// Every locale file in the directory, keyed by identifier.
    ///
    /// Unreadable entries (e.g. dangling symlinks) are logged and skipped.
    /// When two files share an identifier, the first in name order wins.
    ///
    /// # Errors
    /// Returns error if the directory itself cannot be enumerated.
    pub fn scan_sources(&self) -> Result<BTreeMap<String, PathBuf>, LoadError> {
        let list_error = |message: String| LoadError::ListDirectory {
            path: self.locales_dir.clone(),
            message,
        };

        if !self.locales_dir.is_dir() {
            return Err(list_error("not a directory".to_string()));
        }

        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();
        for result in WalkBuilder::new(&self.locales_dir)
            .max_depth(Some(1))
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) if error.depth() == Some(0) => {
                    return Err(list_error(error.to_string()));
                }
                Err(error) => {
                    tracing::warn!(
                        dir = %self.locales_dir.display(),
                        "Skipping unreadable entry: {error}"
                    );
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(identifier) = self.matcher.identifier(entry.path()) else {
                continue;
            };

            if let Some(existing) = sources.get(&identifier) {
                tracing::warn!(
                    "Ignoring {} because {} already provides locale '{identifier}'",
                    entry.path().display(),
                    existing.display()
                );
                continue;
            }
            sources.insert(identifier, entry.into_path());
        }

        Ok(sources)
    }

    /// Load `identifier` from an explicit `path`, e.g. one found by
    /// [`Self::scan_sources`]. No I/O if already registered.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed as a tree.
    pub fn load_path(&mut self, identifier: &str, path: &Path) -> Result<(), LoadError> {
        if self.registry.contains_key(identifier) {
            return Ok(());
        }

        let tree = read_tree(path)?;
        tracing::debug!(locale = identifier, path = %path.display(), "Loaded locale");
        self.registry.insert(identifier.to_string(), tree);

        Ok(())
    }

    /// Clear the registry and load `identifiers` again.
    ///
    /// # Errors
    /// Same as [`Self::load`]; soft failures are logged and skipped.
    pub fn reload(&mut self, identifiers: &[&str]) -> Result<(), LoadError> {
        tracing::debug!(?identifiers, "Reloading locales");
        self.registry.clear();

        for identifier in identifiers {
            if !self.load(identifier)? {
                tracing::warn!("Locale '{identifier}' not found during reload");
            }
        }

        Ok(())
    }

    /// Loaded tree for `identifier`, if any.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Value> {
        self.registry.get(identifier)
    }

    #[must_use]
    pub fn is_loaded(&self, identifier: &str) -> bool {
        self.registry.contains_key(identifier)
    }

    /// Identifiers currently in the registry, sorted.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[must_use]
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }
}
