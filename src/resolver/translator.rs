//! Translation lookup with a fallback locale.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::detection::{
    LocaleHints,
    detect_locale,
};
use super::interpolate::{
    Params,
    interpolate,
};
use crate::config::{
    LocaleFileMatcher,
    LocaleSettings,
    MatcherError,
};
use crate::loader::{
    LoadError,
    LocaleLoader,
};
use crate::tree::{
    KEY_SEPARATOR,
    LocaleMetadata,
    METADATA_PREFIX,
    TextDirection,
    is_metadata_key,
    lookup,
};

#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Result of resolving a key path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A string translation (interpolated), or the key path itself on a miss.
    Text(String),
    /// A non-string value such as a subtree, returned untouched.
    Value(Value),
}

impl Resolution {
    /// The text, if this resolved to a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Value(_) => None,
        }
    }

    /// Converts to a display string; non-string values become compact JSON.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Value(value) => value.to_string(),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

/// Descriptor of a loaded locale, built from its `_meta` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub identifier: String,
    pub display_name: String,
    pub native_name: String,
    pub text_direction: TextDirection,
    pub completeness: Option<f64>,
}

impl LocaleInfo {
    /// Fills names missing from `_meta` with the identifier.
    fn from_metadata(identifier: &str, meta: LocaleMetadata) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: meta.name.unwrap_or_else(|| identifier.to_string()),
            native_name: meta.native_name.unwrap_or_else(|| identifier.to_string()),
            text_direction: meta.direction.unwrap_or_default(),
            completeness: meta.completeness,
        }
    }
}

/// Resolves key paths against the active locale, then the fallback locale.
///
/// One instance owns its loaded trees; create it once and pass it to the code
/// that needs translations.
#[derive(Debug, Clone)]
pub struct Translator {
    /// Active locale identifier
    current: String,
    /// Locale consulted when the active one lacks a key
    fallback: String,
    /// Prefix of metadata keys, which never resolve as translations
    reserved: char,
    /// Loaded trees
    loader: LocaleLoader,
}

impl Translator {
    /// Build a translator from settings.
    ///
    /// The active locale is `settings.locale`, or else detected from `hints`.
    /// Both the active and the fallback locale are loaded immediately.
    ///
    /// # Errors
    /// - The fallback locale has no source
    /// - A locale source exists but is not a valid tree
    /// - `filePattern` is not a valid glob
    pub fn new(settings: &LocaleSettings, hints: &dyn LocaleHints) -> Result<Self, TranslatorError> {
        let matcher = LocaleFileMatcher::new(settings)?;
        let loader =
            LocaleLoader::new(&settings.locales_dir, settings.fallback_locale.clone(), matcher);

        let requested = settings
            .locale
            .clone()
            .unwrap_or_else(|| detect_locale(hints, &settings.fallback_locale));

        let mut translator = Self::with_loader(loader, &requested)?;
        translator.reserved = settings.metadata_prefix;
        Ok(translator)
    }

    /// Build a translator around an existing loader.
    ///
    /// # Errors
    /// Same load errors as [`Self::new`].
    pub fn with_loader(mut loader: LocaleLoader, locale: &str) -> Result<Self, LoadError> {
        let fallback = loader.fallback().to_string();

        let current = if locale == fallback || loader.load(locale)? {
            locale.to_string()
        } else {
            tracing::warn!("Locale '{locale}' not found, using '{fallback}'");
            fallback.clone()
        };

        loader.load(&fallback)?;
        tracing::debug!(current = %current, fallback = %fallback, "Translator ready");

        Ok(Self { current, fallback, reserved: METADATA_PREFIX, loader })
    }

    #[must_use]
    pub fn current_locale(&self) -> &str {
        &self.current
    }

    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Resolve `key_path` and interpolate `params`.
    ///
    /// Never fails: an unknown key path, or one through a metadata key such as
    /// `_meta.name`, comes back unchanged as text.
    #[must_use]
    pub fn resolve(
        &self,
        key_path: &str,
        params: &Params,
        override_locale: Option<&str>,
    ) -> Resolution {
        let Some(value) = self.lookup(key_path, override_locale) else {
            tracing::warn!(
                key = key_path,
                locale = override_locale.unwrap_or(&self.current),
                "Translation not found"
            );
            return Resolution::Text(key_path.to_string());
        };

        match value {
            Value::String(template) => Resolution::Text(interpolate(template, params).into_owned()),
            other => Resolution::Value(other.clone()),
        }
    }

    /// Shorthand for resolving without parameters into a `String`.
    #[must_use]
    pub fn t(&self, key_path: &str) -> String {
        self.resolve(key_path, &Params::new(), None).into_string()
    }

    /// Shorthand for resolving with parameters into a `String`.
    #[must_use]
    pub fn t_with(&self, key_path: &str, params: &Params) -> String {
        self.resolve(key_path, params, None).into_string()
    }

    /// Raw value for `key_path` in the target locale, then the fallback.
    #[must_use]
    pub fn lookup(&self, key_path: &str, override_locale: Option<&str>) -> Option<&Value> {
        let target = override_locale.unwrap_or(&self.current);

        self.lookup_in(target, key_path).or_else(|| {
            if target == self.fallback {
                return None;
            }
            let value = self.lookup_in(&self.fallback, key_path);
            if value.is_some() {
                tracing::debug!(key = key_path, locale = target, "Using fallback translation");
            }
            value
        })
    }

    /// True if `key_path` exists in the locale itself, ignoring the fallback.
    #[must_use]
    pub fn has_key(&self, key_path: &str, locale: Option<&str>) -> bool {
        self.lookup_in(locale.unwrap_or(&self.current), key_path).is_some()
    }

    /// Value at `key_path` in one locale. Paths through metadata keys are
    /// misses; metadata is read through [`Self::locale_info`].
    fn lookup_in(&self, locale: &str, key_path: &str) -> Option<&Value> {
        if key_path.split(KEY_SEPARATOR).any(|segment| is_metadata_key(segment, self.reserved)) {
            return None;
        }
        self.loader.get(locale).and_then(|tree| lookup(tree, key_path))
    }

    /// Switch the active locale.
    ///
    /// Returns false and keeps the current locale if `identifier` has no
    /// usable source.
    pub fn set_locale(&mut self, identifier: &str) -> bool {
        if identifier == self.current {
            return true;
        }

        match self.loader.load(identifier) {
            Ok(true) => {}
            Ok(false) if identifier == self.fallback => {}
            Ok(false) => {
                tracing::warn!("Locale '{identifier}' not available, keeping '{}'", self.current);
                return false;
            }
            Err(error) => {
                tracing::error!("Failed to load locale '{identifier}': {error}");
                return false;
            }
        }

        tracing::debug!(from = %self.current, to = identifier, "Locale changed");
        self.current = identifier.to_string();
        true
    }

    /// Descriptor for `identifier` (default: the current locale).
    ///
    /// `None` if that locale was never loaded.
    #[must_use]
    pub fn locale_info(&self, identifier: Option<&str>) -> Option<LocaleInfo> {
        let identifier = identifier.unwrap_or(&self.current);
        let tree = self.loader.get(identifier)?;

        Some(LocaleInfo::from_metadata(identifier, LocaleMetadata::from_tree(tree)))
    }

    /// True if the locale declares right-to-left text.
    #[must_use]
    pub fn is_rtl(&self, identifier: Option<&str>) -> bool {
        self.locale_info(identifier).is_some_and(|info| info.text_direction == TextDirection::Rtl)
    }

    /// Identifiers of all locale files on disk.
    #[must_use]
    pub fn available_locales(&self) -> Vec<String> {
        self.loader.list_available()
    }

    /// Drop every loaded tree and load the current and fallback locales again.
    ///
    /// # Errors
    /// Same load errors as construction.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let mut identifiers = vec![self.current.as_str()];
        if self.current != self.fallback {
            identifiers.push(self.fallback.as_str());
        }
        self.loader.reload(&identifiers)
    }
}
