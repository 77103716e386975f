//! Process-wide default translator.
//!
//! Library code takes a [`Translator`] explicitly. This module exists for
//! call sites where threading one through is impractical, such as message
//! formatting deep inside a binary.

use std::sync::{
    Mutex,
    MutexGuard,
    OnceLock,
    PoisonError,
};

use crate::resolver::{
    Params,
    Translator,
};

/// Translator set by [`install`].
static DEFAULT: OnceLock<Mutex<Translator>> = OnceLock::new();

/// Locks the default translator, recovering from a poisoned lock.
fn guard() -> Option<MutexGuard<'static, Translator>> {
    DEFAULT.get().map(|cell| cell.lock().unwrap_or_else(PoisonError::into_inner))
}

/// Install `translator` as the process-wide default, replacing any previous one.
pub fn install(translator: Translator) {
    if let Err(translator) = DEFAULT.set(Mutex::new(translator))
        && let Some(mut current) = guard()
    {
        *current = translator.into_inner().unwrap_or_else(PoisonError::into_inner);
    }
    tracing::debug!("Default translator installed");
}

/// True once [`install`] has been called.
#[must_use]
pub fn is_installed() -> bool {
    DEFAULT.get().is_some()
}

/// Run `f` with the default translator. `None` if none is installed.
pub fn with<R>(f: impl FnOnce(&Translator) -> R) -> Option<R> {
    guard().map(|translator| f(&translator))
}

/// Run `f` with mutable access to the default translator, e.g. to switch locale.
pub fn with_mut<R>(f: impl FnOnce(&mut Translator) -> R) -> Option<R> {
    guard().map(|mut translator| f(&mut translator))
}

/// Resolve `key_path` with the default translator.
///
/// Without an installed translator the key path is returned unchanged.
#[must_use]
pub fn t(key_path: &str) -> String {
    t_with(key_path, &Params::new())
}

/// Resolve `key_path` with parameters using the default translator.
#[must_use]
pub fn t_with(key_path: &str, params: &Params) -> String {
    with(|translator| translator.t_with(key_path, params)).unwrap_or_else(|| {
        tracing::warn!(key = key_path, "No default translator installed");
        key_path.to_string()
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::config::LocaleSettings;
    use crate::resolver::{
        StaticHints,
        params,
    };
    use crate::test_utils::locales_dir;

    // The default is process-wide, so the whole lifecycle lives in one test.
    #[googletest::test]
    fn default_translator_lifecycle() {
        expect_that!(t("app.name"), eq("app.name"));
        expect_that!(with(|tr| tr.current_locale().to_string()).is_none(), eq(true));

        let dir = locales_dir(&[
            ("en", json!({ "app": { "name": "Tool", "version": "Version {version}" } })),
            ("ja", json!({ "app": { "name": "ツール" } })),
        ]);
        let settings = LocaleSettings {
            locales_dir: dir.path().to_path_buf(),
            locale: Some("en".to_string()),
            ..LocaleSettings::default()
        };
        install(Translator::new(&settings, &StaticHints::none()).expect("translator"));

        expect_that!(is_installed(), eq(true));
        expect_that!(t("app.name"), eq("Tool"));
        expect_that!(t_with("app.version", &params([("version", "2.0")])), eq("Version 2.0"));

        expect_that!(with_mut(|tr| tr.set_locale("ja")), some(eq(true)));
        expect_that!(t("app.name"), eq("ツール"));
        expect_that!(t("app.version"), eq("Version {version}"));

        let replacement = LocaleSettings { locale: Some("en".to_string()), ..settings };
        install(Translator::new(&replacement, &StaticHints::none()).expect("translator"));
        expect_that!(t("app.name"), eq("Tool"));
    }
}
