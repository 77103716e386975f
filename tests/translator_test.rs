//! Translation lookup through the public API

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use locale_sync::config::LocaleSettings;
use locale_sync::resolver::{
    Params,
    Resolution,
    StaticHints,
    Translator,
    params,
};
use locale_sync::tree::{
    TextDirection,
    extract_key_paths,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn locales() -> TempDir {
    let dir = TempDir::new().unwrap();
    let en = json!({
        "_meta": { "name": "English", "nativeName": "English", "direction": "ltr" },
        "app": { "name": "Tool", "version": "Version {version}", "welcome": "Welcome, {user}" },
        "errors": { "notFound": "Not found", "denied": "Access denied" }
    });
    let ar = json!({
        "_meta": { "name": "Arabic", "nativeName": "العربية", "direction": "rtl", "completeness": 50 },
        "app": { "name": "أداة" },
        "errors": { "notFound": "غير موجود" }
    });
    std::fs::write(dir.path().join("en.json"), en.to_string()).unwrap();
    std::fs::write(dir.path().join("ar.json"), ar.to_string()).unwrap();
    dir
}

fn translator(dir: &TempDir, locale: &str) -> Translator {
    let settings = LocaleSettings {
        locales_dir: dir.path().to_path_buf(),
        locale: Some(locale.to_string()),
        ..LocaleSettings::default()
    };
    Translator::new(&settings, &StaticHints::none()).unwrap()
}

#[test]
fn resolution_precedence() {
    let dir = locales();
    let t = translator(&dir, "ar");

    assert_eq!(t.t("app.name"), "أداة");
    assert_eq!(t.t("errors.denied"), "Access denied");
    assert_eq!(t.t("errors.unknown"), "errors.unknown");
    assert_eq!(t.t("_meta.name"), "_meta.name");
    assert_eq!(t.t_with("app.version", &params([("version", "1.0.0")])), "Version 1.0.0");
    assert_eq!(t.t_with("app.welcome", &Params::new()), "Welcome, {user}");
}

#[test]
fn metadata_describes_locale() {
    let dir = locales();
    let t = translator(&dir, "ar");

    let info = t.locale_info(None).unwrap();

    assert_eq!(info.display_name, "Arabic");
    assert_eq!(info.native_name, "العربية");
    assert_eq!(info.text_direction, TextDirection::Rtl);
    assert_eq!(info.completeness, Some(50.0));
    assert!(t.is_rtl(None));
    assert!(!t.is_rtl(Some("en")));
}

#[test]
fn switching_locale() {
    let dir = locales();
    let mut t = translator(&dir, "en");

    assert!(t.set_locale("ar"));
    assert!(t.set_locale("ar"));
    assert!(!t.set_locale("zz"));

    assert_eq!(t.current_locale(), "ar");
    assert_eq!(t.available_locales(), vec!["ar", "en"]);
}

#[test]
fn extracted_paths_resolve_to_own_values() {
    let dir = locales();
    let t = translator(&dir, "en");
    let tree: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("en.json")).unwrap()).unwrap();

    let keys = extract_key_paths(&tree, "");

    assert_eq!(keys, vec!["app.name", "app.version", "app.welcome", "errors.denied", "errors.notFound"]);
    for key in keys {
        assert!(t.has_key(&key, None));
        assert_ne!(t.resolve(&key, &Params::new(), None), Resolution::Text(key.clone()));
    }
}
