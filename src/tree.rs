//! Locale tree walking shared by the translator and the key-set validator.
//!
//! A locale tree is a JSON object whose values are either string templates or
//! nested objects. Keys starting with [`METADATA_PREFIX`] carry descriptive
//! information about the locale and are never translation content.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Separator between segments of a key path (e.g. `app.version`).
pub const KEY_SEPARATOR: char = '.';

/// Prefix marking metadata keys (e.g. `_meta`).
pub const METADATA_PREFIX: char = '_';

/// Root key holding the locale metadata object.
pub const META_KEY: &str = "_meta";

/// Returns true if `key` is a metadata key for the given reserved prefix.
#[must_use]
pub fn is_metadata_key(key: &str, reserved: char) -> bool {
    key.starts_with(reserved)
}

/// Traverse `tree` along a dot-separated key path.
///
/// Returns `None` as soon as a segment is absent or the current node is not an
/// object. There is no partial match: `a.b` against `{"a": "x"}` is a miss.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use locale_sync::tree::lookup;
///
/// let tree = json!({ "app": { "version": "Version {version}" } });
///
/// assert_eq!(lookup(&tree, "app.version"), Some(&json!("Version {version}")));
/// assert_eq!(lookup(&tree, "app.version.major"), None);
/// ```
#[must_use]
pub fn lookup<'a>(tree: &'a Value, key_path: &str) -> Option<&'a Value> {
    key_path.split(KEY_SEPARATOR).try_fold(tree, |node, segment| node.as_object()?.get(segment))
}

/// Collect all leaf key paths of `tree`, sorted, skipping `_`-prefixed keys.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use locale_sync::tree::extract_key_paths;
///
/// let tree = json!({
///     "_meta": { "name": "English" },
///     "a": { "b": "x" },
///     "c": "y"
/// });
///
/// assert_eq!(extract_key_paths(&tree, ""), vec!["a.b", "c"]);
/// ```
#[must_use]
pub fn extract_key_paths(tree: &Value, prefix: &str) -> Vec<String> {
    extract_key_paths_with(tree, prefix, METADATA_PREFIX)
}

/// Same as [`extract_key_paths`] with a custom reserved prefix.
///
/// Arrays, numbers, booleans and null are leaves; only objects are recursed
/// into. A non-object root yields no paths.
#[must_use]
pub fn extract_key_paths_with(tree: &Value, prefix: &str, reserved: char) -> Vec<String> {
    let mut paths = Vec::new();
    collect_key_paths(tree, prefix, reserved, &mut paths);
    paths.sort();
    paths
}

/// Depth-first walk appending leaf paths under `prefix` to `paths`.
fn collect_key_paths(node: &Value, prefix: &str, reserved: char, paths: &mut Vec<String>) {
    let Value::Object(map) = node else {
        return;
    };

    for (key, value) in map {
        if is_metadata_key(key, reserved) {
            continue;
        }

        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{key}")
        };

        if value.is_object() {
            collect_key_paths(value, &full_key, reserved, paths);
        } else {
            paths.push(full_key);
        }
    }
}

/// Writing direction declared by a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Parses `"ltr"` / `"rtl"` case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }
}

/// Raw `_meta` block of a locale tree. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleMetadata {
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub direction: Option<TextDirection>,
    pub completeness: Option<f64>,
}

impl LocaleMetadata {
    /// Reads the `_meta` object at the root of `tree`.
    ///
    /// Fields of the wrong JSON type are ignored rather than reported.
    #[must_use]
    pub fn from_tree(tree: &Value) -> Self {
        let Some(meta) = tree.get(META_KEY).and_then(Value::as_object) else {
            return Self::default();
        };

        let text = |field: &str| meta.get(field).and_then(Value::as_str).map(str::to_string);

        Self {
            name: text("name"),
            native_name: text("nativeName"),
            direction: meta.get("direction").and_then(Value::as_str).and_then(TextDirection::parse),
            completeness: meta.get("completeness").and_then(Value::as_f64),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("_meta", '_', true)]
    #[case("_", '_', true)]
    #[case("meta", '_', false)]
    #[case("a_b", '_', false)]
    #[case("$schema", '$', true)]
    #[case("", '_', false)]
    fn test_is_metadata_key(#[case] key: &str, #[case] reserved: char, #[case] expected: bool) {
        assert_that!(is_metadata_key(key, reserved), eq(expected));
    }

    #[googletest::test]
    fn test_lookup_nested() {
        let tree = json!({
            "app": {
                "name": "Tool",
                "errors": { "notFound": "Not found" }
            }
        });

        expect_that!(lookup(&tree, "app.name"), some(eq(&json!("Tool"))));
        expect_that!(lookup(&tree, "app.errors.notFound"), some(eq(&json!("Not found"))));
        expect_that!(lookup(&tree, "app.errors"), some(eq(&json!({ "notFound": "Not found" }))));
    }

    #[rstest]
    #[case::absent_root_segment("missing.key")]
    #[case::absent_leaf("app.missing")]
    #[case::through_string_leaf("app.name.first")]
    #[case::through_array("app.items.0")]
    #[case::empty_key("")]
    fn test_lookup_miss(#[case] key_path: &str) {
        let tree = json!({ "app": { "name": "Tool", "items": ["a", "b"] } });

        assert_that!(lookup(&tree, key_path), none());
    }

    #[googletest::test]
    fn test_extract_key_paths_skips_metadata() {
        let tree = json!({
            "_meta": { "name": "English", "direction": "ltr" },
            "a": { "b": "x" },
            "c": "y"
        });

        expect_that!(extract_key_paths(&tree, ""), elements_are![eq("a.b"), eq("c")]);
    }

    #[googletest::test]
    fn test_extract_key_paths_skips_metadata_at_depth() {
        let tree = json!({
            "menu": {
                "_comment": "translator note",
                "open": "Open",
                "nested": { "_hint": "x", "close": "Close" }
            }
        });

        expect_that!(
            extract_key_paths(&tree, ""),
            elements_are![eq("menu.nested.close"), eq("menu.open")]
        );
    }

    #[googletest::test]
    fn test_extract_key_paths_treats_non_objects_as_leaves() {
        let tree = json!({
            "list": ["a", "b"],
            "count": 3,
            "enabled": true,
            "nothing": null,
            "empty": {}
        });

        expect_that!(
            extract_key_paths(&tree, ""),
            elements_are![eq("count"), eq("enabled"), eq("list"), eq("nothing")]
        );
    }

    #[googletest::test]
    fn test_extract_key_paths_with_prefix() {
        let tree = json!({ "hello": "Hello", "bye": { "formal": "Goodbye" } });

        expect_that!(
            extract_key_paths(&tree, "common"),
            elements_are![eq("common.bye.formal"), eq("common.hello")]
        );
    }

    #[googletest::test]
    fn test_extract_key_paths_with_custom_reserved_prefix() {
        let tree = json!({ "$schema": "x", "_keep": "kept", "title": "Title" });

        expect_that!(
            extract_key_paths_with(&tree, "", '$'),
            elements_are![eq("_keep"), eq("title")]
        );
    }

    #[googletest::test]
    fn test_extract_key_paths_non_object_root() {
        expect_that!(extract_key_paths(&json!("text"), ""), is_empty());
        expect_that!(extract_key_paths(&json!(["a"]), ""), is_empty());
    }

    #[googletest::test]
    fn test_metadata_from_tree() {
        let tree = json!({
            "_meta": {
                "name": "Arabic",
                "nativeName": "العربية",
                "direction": "RTL",
                "completeness": 87.5
            }
        });

        let meta = LocaleMetadata::from_tree(&tree);

        expect_that!(meta.name.as_deref(), some(eq("Arabic")));
        expect_that!(meta.native_name.as_deref(), some(eq("العربية")));
        expect_that!(meta.direction, some(eq(TextDirection::Rtl)));
        expect_that!(meta.completeness, some(eq(87.5)));
    }

    #[googletest::test]
    fn test_metadata_from_tree_absent_or_malformed() {
        expect_that!(LocaleMetadata::from_tree(&json!({ "a": "b" })), eq(&LocaleMetadata::default()));

        let meta = LocaleMetadata::from_tree(&json!({
            "_meta": { "name": 42, "direction": "sideways" }
        }));
        expect_that!(meta.name.as_deref(), none());
        expect_that!(meta.direction, none());
    }
}
