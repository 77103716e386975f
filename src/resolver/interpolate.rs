//! `{name}` placeholder substitution.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use serde_json::Value;

/// Parameters substituted into a template, keyed by placeholder name.
pub type Params = BTreeMap<String, Value>;

/// `{name}` with an ASCII word name.
#[allow(clippy::expect_used)] // the pattern is a literal
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid placeholder pattern"));

/// Build [`Params`] from `(name, value)` pairs.
///
/// # Examples
/// ```
/// use locale_sync::resolver::params;
///
/// let p = params([("version", "1.0.0")]);
/// assert_eq!(p["version"], "1.0.0");
/// ```
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Replace each `{name}` in `template` with `params[name]`.
///
/// Unknown names stay literal. Substitution is a single left-to-right pass:
/// a value containing `{other}` is inserted as-is, never expanded again.
#[must_use]
pub fn interpolate<'a>(template: &'a str, params: &Params) -> Cow<'a, str> {
    if params.is_empty() {
        return Cow::Borrowed(template);
    }

    PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        caps.get(1)
            .and_then(|name| params.get(name.as_str()))
            .map_or_else(|| whole.to_string(), stringify)
    })
}

/// Render a parameter value the way it appears in text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
