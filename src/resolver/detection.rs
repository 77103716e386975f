//! Active locale detection.
//!
//! The process environment is reached only through [`LocaleHints`], so the
//! detection logic can be exercised with fixed inputs.

/// Environment variables consulted for a locale, in priority order.
pub const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];

/// Command-line flags naming a locale.
const LANG_FLAGS: &[&str] = &["--lang", "--language"];

/// Supplies raw locale hints from the outside world.
pub trait LocaleHints {
    /// Candidate values in priority order (e.g. `ja_JP.UTF-8`). Empty strings
    /// are skipped by the detector.
    fn candidates(&self) -> Vec<String>;

    /// Locale reported by the operating system, if any.
    fn system_locale(&self) -> Option<String>;
}

/// Hints from the running process: `--lang` style arguments, then
/// [`LOCALE_ENV_VARS`], then the OS locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl LocaleHints for ProcessEnvironment {
    fn candidates(&self) -> Vec<String> {
        let from_args = lang_from_args(std::env::args().skip(1));
        let from_env = LOCALE_ENV_VARS.iter().filter_map(|name| std::env::var(name).ok());

        from_args.into_iter().chain(from_env).collect()
    }

    fn system_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// Fixed hints, for tests and for embedding applications that already know
/// the user's preference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHints {
    pub candidates: Vec<String>,
    pub system_locale: Option<String>,
}

impl StaticHints {
    /// No hints at all; detection ends at the fallback locale.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { candidates: candidates.into_iter().map(Into::into).collect(), system_locale: None }
    }

    #[must_use]
    pub fn with_system_locale(mut self, locale: impl Into<String>) -> Self {
        self.system_locale = Some(locale.into());
        self
    }
}

impl LocaleHints for StaticHints {
    fn candidates(&self) -> Vec<String> {
        self.candidates.clone()
    }

    fn system_locale(&self) -> Option<String> {
        self.system_locale.clone()
    }
}

/// Find the value of `--lang` / `--language` in command-line arguments.
///
/// Accepts both `--lang ja` and `--lang=ja`. The first flag wins; a flag
/// without a value yields `None`.
///
/// # Examples
/// ```
/// use locale_sync::resolver::lang_from_args;
///
/// assert_eq!(lang_from_args(["run", "--lang", "ja"]), Some("ja".to_string()));
/// assert_eq!(lang_from_args(["--language=fr", "--lang", "ja"]), Some("fr".to_string()));
/// assert_eq!(lang_from_args(["--lang"]), None);
/// ```
pub fn lang_from_args<I, S>(args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();

        if LANG_FLAGS.contains(&arg) {
            return args.next().map(|value| value.as_ref().to_string());
        }

        if let Some((flag, value)) = arg.split_once('=')
            && LANG_FLAGS.contains(&flag)
        {
            return (!value.is_empty()).then(|| value.to_string());
        }
    }

    None
}

/// Primary language subtag of a raw locale string, lower-cased.
///
/// `ja_JP.UTF-8` → `ja`, `en-US` → `en`, `""` → `None`.
#[must_use]
pub fn primary_subtag(raw: &str) -> Option<String> {
    raw.trim()
        .split(['_', '.', '-'])
        .next()
        .filter(|subtag| !subtag.is_empty())
        .map(str::to_lowercase)
}

/// Pick the active locale from `hints`.
///
/// The first non-empty candidate wins, then the OS locale, then `fallback`.
#[must_use]
pub fn detect_locale(hints: &dyn LocaleHints, fallback: &str) -> String {
    if let Some(locale) = hints.candidates().iter().find_map(|candidate| primary_subtag(candidate))
    {
        tracing::debug!(locale = %locale, "Locale detected from environment");
        return locale;
    }

    if let Some(locale) = hints.system_locale().as_deref().and_then(primary_subtag) {
        tracing::debug!(locale = %locale, "Locale detected from system settings");
        return locale;
    }

    tracing::debug!(fallback, "No locale hint found, using fallback");
    fallback.to_string()
}
