//! Translation resolution: key lookup with fallback and `{name}` interpolation.

/// Active locale detection
mod detection;
/// Placeholder substitution
mod interpolate;
/// Translator
mod translator;

pub use detection::{
    LOCALE_ENV_VARS,
    LocaleHints,
    ProcessEnvironment,
    StaticHints,
    detect_locale,
    lang_from_args,
    primary_subtag,
};
pub use interpolate::{
    Params,
    interpolate,
    params,
};
pub use translator::{
    LocaleInfo,
    Resolution,
    Translator,
    TranslatorError,
};
