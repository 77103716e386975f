//! Settings for locale lookup and validation.
/// Settings file loader
mod loader;
/// Settings manager
mod manager;
/// Locale file name matcher
mod matcher;
/// Settings types
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    find_workspace_root,
};
pub use manager::ConfigManager;
pub use matcher::{
    LocaleFileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    LocaleSettings,
    ValidationError,
};
