//! Settings file discovery and loading.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LocaleSettings,
};

/// Name of the settings file looked up in a workspace root.
pub const CONFIG_FILE_NAME: &str = ".locale-sync.json";

/// Nearest directory at or above `start` that holds a settings file.
///
/// Lets the validator run from any subdirectory of a project, the way `git`
/// finds its repository.
#[must_use]
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let root = start.ancestors().find(|dir| dir.join(CONFIG_FILE_NAME).is_file())?;
    tracing::debug!(root = %root.display(), "Found settings file");
    Some(root.to_path_buf())
}

/// Load the settings file of `workspace_root`.
///
/// Relative `localesDir` / `reportFile` values are resolved against
/// `workspace_root`, so the result does not depend on the current directory.
///
/// # Returns
/// - `Ok(Some(settings))`: settings file found and parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse error
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<LocaleSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "No settings file");
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)?;
    let settings: LocaleSettings = serde_json::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), ?settings, "Loaded settings file");

    Ok(Some(LocaleSettings {
        locales_dir: workspace_root.join(&settings.locales_dir),
        report_file: workspace_root.join(&settings.report_file),
        ..settings
    }))
}
