//! Settings management.

use std::path::PathBuf;

use super::{
    ConfigError,
    LocaleSettings,
    loader,
};

/// Holds the effective settings for one run.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: LocaleSettings,

    /// Directory the settings file was looked up in
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: LocaleSettings::default(), workspace_root: None }
    }

    /// Load settings from `workspace_root`, falling back to defaults when no
    /// settings file exists.
    ///
    /// Paths in the file are relative to `workspace_root`; see
    /// [`super::find_workspace_root`] to locate it.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.unwrap_or_default()
        } else {
            LocaleSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the settings, e.g. after applying command-line overrides.
    ///
    /// # Errors
    /// Returns the validation errors of `new_settings`; current settings are
    /// left untouched in that case.
    pub fn update_settings(&mut self, new_settings: LocaleSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &LocaleSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }
}
