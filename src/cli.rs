//! Command-line interface of the `locale-sync` validator.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
    LocaleFileMatcher,
    LocaleSettings,
    MatcherError,
    find_workspace_root,
};
use crate::loader::LoadError;
use crate::validator::{
    ReportError,
    ValidationReport,
    render_console,
    validate_directory_with,
};

/// Failures that end a validation run with exit code 1 in every mode.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Check that every locale file has the same keys as the master locale.
#[derive(Debug, Clone, Parser)]
#[command(name = "locale-sync", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Fail when any locale has missing or extra keys (default)
    #[arg(long)]
    pub strict: bool,

    /// Report discrepancies but never fail
    #[arg(long)]
    pub warn_only: bool,

    /// Do not fail because of missing or extra keys
    #[arg(long)]
    pub allow_missing: bool,

    /// Write a JSON report
    #[arg(long)]
    pub report: bool,

    /// Where to write the JSON report (implies --report)
    #[arg(long, value_name = "FILE")]
    pub report_path: Option<PathBuf>,

    /// Directory holding the locale files
    #[arg(long, value_name = "DIR")]
    pub locales_dir: Option<PathBuf>,

    /// Locale the others are compared against
    #[arg(long, value_name = "ID")]
    pub master: Option<String>,

    /// Directory containing .locale-sync.json (default: nearest one above the
    /// current directory)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// How discrepancies affect the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Strict,
    WarnOnly,
    AllowMissing,
}

impl ValidationMode {
    /// Process exit code for a completed run.
    #[must_use]
    pub const fn exit_code(self, synchronized: bool) -> u8 {
        match self {
            Self::Strict if !synchronized => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn is_lenient(self) -> bool {
        !matches!(self, Self::Strict)
    }
}

impl Cli {
    /// Lenient flags win over `--strict`.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        if self.warn_only {
            ValidationMode::WarnOnly
        } else if self.allow_missing {
            ValidationMode::AllowMissing
        } else {
            ValidationMode::Strict
        }
    }

    /// Report destination, if a report was requested.
    #[must_use]
    pub fn report_destination(&self, settings: &LocaleSettings) -> Option<PathBuf> {
        match &self.report_path {
            Some(path) => Some(path.clone()),
            None if self.report => Some(settings.report_file.clone()),
            None => None,
        }
    }

    /// Settings with command-line values taking precedence.
    #[must_use]
    pub fn apply_overrides(&self, settings: LocaleSettings) -> LocaleSettings {
        LocaleSettings {
            locales_dir: self.locales_dir.clone().unwrap_or(settings.locales_dir),
            fallback_locale: self.master.clone().unwrap_or(settings.fallback_locale),
            ..settings
        }
    }
}

/// Validate the configured locales directory and write the console summary
/// to `out`.
///
/// Returns the process exit code for a completed run.
///
/// # Errors
/// - Invalid or unreadable settings file
/// - Master locale missing or any locale file corrupt
/// - Report cannot be written
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<u8, RunError> {
    let workspace_root = cli
        .config_dir
        .clone()
        .or_else(|| std::env::current_dir().ok().and_then(|cwd| find_workspace_root(&cwd)))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut manager = ConfigManager::new();
    manager.load_settings(Some(workspace_root))?;
    manager.update_settings(cli.apply_overrides(manager.get_settings().clone()))?;
    let settings = manager.get_settings();

    let matcher = LocaleFileMatcher::new(settings)?;
    let validation = validate_directory_with(
        &settings.locales_dir,
        &settings.fallback_locale,
        matcher,
        settings.metadata_prefix,
    )?;

    out.write_all(render_console(&validation).as_bytes())?;

    if let Some(path) = cli.report_destination(settings) {
        ValidationReport::new(&validation).write_to(&path)?;
        writeln!(out, "Report written to {}", path.display())?;
    }

    let mode = cli.mode();
    let synchronized = validation.is_synchronized();
    if !synchronized && mode.is_lenient() {
        tracing::warn!(?mode, "Locales are out of sync; not failing because of lenient mode");
    }

    Ok(mode.exit_code(synchronized))
}
