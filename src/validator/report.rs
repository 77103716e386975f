//! Console summary and the JSON report artifact.

use std::fmt::Write as _;
use std::path::{
    Path,
    PathBuf,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use thiserror::Error;

use super::compare::ComparisonResult;
use super::run::ValidationRun;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterSummary {
    pub name: String,
    pub key_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_targets: usize,
    /// Missing plus extra keys over all targets
    pub total_discrepancies: usize,
}

/// Machine-readable summary written by `--report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub timestamp: DateTime<Utc>,
    pub master: MasterSummary,
    pub results: Vec<ComparisonResult>,
    pub summary: ReportSummary,
}

impl ValidationReport {
    /// Build a report stamped with the current time.
    #[must_use]
    pub fn new(run: &ValidationRun) -> Self {
        Self::at(run, Utc::now())
    }

    #[must_use]
    pub fn at(run: &ValidationRun, timestamp: DateTime<Utc>) -> Self {
        let outcome = &run.outcome;

        Self {
            timestamp,
            master: MasterSummary { name: run.master.clone(), key_count: outcome.master_key_count },
            results: outcome.results.clone(),
            summary: ReportSummary {
                total_targets: outcome.results.len(),
                total_discrepancies: outcome.total_discrepancies(),
            },
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|source| ReportError::Write { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), "Report written");
        Ok(())
    }
}

/// Human-readable summary of a run, one block per target.
#[must_use]
pub fn render_console(run: &ValidationRun) -> String {
    let outcome = &run.outcome;
    let mut out = String::new();

    let _ = writeln!(out, "Master locale: {} ({} keys)", run.master, outcome.master_key_count);

    for result in &outcome.results {
        let mark = if result.is_complete { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "{mark} {}: {} keys, {:.2}% coverage",
            result.language, result.key_count, result.coverage
        );

        for key in &result.missing {
            let _ = writeln!(out, "    missing: {key}");
        }
        for key in &result.extra {
            let _ = writeln!(out, "    extra:   {key}");
        }
    }

    if outcome.is_synchronized() {
        let _ = writeln!(out, "All {} locale(s) are in sync", outcome.results.len());
    } else {
        let out_of_sync = outcome.results.iter().filter(|r| !r.is_complete).count();
        let _ = writeln!(
            out,
            "{out_of_sync} of {} locale(s) out of sync, {} discrepancies",
            outcome.results.len(),
            outcome.total_discrepancies()
        );
    }

    out
}
