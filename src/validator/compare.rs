//! Key-set comparison between a master tree and target trees.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::tree::{
    METADATA_PREFIX,
    extract_key_paths_with,
};

/// How one target's key set relates to the master's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Target label, usually the locale identifier
    pub language: String,
    /// Number of key paths in the target
    pub key_count: usize,
    /// Master key paths absent from the target, sorted
    pub missing: Vec<String>,
    /// Target key paths absent from the master, sorted
    pub extra: Vec<String>,
    /// Percentage rounded to two decimals
    pub coverage: f64,
    pub is_complete: bool,
}

impl ComparisonResult {
    /// Missing plus extra keys.
    #[must_use]
    pub fn discrepancies(&self) -> usize {
        self.missing.len() + self.extra.len()
    }
}

/// Compare sorted key path lists.
///
/// `coverage` is `(|target| - |extra|) / |master| * 100`, rounded to two
/// decimals, and `0` for an empty master.
///
/// # Examples
/// ```
/// use locale_sync::validator::compare_key_paths;
///
/// let master = ["k1", "k2", "k3"].map(String::from);
/// let target = ["k1"].map(String::from);
///
/// let result = compare_key_paths(&master, &target, "ja");
/// assert_eq!(result.missing, vec!["k2", "k3"]);
/// assert!((result.coverage - 33.33).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn compare_key_paths(master: &[String], target: &[String], label: &str) -> ComparisonResult {
    let master_set: HashSet<&str> = master.iter().map(String::as_str).collect();
    let target_set: HashSet<&str> = target.iter().map(String::as_str).collect();

    let missing: Vec<String> =
        master.iter().filter(|key| !target_set.contains(key.as_str())).cloned().collect();
    let extra: Vec<String> =
        target.iter().filter(|key| !master_set.contains(key.as_str())).cloned().collect();

    let coverage = coverage(master.len(), target.len(), extra.len());
    let is_complete = missing.is_empty() && extra.is_empty();

    ComparisonResult {
        language: label.to_string(),
        key_count: target.len(),
        missing,
        extra,
        coverage,
        is_complete,
    }
}

/// Share of master keys present in the target, as a percentage with two decimals.
#[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
fn coverage(master_count: usize, target_count: usize, extra_count: usize) -> f64 {
    if master_count == 0 {
        return 0.0;
    }

    let covered = target_count.saturating_sub(extra_count) as f64;
    let percent = covered / master_count as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Results of comparing every target against one master.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub master_key_count: usize,
    /// One entry per target, in input order
    pub results: Vec<ComparisonResult>,
}

impl ValidationOutcome {
    /// True if every target has exactly the master's key set.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.results.iter().all(|result| result.is_complete)
    }

    #[must_use]
    pub fn total_discrepancies(&self) -> usize {
        self.results.iter().map(ComparisonResult::discrepancies).sum()
    }
}

/// Compare each `(label, tree)` target against `master`.
#[must_use]
pub fn validate_all(master: &Value, targets: &[(&str, &Value)]) -> ValidationOutcome {
    validate_all_with(master, targets, METADATA_PREFIX)
}

/// Same as [`validate_all`] with a custom metadata prefix.
#[must_use]
pub fn validate_all_with(
    master: &Value,
    targets: &[(&str, &Value)],
    reserved: char,
) -> ValidationOutcome {
    let master_keys = extract_key_paths_with(master, "", reserved);

    let results = targets
        .iter()
        .map(|(label, tree)| {
            let target_keys = extract_key_paths_with(tree, "", reserved);
            let result = compare_key_paths(&master_keys, &target_keys, label);
            tracing::debug!(
                language = *label,
                missing = result.missing.len(),
                extra = result.extra.len(),
                "Compared key set"
            );
            result
        })
        .collect();

    ValidationOutcome { master_key_count: master_keys.len(), results }
}
