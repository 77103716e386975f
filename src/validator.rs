//! Key-set validation: every locale file must expose the master's key paths.

/// Key-set comparison
mod compare;
/// Console and JSON reporting
mod report;
/// Directory-level runs
mod run;

pub use compare::{
    ComparisonResult,
    ValidationOutcome,
    compare_key_paths,
    validate_all,
    validate_all_with,
};
pub use report::{
    MasterSummary,
    ReportError,
    ReportSummary,
    ValidationReport,
    render_console,
};
pub use run::{
    ValidationRun,
    validate_directory,
    validate_directory_with,
};

pub use crate::tree::{
    extract_key_paths,
    extract_key_paths_with,
};
