//! Pipeline orchestration for snapshot operations.
//!
//! Shared load → diff/categorize → report logic, so CLI command handlers
//! stay thin.

mod diff_stage;
mod latest;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::{compute_diff, diff_exit_code};
pub use latest::{SNAPSHOT_FILE_PREFIX, find_latest_snapshots};
pub use output::{OutputTarget, should_use_color, write_output};
pub use parse::{load_rules, load_snapshot};
pub use report_stage::{output_categorization_report, output_diff_report};

use std::path::PathBuf;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an input document
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Snapshot directory holds too few snapshots
    #[error("Need at least {needed} snapshots in {}, found {found}", dir.display())]
    NotEnoughSnapshots {
        dir: PathBuf,
        needed: usize,
        found: usize,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success, or changes found without a fail flag
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (`--fail-on-change`)
    pub const CHANGES_DETECTED: i32 = 1;
    /// Critical changes were detected (`--fail-on-critical`)
    pub const CRITICAL_CHANGES: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
