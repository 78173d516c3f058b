//! Report output stage.
//!
//! Generates a report in the configured format and writes it to stdout or a
//! file.

use super::{OutputTarget, PipelineError, should_use_color, write_output};
use crate::categorize::{CategorizationSummary, Explanation};
use crate::config::OutputConfig;
use crate::diff::SnapshotDiff;
use crate::reports::{ReportConfig, create_reporter_with_options};
use anyhow::Result;

/// Output a diff report to the configured destination.
pub fn output_diff_report(output: &OutputConfig, diff: &SnapshotDiff, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    let reporter = create_reporter_with_options(output.format, use_color(output, &target));
    let report = reporter
        .generate_diff_report(diff, &ReportConfig::default())
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    write_output(&report, &target, quiet)
}

/// Output a categorization report to the configured destination.
pub fn output_categorization_report(
    output: &OutputConfig,
    summary: &CategorizationSummary,
    explanations: &[Explanation],
    quiet: bool,
) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    let reporter = create_reporter_with_options(output.format, use_color(output, &target));
    let config = ReportConfig {
        explain: !explanations.is_empty(),
        ..ReportConfig::default()
    };
    let report = reporter
        .generate_categorization_report(summary, explanations, &config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    write_output(&report, &target, quiet)
}

/// Escape codes only go to an interactive stdout.
fn use_color(output: &OutputConfig, target: &OutputTarget) -> bool {
    target.is_terminal() && should_use_color(output.no_color)
}
