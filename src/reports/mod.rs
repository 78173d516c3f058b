//! Rendering of diff and categorization results.
//!
//! `json` emits the result documents unchanged; `summary` is the terminal
//! view, colored unless disabled.

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{DEFAULT_IMPORTANT_LIMIT, ReportConfig, ReportFormat};

use crate::categorize::{CategorizationSummary, Explanation};
use crate::diff::SnapshotDiff;
use std::io::Write;
use thiserror::Error;

/// Failure to render or write a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    IoError(#[from] std::io::Error),

    #[error("cannot serialize report: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// One output format. Implementations are stateless apart from color.
pub trait ReportGenerator {
    fn generate_diff_report(
        &self,
        diff: &SnapshotDiff,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a report from a categorization summary.
    ///
    /// `explanations` is only rendered when `config.explain` is set and the
    /// format supports it.
    fn generate_categorization_report(
        &self,
        summary: &CategorizationSummary,
        explanations: &[Explanation],
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    fn write_diff_report(
        &self,
        diff: &SnapshotDiff,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(diff, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    fn format(&self) -> ReportFormat;
}

#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Reporter for `format`; `use_color` only affects the summary format.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
