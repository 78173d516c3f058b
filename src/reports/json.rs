//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::categorize::{CategorizationSummary, Explanation};
use crate::diff::SnapshotDiff;
use serde::Serialize;

/// JSON report generator.
///
/// Emits the result documents unchanged so downstream tooling can rely on
/// their field names.
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        diff: &SnapshotDiff,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(diff)
    }

    fn generate_categorization_report(
        &self,
        summary: &CategorizationSummary,
        _explanations: &[Explanation],
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(summary)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::{CategorizedWorkload, CriticalityTier, LicensingClass};
    use crate::model::ResourceRequests;

    #[test]
    fn test_diff_report_shape() {
        let report = JsonReporter::new()
            .generate_diff_report(&SnapshotDiff::default(), &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        for key in ["metadata", "time_elapsed", "changes", "summary"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        for key in [
            "additions",
            "removals",
            "modifications",
            "critical",
            "important",
            "informational",
        ] {
            assert!(value["changes"][key].is_array(), "missing changes.{key}");
        }
    }

    #[test]
    fn test_compact_output() {
        let report = JsonReporter::new()
            .pretty(false)
            .generate_diff_report(&SnapshotDiff::default(), &ReportConfig::default())
            .unwrap();
        assert!(!report.contains('\n'));
    }

    #[test]
    fn test_categorization_report_shape() {
        let summary = CategorizationSummary::from_workloads(vec![CategorizedWorkload {
            name: "ibm-eventstreams-abc".to_string(),
            namespace: "cp4i".to_string(),
            licensing: LicensingClass::Cp4iLicensed,
            criticality: CriticalityTier::Critical,
            is_workload: false,
            vpc_contribution: 0.5,
            resources: ResourceRequests::default(),
        }]);
        let report = JsonReporter::new()
            .generate_categorization_report(&summary, &[], &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["total_workloads"], 1);
        assert_eq!(value["licensing"]["breakdown"]["cp4i_licensed"], 1);
        assert_eq!(value["licensing"]["total_vpc"], 0.5);
        assert_eq!(value["workloads"]["infrastructure"], 1);
    }
}
