//! Categorize command handler.

use crate::categorize::{CategorizationSummary, ResourceCategorizer};
use crate::config::CategorizeConfig;
use crate::pipeline::{exit_codes, load_rules, load_snapshot, output_categorization_report};
use anyhow::Result;

/// Run the categorize command
#[allow(clippy::needless_pass_by_value)]
pub fn run_categorize(config: CategorizeConfig, quiet: bool) -> Result<i32> {
    let rules = load_rules(&config.rules_file, quiet)?;
    let snapshot = load_snapshot(&config.snapshot, quiet)?;

    let categorizer = ResourceCategorizer::new(&rules);
    let summary =
        CategorizationSummary::from_workloads(categorizer.categorize_all(&snapshot.workloads));

    let explanations = if config.explain {
        snapshot
            .workloads
            .iter()
            .map(|w| categorizer.explain(w))
            .collect()
    } else {
        Vec::new()
    };

    if !quiet {
        tracing::info!(
            "Categorized {} workloads, total VPC {:.2}",
            summary.total_workloads,
            summary.licensing.total_vpc
        );
    }

    output_categorization_report(&config.output, &summary, &explanations, quiet)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_run_categorize_with_explanations() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("snapshot.json");
        let rules = tmp.path().join("categories.yaml");
        let report = tmp.path().join("report.txt");
        std::fs::write(
            &snapshot,
            r#"{"workloads": [
                {"name": "ibm-eventstreams-abc", "namespace": "cp4i",
                 "resources": {"cpu_requests": 0.5}},
                {"name": "nginx-ingress", "namespace": "web"}
            ]}"#,
        )
        .unwrap();
        std::fs::write(
            &rules,
            "licensing:\n  cp4i_licensed:\n    patterns: ['ibm-eventstreams']\n  free:\n    patterns: ['nginx']\n",
        )
        .unwrap();

        let config = CategorizeConfig {
            snapshot,
            rules_file: rules,
            explain: true,
            output: OutputConfig {
                format: ReportFormat::Summary,
                file: Some(report.clone()),
                no_color: true,
            },
        };
        assert_eq!(run_categorize(config, true).unwrap(), exit_codes::SUCCESS);

        let text = std::fs::read_to_string(report).unwrap();
        assert!(text.contains("Total VPC: 0.50"));
        assert!(text.contains("Explanations:"));
        assert!(text.contains("cp4i/ibm-eventstreams-abc"));
    }

    #[test]
    fn test_run_categorize_missing_rules() {
        let tmp = TempDir::new().unwrap();
        let config = CategorizeConfig {
            snapshot: tmp.path().join("snapshot.json"),
            rules_file: tmp.path().join("missing.yaml"),
            explain: false,
            output: OutputConfig::default(),
        };
        assert!(run_categorize(config, true).is_err());
    }
}
