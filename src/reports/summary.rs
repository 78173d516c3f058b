//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::categorize::{CategorizationSummary, Explanation};
use crate::diff::{ChangeRecord, CountDelta, SnapshotDiff};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, lines: &mut Vec<String>, title: &str) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
    }

    fn delta_line(&self, label: &str, delta: CountDelta) -> String {
        let change = if delta.change > 0 {
            self.color(&format!("+{}", delta.change), "green")
        } else {
            self.color(&delta.change.to_string(), "red")
        };
        format!(
            "  {label}: {} → {} ({change})",
            delta.previous, delta.current
        )
    }

    fn change_line(&self, marker: &str, color: &str, record: &ChangeRecord) -> String {
        format!("  {} {record}", self.color(marker, color))
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        diff: &SnapshotDiff,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(
            &mut lines,
            config.title.as_deref().unwrap_or("Snapshot Diff Summary"),
        );

        let previous = diff.metadata.previous_timestamp.as_deref().unwrap_or("unknown");
        let current = diff.metadata.current_timestamp.as_deref().unwrap_or("unknown");
        lines.push(format!("{}  {previous} → {current}", self.color("Snapshots:", "cyan")));
        lines.push(format!("{}  {}", self.color("Elapsed:", "cyan"), diff.time_elapsed));
        lines.push(String::new());

        let counts = &diff.summary.change_counts;
        lines.push(self.color("Changes:", "bold"));
        if diff.has_changes() {
            lines.push(format!(
                "  {} added  {} removed  {} modified",
                self.color(&format!("+{}", counts.additions), "green"),
                self.color(&format!("-{}", counts.removals), "red"),
                self.color(&format!("~{}", counts.modifications), "yellow"),
            ));
            lines.push(format!(
                "  {} critical, {} important, {} informational",
                counts.critical, counts.important, counts.informational
            ));
        } else {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }

        if !diff.changes.critical.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Critical changes:", "red"));
            for record in &diff.changes.critical {
                lines.push(self.change_line("!", "red", record));
            }
        }

        if !diff.changes.important.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Important changes:", "yellow"));
            for record in diff.changes.important.iter().take(config.important_limit) {
                lines.push(self.change_line("*", "yellow", record));
            }
            let hidden = diff
                .changes
                .important
                .len()
                .saturating_sub(config.important_limit);
            if hidden > 0 {
                lines.push(self.color(&format!("  ... and {hidden} more"), "dim"));
            }
        }

        let deltas: Vec<_> = diff
            .summary
            .count_deltas()
            .into_iter()
            .filter(|(_, delta)| delta.change != 0)
            .collect();
        if !deltas.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Counts:", "bold"));
            for (label, delta) in deltas {
                lines.push(self.delta_line(label, delta));
            }
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn generate_categorization_report(
        &self,
        summary: &CategorizationSummary,
        explanations: &[Explanation],
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(
            &mut lines,
            config.title.as_deref().unwrap_or("Categorization Summary"),
        );

        lines.push(format!(
            "{}  {} ({} business, {} infrastructure)",
            self.color("Workloads:", "cyan"),
            summary.total_workloads,
            summary.workloads.business_workloads,
            summary.workloads.infrastructure
        ));
        lines.push(format!(
            "{}  {:.2} cores, {:.2} GB memory requested",
            self.color("Resources:", "cyan"),
            summary.resources.total_cpu_requests_cores,
            summary.resources.total_memory_requests_gb
        ));
        lines.push(String::new());

        lines.push(self.color("Licensing:", "bold"));
        for (class, count) in &summary.licensing.breakdown {
            lines.push(format!("  {class}: {count}"));
        }
        lines.push(format!(
            "  {} {:.2}",
            self.color("Total VPC:", "green"),
            summary.licensing.total_vpc
        ));
        lines.push(String::new());

        lines.push(self.color("Criticality:", "bold"));
        for (tier, count) in &summary.criticality.breakdown {
            lines.push(format!("  {tier}: {count}"));
        }

        if config.explain && !explanations.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Explanations:", "bold"));
            for explanation in explanations {
                lines.push(format!("  {explanation}"));
            }
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
