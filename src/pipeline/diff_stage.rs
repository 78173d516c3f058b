//! Diff computation stage.
//!
//! Builds the engine from configured settings, runs it, and maps the result
//! to a process exit code.

use super::exit_codes;
use crate::config::{BehaviorConfig, DiffSettings};
use crate::diff::{DiffEngine, SnapshotDiff};
use crate::model::Snapshot;

/// Run the diff between two loaded snapshots.
#[must_use]
pub fn compute_diff(
    settings: &DiffSettings,
    previous: &Snapshot,
    current: &Snapshot,
    quiet: bool,
) -> SnapshotDiff {
    if !quiet {
        tracing::info!("Computing snapshot diff...");
    }

    let engine = DiffEngine::new()
        .with_restart_threshold(settings.restart_threshold)
        .with_platform_keywords(settings.platform_keywords.clone());
    let diff = engine.diff(previous, current);

    if !quiet {
        let counts = &diff.summary.change_counts;
        tracing::info!(
            "Diff: {} added, {} removed, {} modified ({} critical)",
            counts.additions,
            counts.removals,
            counts.modifications,
            counts.critical
        );
    }

    diff
}

/// Exit code for a completed diff.
///
/// Critical changes take precedence over plain changes when both flags are
/// set.
#[must_use]
pub fn diff_exit_code(diff: &SnapshotDiff, behavior: &BehaviorConfig) -> i32 {
    if behavior.fail_on_critical && diff.has_critical() {
        exit_codes::CRITICAL_CHANGES
    } else if behavior.fail_on_change && diff.has_changes() {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Workload;

    fn restart_pair(total: u32) -> (Snapshot, Snapshot) {
        let mut before = Workload::new("shop", "pay-api");
        before.restart_count = 2;
        let mut after = before.clone();
        after.restart_count = total;
        (
            Snapshot {
                workloads: vec![before],
                ..Snapshot::default()
            },
            Snapshot {
                workloads: vec![after],
                ..Snapshot::default()
            },
        )
    }

    #[test]
    fn test_settings_reach_engine() {
        let (previous, current) = restart_pair(6);
        let strict = compute_diff(&DiffSettings::default(), &previous, &current, true);
        assert!(strict.has_critical());

        let lenient = DiffSettings {
            restart_threshold: 20,
            ..DiffSettings::default()
        };
        assert!(!compute_diff(&lenient, &previous, &current, true).has_critical());
    }

    #[test]
    fn test_exit_codes() {
        let (previous, current) = restart_pair(6);
        let diff = compute_diff(&DiffSettings::default(), &previous, &current, true);

        let none = BehaviorConfig::default();
        assert_eq!(diff_exit_code(&diff, &none), exit_codes::SUCCESS);

        let on_change = BehaviorConfig {
            fail_on_change: true,
            ..BehaviorConfig::default()
        };
        assert_eq!(diff_exit_code(&diff, &on_change), exit_codes::CHANGES_DETECTED);

        let both = BehaviorConfig {
            fail_on_change: true,
            fail_on_critical: true,
            ..BehaviorConfig::default()
        };
        assert_eq!(diff_exit_code(&diff, &both), exit_codes::CRITICAL_CHANGES);

        let unchanged = compute_diff(&DiffSettings::default(), &previous, &previous, true);
        assert_eq!(diff_exit_code(&unchanged, &both), exit_codes::SUCCESS);
    }
}
