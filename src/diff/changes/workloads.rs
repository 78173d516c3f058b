//! Workload change computer implementation.

use super::compare_keyed;
use crate::diff::result::{ChangeDetail, ChangeRecord, ChangeSet, SeverityHint};
use crate::diff::traits::ChangeComputer;
use crate::model::{EntityKind, Snapshot, Workload};

/// Total restart count at which a restart record is hinted critical.
pub const DEFAULT_RESTART_THRESHOLD: u32 = 5;

/// Computes workload changes: additions, removals, restart-count increases
/// and phase transitions.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadChangeComputer {
    restart_threshold: u32,
}

impl WorkloadChangeComputer {
    #[must_use]
    pub const fn new(restart_threshold: u32) -> Self {
        Self { restart_threshold }
    }

    fn restart_hint(&self, total_restarts: u32) -> SeverityHint {
        if total_restarts >= self.restart_threshold {
            SeverityHint::Critical
        } else {
            SeverityHint::Warning
        }
    }

    fn compare(&self, old: &Workload, new: &Workload, out: &mut Vec<ChangeRecord>) {
        // A decrease means the workload was recreated; only increases count.
        if new.restart_count > old.restart_count {
            out.push(
                ChangeRecord::modified(
                    EntityKind::Workload,
                    &new.name,
                    ChangeDetail::Restarts {
                        restart_delta: new.restart_count - old.restart_count,
                        total_restarts: new.restart_count,
                    },
                )
                .in_namespace(&new.namespace)
                .with_hint(self.restart_hint(new.restart_count)),
            );
        }

        if old.phase != new.phase {
            out.push(
                ChangeRecord::modified(
                    EntityKind::Workload,
                    &new.name,
                    ChangeDetail::Phase {
                        old_phase: old.phase.clone(),
                        new_phase: new.phase.clone(),
                    },
                )
                .in_namespace(&new.namespace),
            );
        }
    }
}

impl Default for WorkloadChangeComputer {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_THRESHOLD)
    }
}

impl ChangeComputer for WorkloadChangeComputer {
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet {
        compare_keyed(
            &previous.workload_map(),
            &current.workload_map(),
            |_, w| {
                ChangeRecord::added(EntityKind::Workload, &w.name)
                    .in_namespace(&w.namespace)
                    .with_detail(ChangeDetail::state(&w.phase))
            },
            |_, w| {
                ChangeRecord::removed(EntityKind::Workload, &w.name)
                    .in_namespace(&w.namespace)
                    .with_detail(ChangeDetail::state(&w.phase))
            },
            |_, old, new, out| self.compare(old, new, out),
        )
    }

    fn name(&self) -> &str {
        "workloads"
    }
}
