//! Severity classification of change records.

use super::changes::DEFAULT_RESTART_THRESHOLD;
use super::result::{ChangeAction, ChangeDetail, ChangeRecord, SeverityHint, SeverityTier};
use crate::model::{EntityKind, Snapshot, is_ready_status};

/// Assigns each change record to exactly one severity tier.
///
/// Rules are checked in order and the first match wins:
///
/// 1. critical: a critical hint, a node leaving the ready state, or a
///    workload restart reaching the threshold
/// 2. important: platform-related records, message-queue records, any
///    workload restart, or workload/route records in a platform namespace of
///    the current snapshot
/// 3. informational: everything else
#[derive(Debug, Clone, Copy)]
pub struct ChangeClassifier {
    restart_threshold: u32,
}

impl ChangeClassifier {
    #[must_use]
    pub const fn new(restart_threshold: u32) -> Self {
        Self { restart_threshold }
    }

    /// Classify a single record against the current snapshot.
    #[must_use]
    pub fn classify(&self, record: &ChangeRecord, current: &Snapshot) -> SeverityTier {
        if self.is_critical(record) {
            SeverityTier::Critical
        } else if Self::is_important(record, current) {
            SeverityTier::Important
        } else {
            SeverityTier::Informational
        }
    }

    fn is_critical(&self, record: &ChangeRecord) -> bool {
        if record.severity_hint == Some(SeverityHint::Critical) {
            return true;
        }
        match (&record.entity, &record.detail) {
            (EntityKind::Node, ChangeDetail::Status { new_status, .. }) => {
                record.action == ChangeAction::Modified && !is_ready_status(new_status)
            }
            (EntityKind::Workload, ChangeDetail::Restarts { total_restarts, .. }) => {
                *total_restarts >= self.restart_threshold
            }
            _ => false,
        }
    }

    fn is_important(record: &ChangeRecord, current: &Snapshot) -> bool {
        if record.is_platform || record.entity.is_message_queue() || record.is_restart() {
            return true;
        }
        matches!(record.entity, EntityKind::Workload | EntityKind::Route)
            && record
                .namespace
                .as_deref()
                .is_some_and(|ns| current.is_platform_namespace(ns))
    }

    /// Set `tier` on every record.
    pub fn assign(&self, records: &mut [ChangeRecord], current: &Snapshot) {
        for record in records {
            record.tier = Some(self.classify(record, current));
        }
    }
}

impl Default for ChangeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_THRESHOLD)
    }
}
