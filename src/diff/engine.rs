//! Snapshot diff engine implementation.

use super::changes::{
    ComponentChangeComputer, DEFAULT_PLATFORM_KEYWORDS, DEFAULT_RESTART_THRESHOLD,
    MessageQueueChangeComputer, NamespaceChangeComputer, NodeChangeComputer, RouteChangeComputer,
    WorkloadChangeComputer,
};
use super::classifier::ChangeClassifier;
use super::elapsed::format_elapsed;
use super::result::{
    CategorizedChanges, ChangeRecord, ChangeSet, DiffMetadata, DiffSummary, SeverityTier,
    SnapshotDiff,
};
use super::traits::ChangeComputer;
use crate::model::Snapshot;

/// Structural diff engine for comparing snapshots.
pub struct DiffEngine {
    restart_threshold: u32,
    platform_keywords: Vec<String>,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
            platform_keywords: DEFAULT_PLATFORM_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }

    /// Set the total restart count at which a restart becomes critical
    #[must_use]
    pub const fn with_restart_threshold(mut self, threshold: u32) -> Self {
        self.restart_threshold = threshold;
        self
    }

    /// Set the name fragments that mark a namespace as platform-related
    #[must_use]
    pub fn with_platform_keywords(mut self, keywords: Vec<String>) -> Self {
        self.platform_keywords = keywords;
        self
    }

    #[must_use]
    pub const fn restart_threshold(&self) -> u32 {
        self.restart_threshold
    }

    #[must_use]
    pub fn platform_keywords(&self) -> &[String] {
        &self.platform_keywords
    }

    /// Change computers in processing order.
    fn computers(&self) -> Vec<Box<dyn ChangeComputer>> {
        vec![
            Box::new(ComponentChangeComputer::new()),
            Box::new(WorkloadChangeComputer::new(self.restart_threshold)),
            Box::new(NamespaceChangeComputer::new(&self.platform_keywords)),
            Box::new(NodeChangeComputer::new()),
            Box::new(MessageQueueChangeComputer::new()),
            Box::new(RouteChangeComputer::new()),
        ]
    }

    /// Compare two snapshots and return the classified diff
    #[must_use]
    pub fn diff(&self, previous: &Snapshot, current: &Snapshot) -> SnapshotDiff {
        let mut changes = ChangeSet::new();
        for computer in self.computers() {
            let set = computer.compute(previous, current);
            tracing::debug!(
                "{}: {} added, {} removed, {} modified",
                computer.name(),
                set.added.len(),
                set.removed.len(),
                set.modified.len()
            );
            changes.extend(set);
        }

        let classifier = ChangeClassifier::new(self.restart_threshold);
        classifier.assign(&mut changes.added, current);
        classifier.assign(&mut changes.removed, current);
        classifier.assign(&mut changes.modified, current);

        let categorized = partition(changes);
        let summary = DiffSummary::compute(previous, current, &categorized);

        SnapshotDiff {
            metadata: DiffMetadata {
                previous_timestamp: previous.timestamp().map(str::to_string),
                current_timestamp: current.timestamp().map(str::to_string),
            },
            time_elapsed: format_elapsed(previous.timestamp(), current.timestamp()),
            changes: categorized,
            summary,
        }
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the parallel severity partition from classified records.
fn partition(changes: ChangeSet) -> CategorizedChanges {
    let mut categorized = CategorizedChanges::default();
    for record in changes
        .added
        .iter()
        .chain(&changes.removed)
        .chain(&changes.modified)
    {
        let bucket: &mut Vec<ChangeRecord> = match record.tier {
            Some(SeverityTier::Critical) => &mut categorized.critical,
            Some(SeverityTier::Important) => &mut categorized.important,
            Some(SeverityTier::Informational) | None => &mut categorized.informational,
        };
        bucket.push(record.clone());
    }
    categorized.additions = changes.added;
    categorized.removals = changes.removed;
    categorized.modifications = changes.modified;
    categorized
}
