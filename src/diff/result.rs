//! Diff result types.

use crate::model::{EntityKind, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to an entity between the two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Added,
    Removed,
    Modified,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// Severity suggested by the comparator for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityHint {
    Critical,
    Warning,
    Info,
}

/// Severity tier assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Critical,
    Important,
    Informational,
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Important => write!(f, "important"),
            Self::Informational => write!(f, "informational"),
        }
    }
}

/// Old/new value fragments of a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeDetail {
    /// State of an added or removed entity
    Presence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        partitions: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        host: Option<String>,
    },
    /// Component or workload phase transition
    Phase { old_phase: String, new_phase: String },
    /// Workload restart-count increase
    Restarts {
        restart_delta: u32,
        total_restarts: u32,
    },
    /// Node status transition
    Status {
        old_status: String,
        new_status: String,
    },
    /// Topic partition-count change
    Partitions {
        old_partitions: u32,
        new_partitions: u32,
    },
}

impl ChangeDetail {
    /// Presence detail with only a state.
    pub fn state(state: impl Into<String>) -> Self {
        Self::Presence {
            state: Some(state.into()),
            version: None,
            partitions: None,
            host: None,
        }
    }

    /// Presence detail with nothing recorded.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Presence {
            state: None,
            version: None,
            partitions: None,
            host: None,
        }
    }
}

impl fmt::Display for ChangeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence {
                state,
                version,
                partitions,
                host,
            } => {
                let mut parts = Vec::new();
                if let Some(version) = version {
                    parts.push(format!("v{version}"));
                }
                if let Some(state) = state {
                    parts.push(state.clone());
                }
                if let Some(partitions) = partitions {
                    parts.push(format!("{partitions} partitions"));
                }
                if let Some(host) = host {
                    parts.push(host.clone());
                }
                write!(f, "{}", parts.join(", "))
            }
            Self::Phase {
                old_phase,
                new_phase,
            } => write!(f, "{old_phase} -> {new_phase}"),
            Self::Restarts {
                restart_delta,
                total_restarts,
            } => write!(f, "+{restart_delta} restarts ({total_restarts} total)"),
            Self::Status {
                old_status,
                new_status,
            } => write!(f, "{old_status} -> {new_status}"),
            Self::Partitions {
                old_partitions,
                new_partitions,
            } => write!(f, "{old_partitions} -> {new_partitions} partitions"),
        }
    }
}

/// One detected change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub entity: EntityKind,
    pub action: ChangeAction,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Owning message-queue instance (topics only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub detail: ChangeDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_hint: Option<SeverityHint>,
    /// Related to the monitored platform
    #[serde(default)]
    pub is_platform: bool,
    /// Assigned by the classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<SeverityTier>,
}

impl ChangeRecord {
    pub fn new(entity: EntityKind, action: ChangeAction, name: impl Into<String>) -> Self {
        Self {
            entity,
            action,
            name: name.into(),
            namespace: None,
            owner: None,
            detail: ChangeDetail::empty(),
            severity_hint: None,
            is_platform: false,
            tier: None,
        }
    }

    /// Record for an entity only in the current snapshot
    pub fn added(entity: EntityKind, name: impl Into<String>) -> Self {
        Self::new(entity, ChangeAction::Added, name)
    }

    /// Record for an entity only in the previous snapshot
    pub fn removed(entity: EntityKind, name: impl Into<String>) -> Self {
        Self::new(entity, ChangeAction::Removed, name)
    }

    /// Record for an entity present in both snapshots
    pub fn modified(entity: EntityKind, name: impl Into<String>, detail: ChangeDetail) -> Self {
        Self::new(entity, ChangeAction::Modified, name).with_detail(detail)
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }

    #[must_use]
    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: ChangeDetail) -> Self {
        self.detail = detail;
        self
    }

    #[must_use]
    pub const fn with_hint(mut self, hint: SeverityHint) -> Self {
        self.severity_hint = Some(hint);
        self
    }

    #[must_use]
    pub const fn platform(mut self, is_platform: bool) -> Self {
        self.is_platform = is_platform;
        self
    }

    /// Whether this is a workload restart record.
    #[must_use]
    pub const fn is_restart(&self) -> bool {
        matches!(self.entity, EntityKind::Workload)
            && matches!(self.detail, ChangeDetail::Restarts { .. })
    }

    /// Qualified display name (`namespace/name`, `instance/topic`).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match (&self.owner, &self.namespace) {
            (Some(owner), _) => format!("{owner}/{}", self.name),
            (None, Some(ns)) if !ns.is_empty() => format!("{ns}/{}", self.name),
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.entity, self.qualified_name(), self.action)?;
        let detail = self.detail.to_string();
        if !detail.is_empty() {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Records of one change computer, split by action.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub added: Vec<ChangeRecord>,
    pub removed: Vec<ChangeRecord>,
    pub modified: Vec<ChangeRecord>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// Append another set, keeping per-action order.
    pub fn extend(&mut self, other: Self) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.modified.extend(other.modified);
    }
}

/// Capture timestamps of the compared snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffMetadata {
    pub previous_timestamp: Option<String>,
    pub current_timestamp: Option<String>,
}

/// Records partitioned by action and, in parallel, by severity tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedChanges {
    pub additions: Vec<ChangeRecord>,
    pub removals: Vec<ChangeRecord>,
    pub modifications: Vec<ChangeRecord>,
    pub critical: Vec<ChangeRecord>,
    pub important: Vec<ChangeRecord>,
    pub informational: Vec<ChangeRecord>,
}

impl CategorizedChanges {
    /// Records in a severity tier.
    #[must_use]
    pub fn by_tier(&self, tier: SeverityTier) -> &[ChangeRecord] {
        match tier {
            SeverityTier::Critical => &self.critical,
            SeverityTier::Important => &self.important,
            SeverityTier::Informational => &self.informational,
        }
    }

    /// Records with an action.
    #[must_use]
    pub fn by_action(&self, action: ChangeAction) -> &[ChangeRecord] {
        match action {
            ChangeAction::Added => &self.additions,
            ChangeAction::Removed => &self.removals,
            ChangeAction::Modified => &self.modifications,
        }
    }

    /// Every record once, in action-partition order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.additions
            .iter()
            .chain(&self.removals)
            .chain(&self.modifications)
    }
}

/// Previous/current counts of one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDelta {
    pub previous: usize,
    pub current: usize,
    pub change: i64,
}

impl CountDelta {
    #[must_use]
    pub fn new(previous: usize, current: usize) -> Self {
        let to_i64 = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        Self {
            previous,
            current,
            change: to_i64(current) - to_i64(previous),
        }
    }
}

/// Number of records per partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub additions: usize,
    pub removals: usize,
    pub modifications: usize,
    pub critical: usize,
    pub important: usize,
    pub informational: usize,
}

impl ChangeCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }
}

/// Summary counters of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub components: CountDelta,
    pub platform_components: CountDelta,
    pub workloads: CountDelta,
    pub namespaces: CountDelta,
    pub message_queue_instances: CountDelta,
    pub change_counts: ChangeCounts,
}

impl DiffSummary {
    /// Compute entity count triples and partition sizes.
    #[must_use]
    pub fn compute(previous: &Snapshot, current: &Snapshot, changes: &CategorizedChanges) -> Self {
        Self {
            components: CountDelta::new(previous.components.len(), current.components.len()),
            platform_components: CountDelta::new(
                previous.platform_component_count(),
                current.platform_component_count(),
            ),
            workloads: CountDelta::new(previous.workloads.len(), current.workloads.len()),
            namespaces: CountDelta::new(previous.namespaces.len(), current.namespaces.len()),
            message_queue_instances: CountDelta::new(
                previous.message_queue_instance_count(),
                current.message_queue_instance_count(),
            ),
            change_counts: ChangeCounts {
                additions: changes.additions.len(),
                removals: changes.removals.len(),
                modifications: changes.modifications.len(),
                critical: changes.critical.len(),
                important: changes.important.len(),
                informational: changes.informational.len(),
            },
        }
    }

    /// Labelled count triples in report order.
    #[must_use]
    pub fn count_deltas(&self) -> [(&'static str, CountDelta); 5] {
        [
            ("components", self.components),
            ("platform_components", self.platform_components),
            ("workloads", self.workloads),
            ("namespaces", self.namespaces),
            ("message_queue_instances", self.message_queue_instances),
        ]
    }
}

/// Complete diff between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub metadata: DiffMetadata,
    pub time_elapsed: String,
    pub changes: CategorizedChanges,
    pub summary: DiffSummary,
}

impl SnapshotDiff {
    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.change_counts.total() > 0
    }

    #[must_use]
    pub fn has_critical(&self) -> bool {
        !self.changes.critical.is_empty()
    }

    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.summary.change_counts.total()
    }
}
