//! Node change computer implementation.

use super::compare_keyed;
use crate::diff::result::{ChangeDetail, ChangeRecord, ChangeSet, SeverityHint};
use crate::diff::traits::ChangeComputer;
use crate::model::{EntityKind, Node, Snapshot, is_ready_status};

/// Computes node changes. A status transition to anything but ready is
/// hinted critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeChangeComputer;

impl NodeChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn presence(node: &Node) -> ChangeDetail {
    ChangeDetail::Presence {
        state: Some(node.status.clone()),
        version: node.version.clone(),
        partitions: None,
        host: None,
    }
}

impl ChangeComputer for NodeChangeComputer {
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet {
        compare_keyed(
            &previous.node_map(),
            &current.node_map(),
            |_, n| ChangeRecord::added(EntityKind::Node, &n.name).with_detail(presence(n)),
            |_, n| ChangeRecord::removed(EntityKind::Node, &n.name).with_detail(presence(n)),
            |_, old, new, out| {
                if old.status == new.status {
                    return;
                }
                let hint = if is_ready_status(&new.status) {
                    SeverityHint::Info
                } else {
                    SeverityHint::Critical
                };
                out.push(
                    ChangeRecord::modified(
                        EntityKind::Node,
                        &new.name,
                        ChangeDetail::Status {
                            old_status: old.status.clone(),
                            new_status: new.status.clone(),
                        },
                    )
                    .with_hint(hint),
                );
            },
        )
    }

    fn name(&self) -> &str {
        "nodes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, status: &str) -> Node {
        Node {
            name: name.to_string(),
            status: status.to_string(),
            cpu_capacity: Some("8".to_string()),
            memory_capacity: None,
            version: None,
        }
    }

    fn nodes(list: Vec<Node>) -> Snapshot {
        Snapshot {
            nodes: list,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_node_going_not_ready_is_critical() {
        let set = NodeChangeComputer::new().compute(
            &nodes(vec![node("worker-3", "ready")]),
            &nodes(vec![node("worker-3", "not-ready")]),
        );
        assert_eq!(set.modified.len(), 1);
        assert_eq!(set.modified[0].severity_hint, Some(SeverityHint::Critical));
    }

    #[test]
    fn test_node_recovering_is_info() {
        let set = NodeChangeComputer::new().compute(
            &nodes(vec![node("worker-1", "NotReady")]),
            &nodes(vec![node("worker-1", "Ready")]),
        );
        assert_eq!(set.modified[0].severity_hint, Some(SeverityHint::Info));
    }

    #[test]
    fn test_unchanged_status_no_record() {
        let snapshot = nodes(vec![node("master-0", "Ready")]);
        assert!(NodeChangeComputer::new().compute(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn test_added_and_removed_nodes() {
        let set = NodeChangeComputer::new().compute(
            &nodes(vec![node("worker-1", "Ready")]),
            &nodes(vec![node("worker-2", "Ready")]),
        );
        assert_eq!(set.added[0].name, "worker-2");
        assert_eq!(set.removed[0].name, "worker-1");
        assert_eq!(set.added[0].severity_hint, None);
    }
}
