//! Namespace change computer implementation.

use super::compare_keyed;
use crate::diff::result::{ChangeAction, ChangeDetail, ChangeRecord, ChangeSet};
use crate::diff::traits::ChangeComputer;
use crate::model::{EntityKind, Namespace, Snapshot};

/// Name fragments that mark a namespace as platform-related.
pub const DEFAULT_PLATFORM_KEYWORDS: &[&str] =
    &["cp4i", "integration", "ibm", "kafka", "mq", "ace", "apic"];

/// Computes namespace additions and removals. Only additions are checked
/// against the platform listing and keywords.
#[derive(Debug, Clone)]
pub struct NamespaceChangeComputer {
    keywords: Vec<String>,
}

impl NamespaceChangeComputer {
    /// Create a computer that flags namespaces containing any of `keywords`.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Listed as a platform namespace, or the name contains a keyword.
    fn is_platform(&self, namespace: &str, snapshot: &Snapshot) -> bool {
        if snapshot.is_platform_namespace(namespace) {
            return true;
        }
        let lower = namespace.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    fn record(action: ChangeAction, ns: &Namespace) -> ChangeRecord {
        let detail = ns
            .status
            .as_deref()
            .map_or_else(ChangeDetail::empty, ChangeDetail::state);
        ChangeRecord::new(EntityKind::Namespace, action, &ns.name).with_detail(detail)
    }
}

impl Default for NamespaceChangeComputer {
    fn default() -> Self {
        Self::new(DEFAULT_PLATFORM_KEYWORDS)
    }
}

impl ChangeComputer for NamespaceChangeComputer {
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet {
        compare_keyed(
            &previous.namespace_map(),
            &current.namespace_map(),
            |_, ns| {
                Self::record(ChangeAction::Added, ns).platform(self.is_platform(&ns.name, current))
            },
            // Removals are never platform-flagged.
            |_, ns| Self::record(ChangeAction::Removed, ns),
            |_, _, _, _| {},
        )
    }

    fn name(&self) -> &str {
        "namespaces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespace(name: &str) -> Namespace {
        Namespace {
            name: name.to_string(),
            status: Some("Active".to_string()),
            labels: Default::default(),
            annotations: Default::default(),
        }
    }

    #[test]
    fn test_new_namespace_is_addition() {
        let previous = Snapshot::default();
        let current = Snapshot {
            namespaces: vec![namespace("integration-demo")],
            ..Snapshot::default()
        };

        let set = NamespaceChangeComputer::default().compute(&previous, &current);
        assert_eq!(set.added.len(), 1);
        assert_eq!(set.added[0].name, "integration-demo");
        // keyword match
        assert!(set.added[0].is_platform);
    }

    #[test]
    fn test_removed_namespace_is_not_platform_flagged() {
        let previous = Snapshot {
            namespaces: vec![namespace("payments"), namespace("cp4i-tracing")],
            platform_namespaces: ["payments".to_string()].into_iter().collect(),
            ..Snapshot::default()
        };
        let set = NamespaceChangeComputer::default().compute(&previous, &Snapshot::default());
        assert_eq!(set.removed.len(), 2);
        assert_eq!(set.removed[0].action, ChangeAction::Removed);
        assert!(set.removed.iter().all(|r| !r.is_platform));
    }

    #[test]
    fn test_plain_namespace_not_platform() {
        let current = Snapshot {
            namespaces: vec![namespace("default")],
            ..Snapshot::default()
        };
        let set = NamespaceChangeComputer::default().compute(&Snapshot::default(), &current);
        assert!(!set.added[0].is_platform);

        let custom = NamespaceChangeComputer::new(&["DEF"]);
        assert!(custom.compute(&Snapshot::default(), &current).added[0].is_platform);
    }

    #[test]
    fn test_status_change_is_not_reported() {
        let mut terminating = namespace("shop");
        terminating.status = Some("Terminating".to_string());
        let previous = Snapshot {
            namespaces: vec![namespace("shop")],
            ..Snapshot::default()
        };
        let current = Snapshot {
            namespaces: vec![terminating],
            ..Snapshot::default()
        };
        assert!(NamespaceChangeComputer::default().compute(&previous, &current).is_empty());
    }
}
