//! Component change computer implementation.

use super::compare_keyed;
use crate::diff::result::{ChangeDetail, ChangeRecord, ChangeSet};
use crate::diff::traits::ChangeComputer;
use crate::model::{Component, EntityKind, Snapshot};

/// Computes component-level changes between snapshots.
///
/// Components are keyed by `(namespace, name)`; a phase change is the only
/// modification tracked. Removed components are not platform-flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentChangeComputer;

impl ComponentChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn presence(component: &Component) -> ChangeDetail {
    ChangeDetail::Presence {
        state: Some(component.phase.clone()),
        version: component.version.clone(),
        partitions: None,
        host: None,
    }
}

impl ChangeComputer for ComponentChangeComputer {
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet {
        compare_keyed(
            &previous.component_map(),
            &current.component_map(),
            |_, c| {
                ChangeRecord::added(EntityKind::Component, &c.name)
                    .in_namespace(&c.namespace)
                    .with_detail(presence(c))
                    .platform(c.is_platform)
            },
            |_, c| {
                ChangeRecord::removed(EntityKind::Component, &c.name)
                    .in_namespace(&c.namespace)
                    .with_detail(presence(c))
            },
            |_, old, new, out| {
                if old.phase != new.phase {
                    out.push(
                        ChangeRecord::modified(
                            EntityKind::Component,
                            &new.name,
                            ChangeDetail::Phase {
                                old_phase: old.phase.clone(),
                                new_phase: new.phase.clone(),
                            },
                        )
                        .in_namespace(&new.namespace)
                        .platform(new.is_platform || old.is_platform),
                    );
                }
            },
        )
    }

    fn name(&self) -> &str {
        "components"
    }
}
