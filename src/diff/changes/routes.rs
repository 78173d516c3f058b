//! Route change computer implementation.

use super::compare_keyed;
use crate::diff::result::{ChangeDetail, ChangeRecord, ChangeSet};
use crate::diff::traits::ChangeComputer;
use crate::model::{EntityKind, Route, Snapshot};

/// Computes route additions and removals. Routes have no modification
/// trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteChangeComputer;

impl RouteChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn presence(route: &Route) -> ChangeDetail {
    ChangeDetail::Presence {
        state: route.service.clone(),
        version: None,
        partitions: None,
        host: route.host.clone().or_else(|| route.url.clone()),
    }
}

impl ChangeComputer for RouteChangeComputer {
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet {
        compare_keyed(
            &previous.route_map(),
            &current.route_map(),
            |_, r| {
                ChangeRecord::added(EntityKind::Route, &r.name)
                    .in_namespace(&r.namespace)
                    .with_detail(presence(r))
            },
            |_, r| {
                ChangeRecord::removed(EntityKind::Route, &r.name)
                    .in_namespace(&r.namespace)
                    .with_detail(presence(r))
            },
            |_, _, _, _| {},
        )
    }

    fn name(&self) -> &str {
        "routes"
    }
}
