//! Change computer implementations.
//!
//! This module provides one implementation of the `ChangeComputer` trait per
//! entity kind: components, workloads, namespaces, nodes, the message queue
//! and routes.

mod components;
mod message_queue;
mod namespaces;
mod nodes;
mod routes;
mod workloads;

pub use components::ComponentChangeComputer;
pub use message_queue::MessageQueueChangeComputer;
pub use namespaces::{DEFAULT_PLATFORM_KEYWORDS, NamespaceChangeComputer};
pub use nodes::NodeChangeComputer;
pub use routes::RouteChangeComputer;
pub use workloads::{DEFAULT_RESTART_THRESHOLD, WorkloadChangeComputer};

use super::result::{ChangeRecord, ChangeSet};
use indexmap::IndexMap;
use std::hash::Hash;

/// Align two identity-keyed maps.
///
/// Additions follow `current` order, removals follow `previous` order and
/// modifications (whatever `modified` pushes for entities in both) follow
/// `current` order.
pub(crate) fn compare_keyed<K, V>(
    previous: &IndexMap<K, &V>,
    current: &IndexMap<K, &V>,
    added: impl Fn(&K, &V) -> ChangeRecord,
    removed: impl Fn(&K, &V) -> ChangeRecord,
    mut modified: impl FnMut(&K, &V, &V, &mut Vec<ChangeRecord>),
) -> ChangeSet
where
    K: Hash + Eq,
{
    let mut set = ChangeSet::new();

    for (key, curr) in current {
        match previous.get(key) {
            Some(prev) => modified(key, prev, curr, &mut set.modified),
            None => set.added.push(added(key, curr)),
        }
    }

    for (key, prev) in previous {
        if !current.contains_key(key) {
            set.removed.push(removed(key, prev));
        }
    }

    set
}
