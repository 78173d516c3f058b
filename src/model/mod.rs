//! Snapshot data model.
//!
//! A [`Snapshot`] is the point-in-time capture written by the cluster collector.
//! The core only ever reads snapshots; every section except entity names is
//! optional so that partially collected documents still load.

mod identifiers;
mod snapshot;

pub use identifiers::{EntityKind, NamespacedKey, TopicKey};
pub use snapshot::{
    Component, MessageQueue, MessageQueueInstance, Namespace, Node, ResourceRequests, Route,
    Snapshot, SnapshotMetadata, Topic, UNKNOWN_PHASE, Workload, is_ready_status, parse_timestamp,
};
