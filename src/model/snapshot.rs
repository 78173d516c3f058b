//! Snapshot document and its entity types.

use super::{NamespacedKey, TopicKey};
use crate::error::{ErrorContext, Result, SnapdiffError};
use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Phase reported when the collector could not determine one.
pub const UNKNOWN_PHASE: &str = "Unknown";

fn unknown_phase() -> String {
    UNKNOWN_PHASE.to_string()
}

// Collectors write `null` for fields they could not read; treat it like a
// missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown_phase<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_phase))
}

fn null_as_one<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_partitions))
}

/// `components` as a flat list, or the collector's `operators` block whose
/// `all` list holds every installed operator.
#[derive(Deserialize)]
#[serde(untagged)]
enum ComponentList {
    Flat(Vec<Component>),
    Grouped {
        #[serde(default, deserialize_with = "null_as_default")]
        all: Vec<Component>,
    },
}

fn component_list<'de, D>(deserializer: D) -> std::result::Result<Vec<Component>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ComponentList>::deserialize(deserializer)? {
        Some(ComponentList::Flat(components) | ComponentList::Grouped { all: components }) => {
            components
        }
        None => Vec::new(),
    })
}

/// A point-in-time capture of cluster and platform state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Capture timestamp (RFC 3339 or naive ISO-8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<String>,
    /// Collector metadata block written by older collectors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<Node>,
    #[serde(deserialize_with = "null_as_default")]
    pub namespaces: Vec<Namespace>,
    #[serde(alias = "operators", deserialize_with = "component_list")]
    pub components: Vec<Component>,
    #[serde(alias = "pods", deserialize_with = "null_as_default")]
    pub workloads: Vec<Workload>,
    #[serde(deserialize_with = "null_as_default")]
    pub routes: Vec<Route>,
    #[serde(alias = "kafka")]
    pub message_queue: Option<MessageQueue>,
    #[serde(alias = "cp4i_namespaces", deserialize_with = "null_as_default")]
    pub platform_namespaces: BTreeSet<String>,
}

/// Collector metadata (legacy layout).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotMetadata {
    pub collection_timestamp: Option<String>,
}

/// A compute node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Readiness status (`Ready`, `NotReady`, `Unknown`)
    #[serde(default = "unknown_phase", deserialize_with = "null_as_unknown_phase")]
    pub status: String,
    #[serde(default)]
    pub cpu_capacity: Option<String>,
    #[serde(default)]
    pub memory_capacity: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Node {
    /// Whether the node reports a ready status.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        is_ready_status(&self.status)
    }
}

/// Case-insensitive readiness check shared by nodes and node change records.
#[must_use]
pub fn is_ready_status(status: &str) -> bool {
    status.eq_ignore_ascii_case("ready")
}

/// A namespace / project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
}

/// An installed platform component (operator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "unknown_phase", deserialize_with = "null_as_unknown_phase")]
    pub phase: String,
    #[serde(default, alias = "is_cp4i", deserialize_with = "null_as_default")]
    pub is_platform: bool,
}

impl Component {
    /// Display name, falling back to the resource name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn key(&self) -> NamespacedKey {
        NamespacedKey::new(&self.namespace, &self.name)
    }
}

/// A running workload (pod).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(default = "unknown_phase", deserialize_with = "null_as_unknown_phase")]
    pub phase: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ready_count: u32,
    #[serde(default, alias = "restarts", deserialize_with = "null_as_default")]
    pub restart_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: ResourceRequests,
}

impl Workload {
    /// Create a workload with only identity fields set.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            phase: unknown_phase(),
            ready_count: 0,
            restart_count: 0,
            labels: BTreeMap::new(),
            resources: ResourceRequests::default(),
        }
    }

    #[must_use]
    pub fn key(&self) -> NamespacedKey {
        NamespacedKey::new(&self.namespace, &self.name)
    }
}

/// Declared resource requests and limits of a workload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRequests {
    /// Requested CPU in cores
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_requests: f64,
    /// CPU limit in cores
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_limits: f64,
    /// Requested memory in bytes
    #[serde(deserialize_with = "null_as_default")]
    pub memory_requests: u64,
    /// Memory limit in bytes
    #[serde(deserialize_with = "null_as_default")]
    pub memory_limits: u64,
}

/// A network route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Backing service name
    #[serde(default, alias = "backing_service")]
    pub service: Option<String>,
}

impl Route {
    #[must_use]
    pub fn key(&self) -> NamespacedKey {
        NamespacedKey::new(&self.namespace, &self.name)
    }
}

/// Message-queue section of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageQueue {
    #[serde(deserialize_with = "null_as_default")]
    pub instances: Vec<MessageQueueInstance>,
    /// Topics grouped by owning instance name
    #[serde(deserialize_with = "null_as_default")]
    pub topics: IndexMap<String, Vec<Topic>>,
}

impl MessageQueue {
    /// Topics keyed by `(instance, topic)`, later duplicates winning.
    #[must_use]
    pub fn topic_map(&self) -> IndexMap<TopicKey, &Topic> {
        let mut map = IndexMap::new();
        for (instance, topics) in &self.topics {
            for topic in topics {
                map.insert(TopicKey::new(instance, &topic.name), topic);
            }
        }
        map
    }
}

/// A message-queue instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageQueueInstance {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "bootstrap")]
    pub bootstrap_server: Option<String>,
}

/// A message-queue topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default = "default_partitions", deserialize_with = "null_as_one")]
    pub partitions: u32,
    #[serde(default = "default_partitions", deserialize_with = "null_as_one")]
    pub replicas: u32,
    #[serde(default)]
    pub category: Option<String>,
}

const fn default_partitions() -> u32 {
    1
}

impl Snapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json).context("decoding JSON")?;
        Ok(snapshot)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SnapdiffError::io(path, e))?;
        Self::from_json_str(&content).with_context(|| format!("loading {}", path.display()))
    }

    /// Raw capture timestamp, preferring the top-level field.
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.collected_at.as_deref().or_else(|| {
            self.metadata
                .as_ref()
                .and_then(|m| m.collection_timestamp.as_deref())
        })
    }

    /// Capture time normalized to UTC, if the timestamp parses.
    ///
    /// Naive timestamps (no offset) are taken as UTC.
    #[must_use]
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.timestamp()?)
    }

    /// Whether `namespace` is listed as a platform namespace.
    #[must_use]
    pub fn is_platform_namespace(&self, namespace: &str) -> bool {
        self.platform_namespaces.contains(namespace)
    }

    #[must_use]
    pub fn node_map(&self) -> IndexMap<&str, &Node> {
        self.nodes.iter().map(|n| (n.name.as_str(), n)).collect()
    }

    #[must_use]
    pub fn namespace_map(&self) -> IndexMap<&str, &Namespace> {
        self.namespaces.iter().map(|n| (n.name.as_str(), n)).collect()
    }

    #[must_use]
    pub fn component_map(&self) -> IndexMap<NamespacedKey, &Component> {
        self.components.iter().map(|c| (c.key(), c)).collect()
    }

    #[must_use]
    pub fn workload_map(&self) -> IndexMap<NamespacedKey, &Workload> {
        self.workloads.iter().map(|w| (w.key(), w)).collect()
    }

    #[must_use]
    pub fn route_map(&self) -> IndexMap<NamespacedKey, &Route> {
        self.routes.iter().map(|r| (r.key(), r)).collect()
    }

    /// Number of components flagged as platform components.
    #[must_use]
    pub fn platform_component_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_platform).count()
    }

    /// Number of message-queue instances, zero when the section is absent.
    #[must_use]
    pub fn message_queue_instance_count(&self) -> usize {
        self.message_queue.as_ref().map_or(0, |mq| mq.instances.len())
    }
}

/// Parse an RFC 3339 or naive ISO-8601 timestamp into UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
