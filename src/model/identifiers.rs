//! Identity keys for snapshot entities.
//!
//! Entities are aligned across snapshots purely by these keys. There is no
//! rename detection: a renamed resource produces one removal and one addition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of snapshot entity a change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Installed platform component (operator)
    Component,
    /// Running workload (pod)
    Workload,
    /// Namespace / project
    Namespace,
    /// Compute node
    Node,
    /// Message-queue (event streaming) instance
    MessageQueueInstance,
    /// Message-queue topic
    Topic,
    /// Network route
    Route,
}

impl EntityKind {
    /// Whether changes of this kind belong to the message-queue subsystem.
    #[must_use]
    pub const fn is_message_queue(self) -> bool {
        matches!(self, Self::MessageQueueInstance | Self::Topic)
    }

    /// Human-readable label used in text reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Workload => "workload",
            Self::Namespace => "namespace",
            Self::Node => "node",
            Self::MessageQueueInstance => "mq-instance",
            Self::Topic => "topic",
            Self::Route => "route",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `(namespace, name)` identity used for workloads, routes and components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey {
    pub namespace: String,
    pub name: String,
}

impl NamespacedKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// `(instance, topic)` identity for message-queue topics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicKey {
    pub instance: String,
    pub topic: String,
}

impl TopicKey {
    pub fn new(instance: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            topic: topic.into(),
        }
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.instance, self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_key_display() {
        let key = NamespacedKey::new("shop", "pay-api");
        assert_eq!(key.to_string(), "shop/pay-api");
    }

    #[test]
    fn test_keys_distinguish_namespace() {
        let a = NamespacedKey::new("a", "web");
        let b = NamespacedKey::new("b", "web");
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EntityKind::MessageQueueInstance).expect("serialize");
        assert_eq!(json, "\"message_queue_instance\"");
        assert!(EntityKind::Topic.is_message_queue());
        assert!(!EntityKind::Route.is_message_queue());
    }
}
