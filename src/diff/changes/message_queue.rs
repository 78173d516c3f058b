//! Message-queue change computer implementation.
//!
//! Compares instances by name and topics by `(instance, topic)`. An absent
//! message-queue section means the data was not collected, so the comparison
//! only runs when both snapshots carry one.

use super::compare_keyed;
use crate::diff::result::{ChangeDetail, ChangeRecord, ChangeSet};
use crate::diff::traits::ChangeComputer;
use crate::model::{EntityKind, MessageQueue, MessageQueueInstance, Snapshot, Topic, TopicKey};
use indexmap::IndexMap;

/// Computes message-queue instance and topic changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageQueueChangeComputer;

impl MessageQueueChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn instances(previous: &MessageQueue, current: &MessageQueue) -> ChangeSet {
        let record = |instance: &MessageQueueInstance, added: bool| -> ChangeRecord {
            let record = if added {
                ChangeRecord::added(EntityKind::MessageQueueInstance, &instance.name)
            } else {
                ChangeRecord::removed(EntityKind::MessageQueueInstance, &instance.name)
            };
            record
                .with_namespace(instance.namespace.as_deref())
                .with_detail(ChangeDetail::Presence {
                    state: instance.status.clone(),
                    version: None,
                    partitions: None,
                    host: instance.bootstrap_server.clone(),
                })
        };

        compare_keyed(
            &instance_map(previous),
            &instance_map(current),
            |_, i| record(i, true),
            |_, i| record(i, false),
            |_, _, _, _| {},
        )
    }

    fn topics(previous: &MessageQueue, current: &MessageQueue) -> ChangeSet {
        let presence = |topic: &Topic| ChangeDetail::Presence {
            state: topic.category.clone(),
            version: None,
            partitions: Some(topic.partitions),
            host: None,
        };

        compare_keyed(
            &previous.topic_map(),
            &current.topic_map(),
            |key: &TopicKey, t| {
                ChangeRecord::added(EntityKind::Topic, &t.name)
                    .owned_by(&key.instance)
                    .with_namespace(t.namespace.as_deref())
                    .with_detail(presence(t))
            },
            |key: &TopicKey, t| {
                ChangeRecord::removed(EntityKind::Topic, &t.name)
                    .owned_by(&key.instance)
                    .with_namespace(t.namespace.as_deref())
                    .with_detail(presence(t))
            },
            |key: &TopicKey, old, new, out| {
                if old.partitions != new.partitions {
                    out.push(
                        ChangeRecord::modified(
                            EntityKind::Topic,
                            &new.name,
                            ChangeDetail::Partitions {
                                old_partitions: old.partitions,
                                new_partitions: new.partitions,
                            },
                        )
                        .owned_by(&key.instance)
                        .with_namespace(new.namespace.as_deref()),
                    );
                }
            },
        )
    }
}

fn instance_map(mq: &MessageQueue) -> IndexMap<&str, &MessageQueueInstance> {
    mq.instances.iter().map(|i| (i.name.as_str(), i)).collect()
}

impl ChangeComputer for MessageQueueChangeComputer {
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet {
        let (Some(previous), Some(current)) = (&previous.message_queue, &current.message_queue)
        else {
            tracing::debug!("Message-queue section missing from a snapshot, skipping");
            return ChangeSet::new();
        };

        let mut set = Self::instances(previous, current);
        set.extend(Self::topics(previous, current));
        set
    }

    fn name(&self) -> &str {
        "message_queue"
    }
}
