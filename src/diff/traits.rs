//! Trait definitions for diff computation strategies.
//!
//! Each entity kind has its own change computer, so kinds can be compared,
//! tested and extended independently.

use super::result::ChangeSet;
use crate::model::Snapshot;

/// Trait for computing the changes of one entity kind between snapshots.
///
/// Implementors return unclassified records: `tier` is left unset and is
/// assigned later by the classifier.
pub trait ChangeComputer: Send + Sync {
    /// Compute changes between the previous and current snapshot.
    fn compute(&self, previous: &Snapshot, current: &Snapshot) -> ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}
