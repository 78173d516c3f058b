//! Structural diff engine for cluster snapshots.
//!
//! # Architecture
//!
//! - [`ChangeComputer`](traits::ChangeComputer): one implementation per entity
//!   kind in the [`changes`] module, producing unclassified records
//! - [`ChangeClassifier`]: assigns every record exactly one severity tier
//! - [`DiffEngine`]: runs the computers in a fixed order, classifies, and
//!   builds the [`SnapshotDiff`] document
//!
//! # Example
//!
//! ```ignore
//! use snapdiff::diff::DiffEngine;
//!
//! let engine = DiffEngine::new().with_restart_threshold(5);
//! let diff = engine.diff(&previous, &current);
//! for change in &diff.changes.critical {
//!     println!("{change}");
//! }
//! ```

pub mod changes;
mod classifier;
mod elapsed;
mod engine;
mod result;
pub mod traits;

pub use classifier::ChangeClassifier;
pub use elapsed::{UNKNOWN_ELAPSED, format_elapsed};
pub use engine::DiffEngine;
pub use result::{
    CategorizedChanges, ChangeAction, ChangeCounts, ChangeDetail, ChangeRecord, ChangeSet,
    CountDelta, DiffMetadata, DiffSummary, SeverityHint, SeverityTier, SnapshotDiff,
};
pub use traits::ChangeComputer;
