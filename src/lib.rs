//! **Snapshot diff and workload categorization for container platform clusters.**
//!
//! `snapdiff` compares two point-in-time cluster snapshots and reports what
//! changed, ranked by severity, and tags every workload with a licensing
//! class, a criticality tier and a business/infrastructure role so licensed
//! capacity (VPC) can be totalled.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Snapshot`] document written by the collector. Every
//!   section except entity names is optional.
//! - **[`diff`]**: the [`DiffEngine`] runs one change computer per entity kind,
//!   classifies each record as critical, important or informational, and
//!   builds a [`SnapshotDiff`].
//! - **[`matching`]**: rule configuration and the ordered rule chains that
//!   decide the first matching outcome for a workload.
//! - **[`categorize`]**: the [`ResourceCategorizer`] and the
//!   [`CategorizationSummary`] aggregate.
//! - **[`reports`]**: JSON and terminal summary output.
//! - **[`config`]**, **[`pipeline`]**, **[`cli`]**: the application layer behind
//!   the `snapdiff` binary.
//!
//! ## Diffing Two Snapshots
//!
//! ```no_run
//! use std::path::Path;
//! use snapdiff::{DiffEngine, Snapshot};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let previous = Snapshot::from_file(Path::new("snapshot-0900.json"))?;
//!     let current = Snapshot::from_file(Path::new("snapshot-1000.json"))?;
//!
//!     let diff = DiffEngine::new().diff(&previous, &current);
//!     println!("{} changes over {}", diff.total_changes(), diff.time_elapsed);
//!     for change in &diff.changes.critical {
//!         println!("  ! {change}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Categorizing Workloads
//!
//! ```no_run
//! use std::path::Path;
//! use snapdiff::{CategorizationSummary, ResourceCategorizer, RuleConfiguration, Snapshot};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rules = RuleConfiguration::from_file(Path::new("categories.yaml"))?;
//!     let snapshot = Snapshot::from_file(Path::new("snapshot.json"))?;
//!
//!     let categorizer = ResourceCategorizer::new(&rules);
//!     let summary =
//!         CategorizationSummary::from_workloads(categorizer.categorize_all(&snapshot.workloads));
//!     println!("Licensed VPC: {:.2}", summary.licensing.total_vpc);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod categorize;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use categorize::{
    CategorizationSummary, CategorizedWorkload, CriticalityTier, Explanation, LicensingClass,
    ResourceCategorizer,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use diff::{
    ChangeAction, ChangeComputer, ChangeRecord, DiffEngine, SeverityTier, SnapshotDiff,
};
pub use error::{ErrorContext, Result, SnapdiffError};
pub use matching::{RuleChain, RuleConfiguration};
pub use model::{EntityKind, Snapshot, Workload};
pub use reports::{ReportFormat, ReportGenerator};
