//! Workload categorization and aggregation.
//!
//! [`ResourceCategorizer`] tags each workload with a licensing class, a
//! criticality tier, a business/infrastructure role and a VPC contribution.
//! [`CategorizationSummary`] reduces the tagged collection into counts and
//! resource totals.
//!
//! ```ignore
//! use snapdiff::categorize::{CategorizationSummary, ResourceCategorizer};
//!
//! let categorizer = ResourceCategorizer::new(&rules);
//! let summary = CategorizationSummary::from_workloads(categorizer.categorize_all(&snapshot.workloads));
//! println!("Total VPC: {}", summary.licensing.total_vpc);
//! ```

mod categorizer;
mod summary;

pub use categorizer::{
    CategorizedWorkload, CriticalityTier, Explanation, LicensingClass, ResourceCategorizer,
};
pub use summary::{
    CategorizationSummary, CriticalitySummary, LicensingSummary, ResourceTotals, RoleSummary,
    round2,
};
