//! Aggregation of categorized workloads.

use super::categorizer::{CategorizedWorkload, CriticalityTier, LicensingClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Categorization summary document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationSummary {
    pub total_workloads: usize,
    pub licensing: LicensingSummary,
    pub criticality: CriticalitySummary,
    pub workloads: RoleSummary,
    pub resources: ResourceTotals,
    pub categorized_workloads: Vec<CategorizedWorkload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicensingSummary {
    /// Workload count per occurring class
    pub breakdown: BTreeMap<LicensingClass, usize>,
    /// Total VPC, rounded to 2 decimals
    pub total_vpc: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalitySummary {
    pub breakdown: BTreeMap<CriticalityTier, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub business_workloads: usize,
    pub infrastructure: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub total_cpu_requests_cores: f64,
    pub total_memory_requests_gb: f64,
}

impl CategorizationSummary {
    /// Reduce a categorized collection into a summary.
    ///
    /// Sums are accumulated at full precision; only the reported totals are
    /// rounded.
    #[must_use]
    pub fn from_workloads(categorized: Vec<CategorizedWorkload>) -> Self {
        let mut licensing_breakdown = BTreeMap::new();
        let mut criticality_breakdown = BTreeMap::new();
        let mut total_vpc = 0.0;
        let mut total_cpu = 0.0;
        let mut total_memory: u128 = 0;
        let mut business = 0;

        for cat in &categorized {
            *licensing_breakdown.entry(cat.licensing).or_insert(0) += 1;
            *criticality_breakdown.entry(cat.criticality).or_insert(0) += 1;
            total_vpc += cat.vpc_contribution;
            total_cpu += cat.resources.cpu_requests;
            total_memory += u128::from(cat.resources.memory_requests);
            if cat.is_workload {
                business += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let memory_gb = total_memory as f64 / BYTES_PER_GB;

        Self {
            total_workloads: categorized.len(),
            licensing: LicensingSummary {
                breakdown: licensing_breakdown,
                total_vpc: round2(total_vpc),
            },
            criticality: CriticalitySummary {
                breakdown: criticality_breakdown,
            },
            workloads: RoleSummary {
                business_workloads: business,
                infrastructure: categorized.len() - business,
            },
            resources: ResourceTotals {
                total_cpu_requests_cores: round2(total_cpu),
                total_memory_requests_gb: round2(memory_gb),
            },
            categorized_workloads: categorized,
        }
    }

    /// Count of workloads in `class`.
    #[must_use]
    pub fn licensing_count(&self, class: LicensingClass) -> usize {
        self.licensing.breakdown.get(&class).copied().unwrap_or(0)
    }

    /// Count of workloads in `tier`.
    #[must_use]
    pub fn criticality_count(&self, tier: CriticalityTier) -> usize {
        self.criticality.breakdown.get(&tier).copied().unwrap_or(0)
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceRequests;

    fn cat(licensing: LicensingClass, tier: CriticalityTier, cpu: f64, mem: u64) -> CategorizedWorkload {
        CategorizedWorkload {
            name: "w".to_string(),
            namespace: "ns".to_string(),
            licensing,
            criticality: tier,
            is_workload: tier == CriticalityTier::Critical,
            vpc_contribution: if licensing == LicensingClass::Cp4iLicensed { cpu } else { 0.0 },
            resources: ResourceRequests {
                cpu_requests: cpu,
                memory_requests: mem,
                ..ResourceRequests::default()
            },
        }
    }

    #[test]
    fn test_empty_collection() {
        let summary = CategorizationSummary::from_workloads(Vec::new());
        assert_eq!(summary.total_workloads, 0);
        assert!(summary.licensing.breakdown.is_empty());
        assert_eq!(summary.licensing.total_vpc, 0.0);
        assert_eq!(summary.workloads.infrastructure, 0);
    }

    #[test]
    fn test_counts_and_totals() {
        let summary = CategorizationSummary::from_workloads(vec![
            cat(LicensingClass::Cp4iLicensed, CriticalityTier::Critical, 0.5, 1024 * 1024 * 1024),
            cat(LicensingClass::Cp4iLicensed, CriticalityTier::Important, 0.25, 512 * 1024 * 1024),
            cat(LicensingClass::Free, CriticalityTier::Important, 2.0, 0),
        ]);

        assert_eq!(summary.total_workloads, 3);
        assert_eq!(summary.licensing_count(LicensingClass::Cp4iLicensed), 2);
        assert_eq!(summary.licensing_count(LicensingClass::Platform), 0);
        assert!(!summary.licensing.breakdown.contains_key(&LicensingClass::Platform));
        assert_eq!(summary.criticality_count(CriticalityTier::Important), 2);
        assert!((summary.licensing.total_vpc - 0.75).abs() < 1e-9);
        assert!((summary.resources.total_cpu_requests_cores - 2.75).abs() < 1e-9);
        assert!((summary.resources.total_memory_requests_gb - 1.5).abs() < 1e-9);
        assert_eq!(summary.workloads.business_workloads, 1);
        assert_eq!(summary.workloads.infrastructure, 2);
    }

    #[test]
    fn test_rounding_only_at_boundary() {
        // 3 x 0.333 = 0.999 -> 1.0; rounding each first would give 0.99
        let workloads = (0..3)
            .map(|_| cat(LicensingClass::Cp4iLicensed, CriticalityTier::Optional, 0.333, 0))
            .collect();
        let summary = CategorizationSummary::from_workloads(workloads);
        assert!((summary.licensing.total_vpc - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_round2() {
        assert!((round2(1.234_9) - 1.23).abs() < 1e-9);
        assert!((round2(0.005_1) - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_json_shape() {
        let summary = CategorizationSummary::from_workloads(vec![cat(
            LicensingClass::Free,
            CriticalityTier::Optional,
            1.0,
            0,
        )]);
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["licensing"]["breakdown"]["free"], 1);
        assert_eq!(json["criticality"]["breakdown"]["optional"], 1);
        assert_eq!(json["workloads"]["infrastructure"], 1);
        assert!(json["resources"]["total_memory_requests_gb"].is_number());
        assert_eq!(json["categorized_workloads"][0]["licensing"], "free");
    }
}
