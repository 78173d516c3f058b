//! Rule configuration document.
//!
//! Rules are loaded from a YAML file with three groups:
//!
//! ```yaml
//! licensing:
//!   cp4i_licensed:
//!     patterns: ["ibm-eventstreams", "ibm-mq"]
//!   platform:
//!     patterns: ["openshift-"]
//!     namespaces: ["openshift-"]
//!   free:
//!     patterns: ["nginx", "redis"]
//! criticality:
//!   critical:
//!     patterns: ["ibm-mq"]
//!     pod_patterns: ["etcd-"]
//!     namespaces: ["openshift-etcd"]
//!   important:
//!     labels:
//!       app.kubernetes.io/part-of: ["payments"]
//!   optional:
//!     patterns: ["demo-"]
//! workloads:
//!   infrastructure_patterns: ["router-"]
//!   infrastructure_namespaces: ["openshift-"]
//!   business_workload_patterns: ["pay-"]
//!   business_workload_labels:
//!     tier: ["business"]
//! ```
//!
//! Every group and every list is optional; a missing group simply means the
//! defaults apply.

use crate::error::{ErrorContext, Result, SnapdiffError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Label key → allowed values.
pub type LabelRules = BTreeMap<String, Vec<String>>;

/// Root rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfiguration {
    pub licensing: LicensingRules,
    pub criticality: CriticalityRules,
    pub workloads: WorkloadRules,
}

/// One tier's matchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSet {
    /// Workload-name patterns
    pub patterns: Vec<String>,
    /// Additional workload-name patterns checked after `patterns`
    pub pod_patterns: Vec<String>,
    /// Namespace patterns
    pub namespaces: Vec<String>,
    /// Label value sets
    pub labels: LabelRules,
}

impl RuleSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.pod_patterns.is_empty()
            && self.namespaces.is_empty()
            && self.labels.is_empty()
    }

    fn pattern_count(&self) -> usize {
        self.patterns.len() + self.pod_patterns.len() + self.namespaces.len()
    }
}

/// Licensing rules, checked `cp4i_licensed` → `platform` → `free`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LicensingRules {
    pub cp4i_licensed: RuleSet,
    #[serde(alias = "openshift_platform")]
    pub platform: RuleSet,
    pub free: RuleSet,
}

/// Criticality rules, checked `critical` → `important` → `optional`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CriticalityRules {
    pub critical: RuleSet,
    pub important: RuleSet,
    pub optional: RuleSet,
}

/// Business vs infrastructure rules. Infrastructure rules exclude first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadRules {
    pub infrastructure_patterns: Vec<String>,
    pub infrastructure_namespaces: Vec<String>,
    pub business_workload_patterns: Vec<String>,
    pub business_workload_labels: LabelRules,
}

impl RuleConfiguration {
    /// Load rules from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit; treat it as "no rules".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).context("decoding YAML")?;
        Ok(config)
    }

    /// Load rules from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SnapdiffError::io(path, e))?;
        Self::from_yaml(&content).with_context(|| format!("loading {}", path.display()))
    }

    /// Every tiered rule set with its dotted location, in evaluation order.
    #[must_use]
    pub fn rule_sets(&self) -> [(&'static str, &RuleSet); 6] {
        [
            ("licensing.cp4i_licensed", &self.licensing.cp4i_licensed),
            ("licensing.platform", &self.licensing.platform),
            ("licensing.free", &self.licensing.free),
            ("criticality.critical", &self.criticality.critical),
            ("criticality.important", &self.criticality.important),
            ("criticality.optional", &self.criticality.optional),
        ]
    }

    /// Check if the configuration defines no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Get summary statistics about the rules.
    #[must_use]
    pub fn summary(&self) -> RulesSummary {
        let licensing = &self.licensing;
        let criticality = &self.criticality;
        let workloads = &self.workloads;
        RulesSummary {
            licensing_patterns: licensing.cp4i_licensed.pattern_count()
                + licensing.platform.pattern_count()
                + licensing.free.pattern_count(),
            criticality_patterns: criticality.critical.pattern_count()
                + criticality.important.pattern_count()
                + criticality.optional.pattern_count(),
            criticality_label_keys: criticality.critical.labels.len()
                + criticality.important.labels.len()
                + criticality.optional.labels.len(),
            workload_patterns: workloads.infrastructure_patterns.len()
                + workloads.infrastructure_namespaces.len()
                + workloads.business_workload_patterns.len(),
            workload_label_keys: workloads.business_workload_labels.len(),
        }
    }
}

/// Summary of a rule configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesSummary {
    pub licensing_patterns: usize,
    pub criticality_patterns: usize,
    pub criticality_label_keys: usize,
    pub workload_patterns: usize,
    pub workload_label_keys: usize,
}

impl std::fmt::Display for RulesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} licensing pattern(s), {} criticality pattern(s) ({} label key(s)), \
             {} workload pattern(s) ({} label key(s))",
            self.licensing_patterns,
            self.criticality_patterns,
            self.criticality_label_keys,
            self.workload_patterns,
            self.workload_label_keys
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
licensing:
  cp4i_licensed:
    patterns: ["ibm-eventstreams", "ibm-mq"]
  openshift_platform:
    patterns: ["openshift-"]
    namespaces: ["openshift-"]
  free:
    patterns: ["nginx"]
criticality:
  critical:
    patterns: ["ibm-mq"]
    pod_patterns: ["etcd-"]
  important:
    labels:
      app.kubernetes.io/part-of: ["payments", "orders"]
workloads:
  infrastructure_namespaces: ["openshift-"]
  business_workload_patterns: ["pay-"]
resource_thresholds:
  cpu_over_provisioned: 0.2
"#;

    #[test]
    fn test_parse_yaml_config() {
        let config = RuleConfiguration::from_yaml(SAMPLE).expect("Failed to parse YAML");
        assert_eq!(config.licensing.cp4i_licensed.patterns.len(), 2);
        // alias for the platform group
        assert_eq!(config.licensing.platform.namespaces, vec!["openshift-"]);
        assert_eq!(config.criticality.critical.pod_patterns, vec!["etcd-"]);
        assert!(config.criticality.optional.is_empty());
        assert_eq!(config.criticality.important.labels.len(), 1);
    }

    #[test]
    fn test_missing_groups_default() {
        let config = RuleConfiguration::from_yaml("licensing: {}\n").expect("parse");
        assert!(config.is_empty());

        let config = RuleConfiguration::from_yaml("").expect("empty document");
        assert!(config.is_empty());
    }

    #[test]
    fn test_malformed_document_is_error() {
        let err = RuleConfiguration::from_yaml("licensing: [1, 2").expect_err("should fail");
        assert!(matches!(err, SnapdiffError::Rules { .. }));
    }

    #[test]
    fn test_rules_summary() {
        let config = RuleConfiguration::from_yaml(SAMPLE).expect("parse");
        let summary = config.summary();
        assert_eq!(summary.licensing_patterns, 5);
        assert_eq!(summary.criticality_patterns, 2);
        assert_eq!(summary.criticality_label_keys, 1);
        assert_eq!(summary.workload_patterns, 2);
        assert!(summary.to_string().contains("5 licensing pattern(s)"));
    }
}
