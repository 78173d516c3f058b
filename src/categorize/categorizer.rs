//! Per-workload categorization.
//!
//! Each derivation is a [`RuleChain`] compiled once from the rule
//! configuration, so a categorizer can be reused across any number of
//! workloads and snapshots.

use crate::matching::{
    Decision, LabelMatcher, MatchSubject, NameMatcher, NamespaceMatcher, PatternIssue,
    RuleChain, RuleConfiguration, RuleField, append_rule_set, find_invalid_patterns,
};
use crate::model::{ResourceRequests, Workload};
use serde::{Deserialize, Serialize};
use std::fmt;
use RuleField::{Labels, Namespaces, PodPatterns, Patterns};

/// Licensing class of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicensingClass {
    /// Counted toward VPC licensing
    Cp4iLicensed,
    /// Covered by the platform subscription
    Platform,
    /// Free / open source
    Free,
}

impl LicensingClass {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cp4iLicensed => "cp4i_licensed",
            Self::Platform => "platform",
            Self::Free => "free",
        }
    }
}

impl fmt::Display for LicensingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criticality tier of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalityTier {
    Critical,
    Important,
    Optional,
}

impl CriticalityTier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for CriticalityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workload role as decided by the workload rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Infrastructure,
    Business,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infrastructure => f.write_str("infrastructure"),
            Self::Business => f.write_str("business"),
        }
    }
}

/// A categorized workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedWorkload {
    pub name: String,
    pub namespace: String,
    pub licensing: LicensingClass,
    pub criticality: CriticalityTier,
    /// Business workload (as opposed to infrastructure)
    pub is_workload: bool,
    /// Requested cores counted toward VPC licensing
    pub vpc_contribution: f64,
    pub resources: ResourceRequests,
}

/// Which rule decided each derivation for one workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub name: String,
    pub namespace: String,
    pub licensing: Decision<LicensingClass>,
    pub criticality: Decision<CriticalityTier>,
    pub role: String,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: licensing {}; criticality {}; role {}",
            self.namespace, self.name, self.licensing, self.criticality, self.role
        )
    }
}

// Lists each rule group consults, in evaluation order. Licensed and free
// classes go by name only so VPC never follows a namespace.
const LICENSED_FIELDS: &[RuleField] = &[Patterns];
const PLATFORM_FIELDS: &[RuleField] = &[Patterns, Namespaces];
const FREE_FIELDS: &[RuleField] = &[Patterns];
const CRITICAL_FIELDS: &[RuleField] = &[Patterns, PodPatterns, Namespaces];
const IMPORTANT_FIELDS: &[RuleField] = &[Patterns, Namespaces, Labels];
const OPTIONAL_FIELDS: &[RuleField] = &[Patterns, Namespaces, Labels];

/// Categorizes workloads by licensing, criticality and role.
#[derive(Debug)]
pub struct ResourceCategorizer {
    licensing: RuleChain<LicensingClass>,
    criticality: RuleChain<CriticalityTier>,
    role: RuleChain<Option<Role>>,
    invalid: Vec<PatternIssue>,
}

impl ResourceCategorizer {
    /// Compile the rule chains for `rules`.
    #[must_use]
    pub fn new(rules: &RuleConfiguration) -> Self {
        let licensing_rules = &rules.licensing;
        let mut licensing = RuleChain::new(LicensingClass::Free);
        licensing = append_rule_set(
            licensing,
            "licensing.cp4i_licensed",
            &licensing_rules.cp4i_licensed,
            LICENSED_FIELDS,
            LicensingClass::Cp4iLicensed,
        );
        licensing = append_rule_set(
            licensing,
            "licensing.platform",
            &licensing_rules.platform,
            PLATFORM_FIELDS,
            LicensingClass::Platform,
        );
        licensing = append_rule_set(
            licensing,
            "licensing.free",
            &licensing_rules.free,
            FREE_FIELDS,
            LicensingClass::Free,
        );

        let criticality_rules = &rules.criticality;
        let mut criticality = RuleChain::new(CriticalityTier::Important);
        criticality = append_rule_set(
            criticality,
            "criticality.critical",
            &criticality_rules.critical,
            CRITICAL_FIELDS,
            CriticalityTier::Critical,
        );
        criticality = append_rule_set(
            criticality,
            "criticality.important",
            &criticality_rules.important,
            IMPORTANT_FIELDS,
            CriticalityTier::Important,
        );
        criticality = append_rule_set(
            criticality,
            "criticality.optional",
            &criticality_rules.optional,
            OPTIONAL_FIELDS,
            CriticalityTier::Optional,
        );

        // Infrastructure rules run first so they exclude before any business rule.
        let workloads = &rules.workloads;
        let mut role = RuleChain::new(None);
        if !workloads.infrastructure_patterns.is_empty() {
            role = role.step(
                "workloads.infrastructure_patterns",
                NameMatcher::new(&workloads.infrastructure_patterns),
                Some(Role::Infrastructure),
            );
        }
        if !workloads.infrastructure_namespaces.is_empty() {
            role = role.step(
                "workloads.infrastructure_namespaces",
                NamespaceMatcher::new(&workloads.infrastructure_namespaces),
                Some(Role::Infrastructure),
            );
        }
        if !workloads.business_workload_patterns.is_empty() {
            role = role.step(
                "workloads.business_workload_patterns",
                NameMatcher::new(&workloads.business_workload_patterns),
                Some(Role::Business),
            );
        }
        if !workloads.business_workload_labels.is_empty() {
            role = role.step(
                "workloads.business_workload_labels",
                LabelMatcher::new(workloads.business_workload_labels.clone()),
                Some(Role::Business),
            );
        }

        let invalid = find_invalid_patterns(rules);
        tracing::debug!(
            "Compiled rule chains: {} licensing, {} criticality, {} workload step(s)",
            licensing.len(),
            criticality.len(),
            role.len()
        );

        Self {
            licensing,
            criticality,
            role,
            invalid,
        }
    }

    /// Licensing class of `workload`.
    #[must_use]
    pub fn licensing(&self, workload: &Workload) -> LicensingClass {
        self.licensing.evaluate(&MatchSubject::from(workload))
    }

    /// Criticality tier of `workload`.
    #[must_use]
    pub fn criticality(&self, workload: &Workload) -> CriticalityTier {
        self.criticality.evaluate(&MatchSubject::from(workload))
    }

    /// Whether `workload` is a business workload. Unmatched workloads are not.
    #[must_use]
    pub fn is_business_workload(&self, workload: &Workload) -> bool {
        self.role.evaluate(&MatchSubject::from(workload)) == Some(Role::Business)
    }

    /// Requested CPU cores iff the workload is licensed, else zero.
    #[must_use]
    pub fn vpc_contribution(&self, workload: &Workload) -> f64 {
        vpc_for(self.licensing(workload), &workload.resources)
    }

    /// Run every derivation on `workload`.
    #[must_use]
    pub fn categorize(&self, workload: &Workload) -> CategorizedWorkload {
        let licensing = self.licensing(workload);
        CategorizedWorkload {
            name: workload.name.clone(),
            namespace: workload.namespace.clone(),
            licensing,
            criticality: self.criticality(workload),
            is_workload: self.is_business_workload(workload),
            vpc_contribution: vpc_for(licensing, &workload.resources),
            resources: workload.resources,
        }
    }

    /// Categorize a collection, preserving input order.
    #[must_use]
    pub fn categorize_all(&self, workloads: &[Workload]) -> Vec<CategorizedWorkload> {
        workloads.iter().map(|w| self.categorize(w)).collect()
    }

    /// Report which rule decided each derivation.
    #[must_use]
    pub fn explain(&self, workload: &Workload) -> Explanation {
        let subject = MatchSubject::from(workload);
        let role = match self.role.decide(&subject) {
            Decision::Matched {
                outcome: Some(role),
                source,
            } => format!("{role} (matched {source})"),
            _ => "infrastructure (default)".to_string(),
        };
        Explanation {
            name: workload.name.clone(),
            namespace: workload.namespace.clone(),
            licensing: self.licensing.decide(&subject),
            criticality: self.criticality.decide(&subject),
            role,
        }
    }

    /// Patterns skipped because they failed to compile.
    #[must_use]
    pub fn invalid_patterns(&self) -> &[PatternIssue] {
        &self.invalid
    }
}

fn vpc_for(licensing: LicensingClass, resources: &ResourceRequests) -> f64 {
    if licensing == LicensingClass::Cp4iLicensed {
        resources.cpu_requests
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const RULES: &str = r#"
licensing:
  cp4i_licensed:
    patterns: ["ibm-eventstreams", "ibm-mq", "ibm-apic"]
  platform:
    patterns: ["router-"]
    namespaces: ["openshift-"]
  free:
    patterns: ["nginx", "redis"]
criticality:
  critical:
    patterns: ["ibm-mq", "pay-"]
    namespaces: ["openshift-etcd"]
  important:
    patterns: ["pay-"]
    labels:
      app.kubernetes.io/part-of: ["orders"]
  optional:
    patterns: ["demo-"]
    namespaces: ["sandbox"]
workloads:
  infrastructure_patterns: ["router-"]
  infrastructure_namespaces: ["openshift-"]
  business_workload_patterns: ["pay-", "router-"]
  business_workload_labels:
    tier: ["business"]
"#;

    fn categorizer() -> ResourceCategorizer {
        let rules = RuleConfiguration::from_yaml(RULES).expect("rules should parse");
        ResourceCategorizer::new(&rules)
    }

    fn workload(ns: &str, name: &str, cpu: f64) -> Workload {
        let mut w = Workload::new(ns, name);
        w.resources.cpu_requests = cpu;
        w
    }

    #[test]
    fn test_licensed_workload_contributes_vpc() {
        let cat = categorizer().categorize(&workload("cp4i", "ibm-eventstreams-abc", 0.5));
        assert_eq!(cat.licensing, LicensingClass::Cp4iLicensed);
        assert!((cat.vpc_contribution - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_free_workload_has_no_vpc() {
        let cat = categorizer().categorize(&workload("ingress", "nginx-ingress", 2.0));
        assert_eq!(cat.licensing, LicensingClass::Free);
        assert_eq!(cat.vpc_contribution, 0.0);
    }

    #[test]
    fn test_platform_by_namespace() {
        let c = categorizer();
        assert_eq!(
            c.licensing(&workload("openshift-monitoring", "prometheus-0", 1.0)),
            LicensingClass::Platform
        );
        assert_eq!(c.vpc_contribution(&workload("openshift-dns", "dns-1", 1.0)), 0.0);
    }

    #[test]
    fn test_licensing_default_is_free() {
        assert_eq!(
            categorizer().licensing(&workload("apps", "unknown-thing", 1.0)),
            LicensingClass::Free
        );
        let empty = ResourceCategorizer::new(&RuleConfiguration::default());
        assert_eq!(empty.licensing(&workload("a", "b", 1.0)), LicensingClass::Free);
    }

    #[test]
    fn test_licensed_class_ignores_namespaces() {
        let rules = RuleConfiguration::from_yaml(
            r#"
licensing:
  cp4i_licensed:
    patterns: ["ibm-"]
    namespaces: ["cp4i"]
    labels:
      app: ["mq"]
  free:
    namespaces: ["cp4i"]
criticality:
  critical:
    labels:
      app: ["mq"]
"#,
        )
        .expect("rules should parse");
        let c = ResourceCategorizer::new(&rules);
        let mut w = workload("cp4i", "nginx-ingress", 2.0);
        w.labels.insert("app".to_string(), "mq".to_string());

        let cat = c.categorize(&w);
        assert_eq!(cat.licensing, LicensingClass::Free);
        assert_eq!(cat.vpc_contribution, 0.0);
        assert_eq!(cat.criticality, CriticalityTier::Important);
        assert_eq!(c.explain(&w).licensing, Decision::Default(LicensingClass::Free));

        let summary = crate::categorize::CategorizationSummary::from_workloads(vec![cat]);
        assert_eq!(summary.licensing.total_vpc, 0.0);
    }

    #[test]
    fn test_critical_beats_important() {
        // pay- is listed in both tiers
        assert_eq!(
            categorizer().criticality(&workload("shop", "pay-api", 0.1)),
            CriticalityTier::Critical
        );
    }

    #[test]
    fn test_criticality_namespace_and_labels() {
        let c = categorizer();
        assert_eq!(
            c.criticality(&workload("openshift-etcd", "etcd-0", 0.1)),
            CriticalityTier::Critical
        );
        assert_eq!(
            c.criticality(&workload("sandbox", "scratch", 0.1)),
            CriticalityTier::Optional
        );

        let mut labelled = workload("shop", "cart", 0.1);
        labelled
            .labels
            .insert("app.kubernetes.io/part-of".to_string(), "orders".to_string());
        assert_eq!(c.criticality(&labelled), CriticalityTier::Important);
    }

    #[test]
    fn test_criticality_default_is_important() {
        let empty = ResourceCategorizer::new(&RuleConfiguration::default());
        assert_eq!(
            empty.criticality(&workload("a", "b", 0.0)),
            CriticalityTier::Important
        );
    }

    #[test]
    fn test_infrastructure_excludes_before_business() {
        let c = categorizer();
        // router- is both infrastructure and business; infrastructure wins
        assert!(!c.is_business_workload(&workload("apps", "router-default", 0.1)));
        // infrastructure namespace wins over business name pattern
        assert!(!c.is_business_workload(&workload("openshift-x", "pay-api", 0.1)));
        assert!(c.is_business_workload(&workload("shop", "pay-api", 0.1)));
    }

    #[test]
    fn test_business_by_label_and_default() {
        let c = categorizer();
        let mut labelled = workload("shop", "catalog", 0.1);
        labelled.labels = BTreeMap::from([("tier".to_string(), "business".to_string())]);
        assert!(c.is_business_workload(&labelled));
        assert!(!c.is_business_workload(&workload("shop", "catalog", 0.1)));
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let c = categorizer();
        let w = workload("cp4i", "ibm-mq-0", 1.25);
        assert_eq!(c.categorize(&w), c.categorize(&w));
    }

    #[test]
    fn test_empty_name_matches_nothing() {
        let c = categorizer();
        let w = workload("shop", "", 1.0);
        assert_eq!(c.licensing(&w), LicensingClass::Free);
        assert_eq!(c.criticality(&w), CriticalityTier::Important);
    }

    #[test]
    fn test_explain_names_deciding_rule() {
        let c = categorizer();
        let explanation = c.explain(&workload("cp4i", "ibm-mq-0", 1.0));
        assert_eq!(
            explanation.licensing,
            Decision::Matched {
                outcome: LicensingClass::Cp4iLicensed,
                source: "licensing.cp4i_licensed.patterns".to_string()
            }
        );
        assert!(explanation.role.contains("default"));
        assert!(explanation.to_string().starts_with("cp4i/ibm-mq-0"));
    }

    #[test]
    fn test_malformed_patterns_are_reported_and_skipped() {
        let mut rules = RuleConfiguration::default();
        rules.licensing.cp4i_licensed.patterns = vec!["(broken".to_string(), "ibm-".to_string()];
        let c = ResourceCategorizer::new(&rules);
        assert_eq!(c.invalid_patterns().len(), 1);
        assert_eq!(c.licensing(&workload("x", "ibm-mq", 1.0)), LicensingClass::Cp4iLicensed);
    }
}
