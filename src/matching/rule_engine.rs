//! Generic rule evaluation.
//!
//! Every rule group compiles into a [`RuleChain`]: an ordered list of
//! `(matcher, outcome)` steps ending in an explicit default. Licensing,
//! criticality and workload-role rules all run through the same evaluation
//! loop; only the steps differ.

use super::patterns::{InvalidPattern, PatternSet, compile_prefix, matches_labels};
use super::rules::{LabelRules, RuleConfiguration, RuleSet};
use crate::model::Workload;
use std::collections::BTreeMap;
use std::fmt;

/// The fields of a workload that rules can look at.
#[derive(Debug, Clone, Copy)]
pub struct MatchSubject<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub labels: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a Workload> for MatchSubject<'a> {
    fn from(workload: &'a Workload) -> Self {
        Self {
            name: &workload.name,
            namespace: &workload.namespace,
            labels: &workload.labels,
        }
    }
}

/// A single matching strategy.
pub trait WorkloadMatcher: Send + Sync {
    /// Whether the subject satisfies this matcher.
    fn matches(&self, subject: &MatchSubject<'_>) -> bool;

    /// Short description for explanations and logging.
    fn describe(&self) -> String;
}

/// Matches the workload name against a pattern list.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    patterns: PatternSet,
}

impl NameMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: PatternSet::new(patterns),
        }
    }
}

impl WorkloadMatcher for NameMatcher {
    fn matches(&self, subject: &MatchSubject<'_>) -> bool {
        self.patterns.is_match(subject.name)
    }

    fn describe(&self) -> String {
        format!("name pattern ({} pattern(s))", self.patterns.len())
    }
}

/// Matches the workload namespace against a pattern list.
#[derive(Debug, Clone)]
pub struct NamespaceMatcher {
    patterns: PatternSet,
}

impl NamespaceMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: PatternSet::new(patterns),
        }
    }
}

impl WorkloadMatcher for NamespaceMatcher {
    fn matches(&self, subject: &MatchSubject<'_>) -> bool {
        self.patterns.is_match(subject.namespace)
    }

    fn describe(&self) -> String {
        format!("namespace pattern ({} pattern(s))", self.patterns.len())
    }
}

/// Matches when a label carries one of the allowed values.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    rules: LabelRules,
}

impl LabelMatcher {
    #[must_use]
    pub const fn new(rules: LabelRules) -> Self {
        Self { rules }
    }
}

impl WorkloadMatcher for LabelMatcher {
    fn matches(&self, subject: &MatchSubject<'_>) -> bool {
        matches_labels(subject.labels, &self.rules)
    }

    fn describe(&self) -> String {
        let keys: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        format!("label match ({})", keys.join(", "))
    }
}

/// One step of a rule chain.
pub struct RuleStep<T> {
    /// Dotted location of the rule list in the configuration
    pub source: String,
    pub matcher: Box<dyn WorkloadMatcher>,
    pub outcome: T,
}

impl<T: fmt::Debug> fmt::Debug for RuleStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleStep")
            .field("source", &self.source)
            .field("matcher", &self.matcher.describe())
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// How a chain reached its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<T> {
    /// A rule step matched
    Matched { outcome: T, source: String },
    /// No step matched; the terminal default applied
    Default(T),
}

impl<T: Copy> Decision<T> {
    #[must_use]
    pub const fn outcome(&self) -> T {
        match self {
            Self::Matched { outcome, .. } | Self::Default(outcome) => *outcome,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Decision<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched { outcome, source } => write!(f, "{outcome} (matched {source})"),
            Self::Default(outcome) => write!(f, "{outcome} (default)"),
        }
    }
}

/// Ordered first-match-wins rule list with an explicit default.
#[derive(Debug)]
pub struct RuleChain<T> {
    steps: Vec<RuleStep<T>>,
    default: T,
}

impl<T: Copy> RuleChain<T> {
    /// Start a chain that falls back to `default`.
    #[must_use]
    pub const fn new(default: T) -> Self {
        Self {
            steps: Vec::new(),
            default,
        }
    }

    /// Append a step.
    #[must_use]
    pub fn step(
        mut self,
        source: impl Into<String>,
        matcher: impl WorkloadMatcher + 'static,
        outcome: T,
    ) -> Self {
        self.steps.push(RuleStep {
            source: source.into(),
            matcher: Box::new(matcher),
            outcome,
        });
        self
    }

    /// Evaluate the chain and return the outcome.
    pub fn evaluate(&self, subject: &MatchSubject<'_>) -> T {
        self.steps
            .iter()
            .find(|step| step.matcher.matches(subject))
            .map_or(self.default, |step| step.outcome)
    }

    /// Evaluate the chain and report which step decided.
    pub fn decide(&self, subject: &MatchSubject<'_>) -> Decision<T> {
        self.steps
            .iter()
            .find(|step| step.matcher.matches(subject))
            .map_or(Decision::Default(self.default), |step| Decision::Matched {
                outcome: step.outcome,
                source: step.source.clone(),
            })
    }

    #[must_use]
    pub const fn default_outcome(&self) -> T {
        self.default
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A malformed pattern together with where it was configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternIssue {
    pub location: String,
    pub pattern: InvalidPattern,
}

impl fmt::Display for PatternIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' ({})",
            self.location, self.pattern.pattern, self.pattern.reason
        )
    }
}

/// Find every pattern in `config` that will be skipped at evaluation time.
#[must_use]
pub fn find_invalid_patterns(config: &RuleConfiguration) -> Vec<PatternIssue> {
    let workloads = &config.workloads;
    let mut lists: Vec<(String, &[String])> = Vec::new();
    for (group, set) in config.rule_sets() {
        lists.push((format!("{group}.patterns"), &set.patterns));
        lists.push((format!("{group}.pod_patterns"), &set.pod_patterns));
        lists.push((format!("{group}.namespaces"), &set.namespaces));
    }
    lists.push((
        "workloads.infrastructure_patterns".to_string(),
        &workloads.infrastructure_patterns,
    ));
    lists.push((
        "workloads.infrastructure_namespaces".to_string(),
        &workloads.infrastructure_namespaces,
    ));
    lists.push((
        "workloads.business_workload_patterns".to_string(),
        &workloads.business_workload_patterns,
    ));

    let mut issues = Vec::new();
    for (location, patterns) in lists {
        for pattern in patterns {
            if let Err(e) = compile_prefix(pattern) {
                issues.push(PatternIssue {
                    location: location.clone(),
                    pattern: InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    },
                });
            }
        }
    }
    issues
}

/// One list of a [`RuleSet`] that a rule group consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    Patterns,
    PodPatterns,
    Namespaces,
    Labels,
}

impl RuleField {
    const fn key(self) -> &'static str {
        match self {
            Self::Patterns => "patterns",
            Self::PodPatterns => "pod_patterns",
            Self::Namespaces => "namespaces",
            Self::Labels => "labels",
        }
    }
}

/// Append one step per entry of `fields`, in that order. Lists of the set
/// not named in `fields` are never consulted. Empty lists add no step.
#[must_use]
pub fn append_rule_set<T: Copy>(
    mut chain: RuleChain<T>,
    group: &str,
    set: &RuleSet,
    fields: &[RuleField],
    outcome: T,
) -> RuleChain<T> {
    for &field in fields {
        let source = format!("{group}.{}", field.key());
        chain = match field {
            RuleField::Patterns if !set.patterns.is_empty() => {
                chain.step(source, NameMatcher::new(&set.patterns), outcome)
            }
            RuleField::PodPatterns if !set.pod_patterns.is_empty() => {
                chain.step(source, NameMatcher::new(&set.pod_patterns), outcome)
            }
            RuleField::Namespaces if !set.namespaces.is_empty() => {
                chain.step(source, NamespaceMatcher::new(&set.namespaces), outcome)
            }
            RuleField::Labels if !set.labels.is_empty() => {
                chain.step(source, LabelMatcher::new(set.labels.clone()), outcome)
            }
            _ => chain,
        };
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Blue,
        Grey,
    }

    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    fn subject<'a>(name: &'a str, ns: &'a str, labels: &'a BTreeMap<String, String>) -> MatchSubject<'a> {
        MatchSubject {
            name,
            namespace: ns,
            labels,
        }
    }

    fn chain() -> RuleChain<Color> {
        RuleChain::new(Color::Grey)
            .step("red.patterns", NameMatcher::new(&["red-"]), Color::Red)
            .step("blue.namespaces", NamespaceMatcher::new(&["blue"]), Color::Blue)
            .step("red.late", NameMatcher::new(&["late-"]), Color::Red)
    }

    #[test]
    fn test_first_match_wins() {
        let labels = BTreeMap::new();
        // matches both the first and second step
        assert_eq!(chain().evaluate(&subject("red-1", "blue", &labels)), Color::Red);
        assert_eq!(chain().evaluate(&subject("x", "blue-ns", &labels)), Color::Blue);
    }

    #[test]
    fn test_default_is_explicit() {
        let labels = BTreeMap::new();
        let chain = chain();
        let decision = chain.decide(&subject("other", "default", &labels));
        assert_eq!(decision, Decision::Default(Color::Grey));
        assert_eq!(decision.outcome(), chain.default_outcome());
        assert!(decision.to_string().contains("default"));
    }

    #[test]
    fn test_decision_names_source() {
        let labels = BTreeMap::new();
        let decision = chain().decide(&subject("late-job", "x", &labels));
        assert_eq!(
            decision,
            Decision::Matched {
                outcome: Color::Red,
                source: "red.late".to_string()
            }
        );
    }

    #[test]
    fn test_label_matcher_step() {
        let mut rules = LabelRules::new();
        rules.insert("tier".to_string(), vec!["business".to_string()]);
        let chain = RuleChain::new(false).step("labels", LabelMatcher::new(rules), true);

        let mut labels = BTreeMap::new();
        labels.insert("tier".to_string(), "business".to_string());
        assert!(chain.evaluate(&subject("svc", "ns", &labels)));
        assert!(!chain.evaluate(&subject("svc", "ns", &BTreeMap::new())));
    }

    #[test]
    fn test_append_rule_set_order() {
        let set = RuleSet {
            patterns: vec!["api-".to_string()],
            namespaces: vec!["prod".to_string()],
            ..RuleSet::default()
        };
        let fields = [RuleField::Patterns, RuleField::PodPatterns, RuleField::Namespaces];
        let chain = append_rule_set(RuleChain::new(Color::Grey), "red", &set, &fields, Color::Red);
        assert_eq!(chain.len(), 2);

        let labels = BTreeMap::new();
        assert_eq!(
            chain.decide(&subject("web", "prod-eu", &labels)),
            Decision::Matched {
                outcome: Color::Red,
                source: "red.namespaces".to_string()
            }
        );
    }

    #[test]
    fn test_append_rule_set_skips_unlisted_fields() {
        let mut label_rules = LabelRules::new();
        label_rules.insert("app".to_string(), vec!["web".to_string()]);
        let set = RuleSet {
            patterns: vec!["api-".to_string()],
            namespaces: vec!["prod".to_string()],
            labels: label_rules,
            ..RuleSet::default()
        };
        let chain = append_rule_set(
            RuleChain::new(Color::Grey),
            "blue",
            &set,
            &[RuleField::Patterns],
            Color::Blue,
        );
        assert_eq!(chain.len(), 1);

        let mut labels = BTreeMap::new();
        labels.insert("app".to_string(), "web".to_string());
        assert_eq!(chain.evaluate(&subject("web", "prod", &labels)), Color::Grey);
        assert_eq!(chain.evaluate(&subject("api-gw", "dev", &labels)), Color::Blue);
    }

    #[test]
    fn test_find_invalid_patterns() {
        let mut config = RuleConfiguration::default();
        config.criticality.critical.patterns = vec!["ok".to_string(), "(bad".to_string()];
        config.workloads.infrastructure_namespaces = vec!["[".to_string()];

        let issues = find_invalid_patterns(&config);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].location, "criticality.critical.patterns");
        assert_eq!(issues[0].pattern.pattern, "(bad");
        assert!(issues[1].to_string().starts_with("workloads.infrastructure_namespaces"));
    }
}
