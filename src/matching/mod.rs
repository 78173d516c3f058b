//! Rule-driven workload matching.
//!
//! Matching is built in three layers:
//!
//! - [`patterns`]: the primitives, case-insensitive prefix-anchored regex
//!   matching of names and namespaces plus label value-set matching
//! - [`rules`]: the YAML [`RuleConfiguration`] document
//! - [`rule_engine`]: [`RuleChain`], an ordered first-match-wins list of
//!   [`WorkloadMatcher`] steps ending in an explicit default
//!
//! # Example
//!
//! ```ignore
//! use snapdiff::matching::{MatchSubject, NameMatcher, RuleChain};
//!
//! let chain = RuleChain::new("free").step("licensed", NameMatcher::new(&["ibm-"]), "licensed");
//! assert_eq!(chain.evaluate(&MatchSubject::from(&workload)), "licensed");
//! ```

pub mod patterns;
pub mod rule_engine;
mod rules;

pub use patterns::{InvalidPattern, PatternSet, matches_labels, matches_pattern};
pub use rule_engine::{
    Decision, LabelMatcher, MatchSubject, NameMatcher, NamespaceMatcher, PatternIssue, RuleChain,
    RuleField, RuleStep, WorkloadMatcher, append_rule_set, find_invalid_patterns,
};
pub use rules::{
    CriticalityRules, LabelRules, LicensingRules, RuleConfiguration, RuleSet, RulesSummary,
    WorkloadRules,
};
