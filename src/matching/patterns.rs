//! Name, namespace and label matching primitives.
//!
//! Patterns are regular expressions matched case-insensitively and anchored at
//! the start of the subject (prefix semantics, like a `match` rather than a
//! full match). A pattern that fails to compile never matches.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// Returns true iff `name` matches any of `patterns`.
///
/// Compiles on every call; use [`PatternSet`] when evaluating the same list
/// repeatedly.
#[must_use]
pub fn matches_pattern<S: AsRef<str>>(name: &str, patterns: &[S]) -> bool {
    if name.is_empty() {
        return false;
    }
    patterns
        .iter()
        .filter_map(|p| compile_prefix(p.as_ref()).ok())
        .any(|re| re.is_match(name))
}

/// Returns true iff some rule key is present in `labels` with a value listed
/// in that key's allowed set. Empty label values never match.
#[must_use]
pub fn matches_labels(
    labels: &BTreeMap<String, String>,
    rule_label_sets: &BTreeMap<String, Vec<String>>,
) -> bool {
    rule_label_sets.iter().any(|(key, allowed)| {
        labels
            .get(key)
            .is_some_and(|value| !value.is_empty() && allowed.iter().any(|a| a == value))
    })
}

/// Compile a pattern with case-insensitive prefix-anchored semantics.
///
/// The pattern must parse on its own before it is wrapped, otherwise an
/// unbalanced `)` could close the anchoring group early.
pub fn compile_prefix(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)?;
    RegexBuilder::new(&format!("^(?:{pattern})"))
        .case_insensitive(true)
        .build()
}

/// A pattern that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPattern {
    pub pattern: String,
    pub reason: String,
}

/// An ordered, pre-compiled pattern list.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    compiled: Vec<Regex>,
    invalid: Vec<InvalidPattern>,
}

impl PatternSet {
    /// Compile `patterns`, skipping (and logging) the malformed ones.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut set = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match compile_prefix(pattern) {
                Ok(re) => set.compiled.push(re),
                Err(e) => {
                    tracing::warn!("Skipping malformed pattern '{}': {}", pattern, e);
                    set.invalid.push(InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        set
    }

    /// Whether `subject` matches any compiled pattern.
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        !subject.is_empty() && self.compiled.iter().any(|re| re.is_match(subject))
    }

    /// Compiled source of the first matching pattern, if any.
    #[must_use]
    pub fn first_match(&self, subject: &str) -> Option<&str> {
        if subject.is_empty() {
            return None;
        }
        self.compiled
            .iter()
            .find(|re| re.is_match(subject))
            .map(Regex::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Patterns that were skipped at compile time.
    #[must_use]
    pub fn invalid(&self) -> &[InvalidPattern] {
        &self.invalid
    }
}
