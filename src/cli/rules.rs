//! Rules command handler.
//!
//! Loads a rule configuration, reports what it contains and lists patterns
//! that will be skipped during matching.

use crate::matching::find_invalid_patterns;
use crate::pipeline::{OutputTarget, exit_codes, load_rules, write_output};
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Run the rules command.
///
/// With `strict`, malformed patterns turn into [`exit_codes::ERROR`];
/// otherwise they are only listed.
pub fn run_rules(path: &Path, strict: bool, quiet: bool) -> Result<i32> {
    let rules = load_rules(path, quiet)?;
    let issues = find_invalid_patterns(&rules);

    let mut report = String::new();
    writeln!(report, "Rules: {}", path.display())?;
    writeln!(report, "  {}", rules.summary())?;
    if rules.is_empty() {
        writeln!(report, "  No rules defined; every workload gets the defaults")?;
    }
    if issues.is_empty() {
        writeln!(report, "  All patterns are valid")?;
    } else {
        writeln!(report, "  {} invalid pattern(s) will be skipped:", issues.len())?;
        for issue in &issues {
            writeln!(report, "    - {issue}")?;
        }
    }

    write_output(report.trim_end(), &OutputTarget::Stdout, quiet)?;

    if strict && !issues.is_empty() {
        return Ok(exit_codes::ERROR);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strict_mode_fails_on_invalid_pattern() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("categories.yaml");
        std::fs::write(&path, "workloads:\n  business_workload_patterns: ['[unclosed']\n")
            .unwrap();

        assert_eq!(run_rules(&path, false, true).unwrap(), exit_codes::SUCCESS);
        assert_eq!(run_rules(&path, true, true).unwrap(), exit_codes::ERROR);
    }

    #[test]
    fn test_valid_rules() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("categories.yaml");
        std::fs::write(&path, "licensing:\n  free:\n    patterns: ['nginx']\n").unwrap();

        assert_eq!(run_rules(&path, true, true).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_malformed_document_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("categories.yaml");
        std::fs::write(&path, "licensing: [1, 2").unwrap();

        assert!(run_rules(&path, false, true).is_err());
    }
}
