#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz rule configuration parsing and pattern compilation.
///
/// Malformed patterns must be skipped, never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(rules) = snapdiff::RuleConfiguration::from_yaml(s)
    {
        let categorizer = snapdiff::ResourceCategorizer::new(&rules);
        let _ = categorizer.categorize(&snapdiff::Workload::new("default", "fuzz-target"));
        let _ = snapdiff::matching::find_invalid_patterns(&rules);
    }
});
