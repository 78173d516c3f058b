//! Input loading stage.
//!
//! Reads snapshots and rule configurations with file context for errors.

use super::PipelineError;
use crate::matching::{RuleConfiguration, find_invalid_patterns};
use crate::model::Snapshot;
use anyhow::Result;
use std::path::Path;

/// Load a snapshot document
pub fn load_snapshot(path: &Path, quiet: bool) -> Result<Snapshot> {
    if !quiet {
        tracing::info!("Loading snapshot: {}", path.display());
    }

    let snapshot = Snapshot::from_file(path).map_err(|e| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    tracing::debug!(
        "Loaded {} workloads, {} components, {} namespaces",
        snapshot.workloads.len(),
        snapshot.components.len(),
        snapshot.namespaces.len()
    );

    Ok(snapshot)
}

/// Load a rule configuration, warning about patterns that will be skipped
pub fn load_rules(path: &Path, quiet: bool) -> Result<RuleConfiguration> {
    if !quiet {
        tracing::info!("Loading rules: {}", path.display());
    }

    let rules = RuleConfiguration::from_file(path).map_err(|e| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    for issue in find_invalid_patterns(&rules) {
        tracing::warn!("Skipping invalid pattern {issue}");
    }
    tracing::debug!("Loaded rules: {}", rules.summary());

    Ok(rules)
}
