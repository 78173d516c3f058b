//! Diff command handlers.
//!
//! Implements the `diff` and `diff-latest` subcommands.

use crate::config::{BehaviorConfig, DiffConfig, DiffPaths, DiffSettings, OutputConfig};
use crate::pipeline::{
    PipelineError, compute_diff, diff_exit_code, find_latest_snapshots, load_snapshot,
    output_diff_report,
};
use anyhow::Result;
use std::path::Path;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let previous = load_snapshot(&config.paths.previous, quiet)?;
    let current = load_snapshot(&config.paths.current, quiet)?;

    let diff = compute_diff(&config.settings, &previous, &current, quiet);
    output_diff_report(&config.output, &diff, quiet)?;

    Ok(diff_exit_code(&diff, &config.behavior))
}

/// Run `diff-latest`: diff the two newest snapshots in `dir`.
pub fn run_diff_latest(
    dir: &Path,
    settings: DiffSettings,
    output: OutputConfig,
    behavior: BehaviorConfig,
) -> Result<i32> {
    let paths = latest_pair(dir)?;
    if !behavior.quiet {
        tracing::info!(
            "Comparing {} -> {}",
            paths.previous.display(),
            paths.current.display()
        );
    }

    run_diff(DiffConfig {
        paths,
        settings,
        output,
        behavior,
    })
}

/// The two newest snapshots, older one first.
fn latest_pair(dir: &Path) -> Result<DiffPaths> {
    let mut latest = find_latest_snapshots(dir, 2)?;
    if latest.len() < 2 {
        return Err(PipelineError::NotEnoughSnapshots {
            dir: dir.to_path_buf(),
            needed: 2,
            found: latest.len(),
        }
        .into());
    }
    let previous = latest.remove(1);
    let current = latest.remove(0);
    Ok(DiffPaths { previous, current })
}
