//! Discovery of the most recent snapshot files in a directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File name prefix written by the collector.
pub const SNAPSHOT_FILE_PREFIX: &str = "snapshot-";

fn is_snapshot_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(SNAPSHOT_FILE_PREFIX)
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Find up to `count` snapshot files in `dir`, newest first.
///
/// Only `snapshot-*.json` regular files are considered. Files are ordered by
/// modification time; ties fall back to the file name so the order is
/// stable.
pub fn find_latest_snapshots(dir: &Path, count: usize) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read snapshot directory {}", dir.display()))?;

    let mut snapshots: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !is_snapshot_file(&path) {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        snapshots.push((modified, path));
    }

    tracing::debug!("Found {} snapshot files in {}", snapshots.len(), dir.display());

    snapshots.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
    Ok(snapshots
        .into_iter()
        .take(count)
        .map(|(_, path)| path)
        .collect())
}
