//! `.snapdiff.yaml` discovery, loading and CLI layering.

use super::types::{AppConfig, DiffSettings};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Recognized config file names, in order of preference within a directory.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".snapdiff.yaml",
    ".snapdiff.yml",
    "snapdiff.yaml",
    "snapdiff.yml",
];

const CONFIG_DIR_NAME: &str = "snapdiff";

/// Per-user config directory, e.g. `~/.config/snapdiff`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Directories searched for a config file, highest priority first: the
/// working directory, the enclosing git checkout, the user config
/// directory and the home directory.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(enclosing_git_root);
    [cwd, git_root, user_config_dir(), dirs::home_dir()]
        .into_iter()
        .flatten()
        .collect()
}

/// The config file to use: `explicit` when given, else the first match in
/// [`config_search_dirs`]. A missing explicit file is logged and yields
/// `None`; the search locations are not consulted in its place.
#[must_use]
pub fn discover_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} not found; using defaults", path.display());
        return None;
    }
    config_search_dirs()
        .iter()
        .find_map(|dir| config_file_in(dir))
}

fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn enclosing_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("no config file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Read one config file. A blank file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Discovered config and where it came from. Unusable files are logged and
/// replaced by the defaults.
#[must_use]
pub fn load_or_default(explicit: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit) else {
        return (AppConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            (config, Some(path))
        }
        Err(e) => {
            let detail = std::error::Error::source(&e).map(ToString::to_string);
            tracing::warn!("{e}: {}; using defaults", detail.unwrap_or_default());
            (AppConfig::default(), None)
        }
    }
}

impl AppConfig {
    /// Layer `overrides` on top of `self`.
    ///
    /// A setting is taken from `overrides` only when it differs from its
    /// default, so unset CLI flags never clobber file values. Flags can turn
    /// booleans on but not off.
    pub fn merge(&mut self, overrides: &Self) {
        let default_diff = DiffSettings::default();
        if overrides.diff.restart_threshold != default_diff.restart_threshold {
            self.diff.restart_threshold = overrides.diff.restart_threshold;
        }
        if overrides.diff.platform_keywords != default_diff.platform_keywords {
            self.diff.platform_keywords = overrides.diff.platform_keywords.clone();
        }
        if let Some(rules) = &overrides.categorize.rules_file {
            self.categorize.rules_file = Some(rules.clone());
        }
        if overrides.output.format != ReportFormat::default() {
            self.output.format = overrides.output.format;
        }
        if let Some(file) = &overrides.output.file {
            self.output.file = Some(file.clone());
        }
        self.output.no_color |= overrides.output.no_color;
        self.behavior.quiet |= overrides.behavior.quiet;
        self.behavior.fail_on_change |= overrides.behavior.fail_on_change;
        self.behavior.fail_on_critical |= overrides.behavior.fail_on_critical;
    }

    /// Discovered config with `cli_overrides` merged on top.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

/// Commented config listing every option at its default value.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# snapdiff configuration
#
# Looked up as .snapdiff.yaml (or .yml, or without the dot) in the working
# directory, the git checkout root, ~/.config/snapdiff/ and the home directory.
# Command-line flags take precedence over anything set here.

diff:
  # A workload restart becomes critical once its total restart count reaches this
  restart_threshold: 5
  # A namespace whose name contains one of these is treated as platform-related
  platform_keywords:
    - cp4i
    - integration
    - ibm
    - kafka
    - mq
    - ace
    - apic

categorize:
  # Rule file for `snapdiff categorize` when --rules is omitted
  rules_file: null

output:
  # summary (terminal text) or json
  format: summary
  # Write the report here instead of stdout
  # file: report.json
  no_color: false

behavior:
  quiet: false
  # Exit 1 when the diff has any change
  fail_on_change: false
  # Exit 2 when the diff has a critical change (wins over fail_on_change)
  fail_on_critical: false
"
    .to_string()
}
