//! Settings shared by the config file and the command line, plus the
//! per-command configs the CLI hands to the pipeline.

use crate::diff::changes::{DEFAULT_PLATFORM_KEYWORDS, DEFAULT_RESTART_THRESHOLD};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything `.snapdiff.yaml` can set. Command-line flags are layered on
/// top with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    pub diff: DiffSettings,
    pub categorize: CategorizeSettings,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Fluent construction, mostly for tests and CLI flag collection.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Total restarts at which a restart is reported as critical.
    pub const fn restart_threshold(mut self, threshold: u32) -> Self {
        self.config.diff.restart_threshold = threshold;
        self
    }

    pub fn platform_keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.diff.platform_keywords = keywords;
        self
    }

    pub fn rules_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.categorize.rules_file = file;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Exit 2 on critical changes.
    pub const fn fail_on_critical(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_critical = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

/// Configuration for a diff run
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Snapshots to compare
    pub paths: DiffPaths,
    /// Comparison settings
    pub settings: DiffSettings,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for a diff run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPaths {
    /// Path to the earlier snapshot
    pub previous: PathBuf,
    /// Path to the later snapshot
    pub current: PathBuf,
}

/// Configuration for a categorize run
#[derive(Debug, Clone)]
pub struct CategorizeConfig {
    /// Snapshot whose workloads are categorized
    pub snapshot: PathBuf,
    /// Rule configuration file
    pub rules_file: PathBuf,
    /// Include rule explanations in text output
    pub explain: bool,
    /// Output configuration
    pub output: OutputConfig,
}

/// Snapshot comparison settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffSettings {
    /// Total restart count at which a workload restart is critical
    pub restart_threshold: u32,
    /// Namespace name fragments that mark a namespace as platform-related
    pub platform_keywords: Vec<String>,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
            platform_keywords: DEFAULT_PLATFORM_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }
}

/// Workload categorization settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CategorizeSettings {
    /// Rules file used when `--rules` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit with code 1 if any changes are detected
    pub fail_on_change: bool,
    /// Exit with code 2 if critical changes are detected
    pub fail_on_critical: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.diff.restart_threshold, 5);
        assert!(config.diff.platform_keywords.iter().any(|k| k == "cp4i"));
        assert_eq!(config.output.format, ReportFormat::Summary);
        assert!(!config.behavior.fail_on_critical);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .restart_threshold(3)
            .output_format(ReportFormat::Json)
            .fail_on_critical(true)
            .quiet(true)
            .build();
        assert_eq!(config.diff.restart_threshold, 3);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_critical);
        assert!(config.behavior.quiet);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("diff:\n  restart_threshold: 10\n").expect("parse");
        assert_eq!(config.diff.restart_threshold, 10);
        assert_eq!(config.diff.platform_keywords.len(), DEFAULT_PLATFORM_KEYWORDS.len());
    }
}
