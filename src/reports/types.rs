//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable terminal summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Default number of important changes listed in text reports.
pub const DEFAULT_IMPORTANT_LIMIT: usize = 10;

/// Configuration for report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum important changes listed individually in text output
    pub important_limit: usize,
    /// Include rule explanations in categorization output
    pub explain: bool,
    /// Optional heading override
    pub title: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            important_limit: DEFAULT_IMPORTANT_LIMIT,
            explain: false,
            title: None,
        }
    }
}

impl ReportConfig {
    /// Config that includes rule explanations.
    #[must_use]
    pub fn explained() -> Self {
        Self {
            explain: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
