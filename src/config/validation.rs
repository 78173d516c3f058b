//! Sanity checks on loaded configuration.
//!
//! Problems are reported, not fatal: the CLI logs each [`ConfigError`] and
//! carries on with the values it has.

use super::types::{AppConfig, DiffSettings, OutputConfig};
use std::path::Path;
use thiserror::Error;

/// One invalid setting, addressed by its dotted YAML path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub trait Validatable {
    /// Every problem found; empty when the value is usable as is.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.diff.validate();
        errors.extend(self.output.validate());
        if let Some(rules) = self.categorize.rules_file.as_deref()
            && !rules.is_file()
        {
            errors.push(ConfigError::new(
                "categorize.rules_file",
                format!("no rule file at {}", rules.display()),
            ));
        }
        errors
    }
}

impl Validatable for DiffSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.restart_threshold == 0 {
            errors.push(ConfigError::new(
                "diff.restart_threshold",
                "must be at least 1, or every restart would be critical",
            ));
        }
        if self.platform_keywords.is_empty() {
            errors.push(ConfigError::new(
                "diff.platform_keywords",
                "empty list; only listed platform namespaces will count",
            ));
        } else if self.platform_keywords.iter().any(|k| k.trim().is_empty()) {
            errors.push(ConfigError::new(
                "diff.platform_keywords",
                "blank keyword matches every namespace",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let missing_dir = self
            .file
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty() && !dir.is_dir());
        missing_dir
            .map(|dir| {
                ConfigError::new(
                    "output.file",
                    format!("directory {} does not exist", dir.display()),
                )
            })
            .into_iter()
            .collect()
    }
}
