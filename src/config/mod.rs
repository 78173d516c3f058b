//! Configuration module for snapdiff.
//!
//! This module provides:
//! - Type-safe configuration structures with a fluent builder
//! - Validation for configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use snapdiff::config::{AppConfig, file::load_or_default};
//!
//! let config = AppConfig::builder()
//!     .restart_threshold(3)
//!     .fail_on_critical(true)
//!     .build();
//!
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.snapdiff.yaml` file in your project root or `~/.config/snapdiff/`:
//!
//! ```yaml
//! diff:
//!   restart_threshold: 3
//! behavior:
//!   fail_on_critical: true
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CategorizeConfig, CategorizeSettings, DiffConfig,
    DiffPaths, DiffSettings, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, config_search_dirs, discover_config_file,
    generate_full_example_config, load_config_file, load_or_default, user_config_dir,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents every option accepted in `.snapdiff.yaml`, for editor
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        for section in ["diff", "categorize", "output", "behavior"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
