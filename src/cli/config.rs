//! Config command handlers.
//!
//! Implements `config show|path|init|schema`.

use crate::config::{
    CONFIG_FILE_NAMES, Validatable, config_search_dirs, discover_config_file,
    generate_full_example_config, generate_json_schema, load_or_default,
};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Print the effective configuration (defaults merged with the discovered file).
pub fn run_config_show(explicit: Option<&Path>) -> Result<()> {
    let (config, loaded_from) = load_or_default(explicit);
    match &loaded_from {
        Some(path) => eprintln!("# Loaded from: {}", path.display()),
        None => eprintln!("# No config file found; showing defaults"),
    }
    for error in config.validate() {
        eprintln!("# warning: {error}");
    }
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}

/// Print the search locations and the config file that would be used.
pub fn run_config_path(explicit: Option<&Path>) -> Result<()> {
    eprintln!("Config file search paths (in order):");
    for path in config_search_dirs() {
        eprintln!("  {}", path.display());
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in CONFIG_FILE_NAMES {
        eprintln!("  {name}");
    }
    eprintln!();
    match discover_config_file(explicit) {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("No config file found."),
    }
    Ok(())
}

/// Write a commented `.snapdiff.yaml` into `dir`.
pub fn run_config_init(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(CONFIG_FILE_NAMES[0]);
    if target.exists() {
        bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_full_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("Created {}", target.display());
    Ok(target)
}

/// Print the config JSON schema, or write it to `output`.
pub fn run_config_schema(output: Option<&Path>) -> Result<()> {
    let schema = generate_json_schema();
    match output {
        Some(path) => {
            std::fs::write(path, &schema)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, load_config_file};
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let tmp = TempDir::new().unwrap();
        let path = run_config_init(tmp.path()).unwrap();
        assert!(path.ends_with(".snapdiff.yaml"));
        assert_eq!(load_config_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        run_config_init(tmp.path()).unwrap();
        let err = run_config_init(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_schema_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.json");
        run_config_schema(Some(&path)).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(value["properties"]["diff"].is_object());
    }
}
