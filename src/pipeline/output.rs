//! Where reports go.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None` means stdout.
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Color unless `--no-color` was given or `NO_COLOR` is set to anything.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Stdout output gets a trailing newline; files are written as is.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/diff.json");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_file_target_is_not_terminal() {
        assert!(!OutputTarget::File(PathBuf::from("out.json")).is_terminal());
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }

    #[test]
    fn test_should_use_color_without_flag() {
        let expected = std::env::var_os("NO_COLOR").is_none();
        assert_eq!(should_use_color(false), expected);
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");
        write_output("hello", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_write_output_missing_dir() {
        let target = OutputTarget::File(PathBuf::from("/nonexistent/dir/report.txt"));
        let err = write_output("hello", &target, true).unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
    }
}
