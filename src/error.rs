//! Library error type.
//!
//! Structural problems with input documents are errors. Per-record and
//! per-pattern anomalies are not: they are absorbed where they occur with a
//! safe default, so one bad entity never aborts a whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one of the two input documents.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapdiffError {
    /// Snapshot JSON that does not decode into a [`Snapshot`](crate::model::Snapshot)
    #[error("invalid snapshot: {context}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rule YAML that does not decode into a
    /// [`RuleConfiguration`](crate::matching::RuleConfiguration)
    #[error("invalid rule configuration: {context}")]
    Rules {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Input file that could not be read
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SnapdiffError>;

impl SnapdiffError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Prefix the context of a decoding error. Read errors already name
    /// their path and are returned unchanged.
    #[must_use]
    fn within(mut self, outer: String) -> Self {
        match &mut self {
            Self::Parse { context, .. } | Self::Rules { context, .. } => {
                *context = if context.is_empty() {
                    outer
                } else {
                    format!("{outer}: {context}")
                };
            }
            Self::Io { .. } => {}
        }
        self
    }
}

impl From<serde_json::Error> for SnapdiffError {
    fn from(source: serde_json::Error) -> Self {
        Self::Parse {
            context: String::new(),
            source,
        }
    }
}

impl From<serde_yaml::Error> for SnapdiffError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Rules {
            context: String::new(),
            source,
        }
    }
}

/// Context chaining for fallible document loading, outermost first:
/// `invalid snapshot: loading prev.json: decoding JSON`.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`context`](Self::context), building the string only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SnapdiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().within(context.into()))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.into().within(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u32>("\"five\"").unwrap_err()
    }

    #[test]
    fn test_context_is_chained_outermost_first() {
        let result: std::result::Result<(), _> = Err(json_error());
        let err = result
            .context("decoding JSON")
            .context("loading prev.json")
            .unwrap_err();
        match &err {
            SnapdiffError::Parse { context, .. } => {
                assert_eq!(context, "loading prev.json: decoding JSON");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
        assert!(err.to_string().starts_with("invalid snapshot: loading prev.json"));
    }

    #[test]
    fn test_yaml_errors_are_rule_errors() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let err = SnapdiffError::from(yaml_err);
        assert!(matches!(err, SnapdiffError::Rules { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_names_path_and_ignores_context() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let result: Result<()> = Err(SnapdiffError::io("/data/snapshot.json", io_err));
        let err = result.context("loading snapshot").unwrap_err();
        assert_eq!(err.to_string(), "cannot read /data/snapshot.json");
    }

    #[test]
    fn test_with_context_is_lazy() {
        let mut called = false;
        let ok: Result<u8> = Ok(1);
        let _ = ok.with_context(|| {
            called = true;
            "unused"
        });
        assert!(!called);
    }
}
