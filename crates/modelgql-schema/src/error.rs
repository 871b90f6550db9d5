//! Error types for schema generation.
//!
//! Mapping never fails: an unknown raw type falls through to a named object
//! type reference. Everything that can fail lives at the edges of the
//! pipeline (reading metadata, touching the filesystem, running the external
//! formatter and merge tool) and is surfaced here.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while reading model metadata.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read metadata at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid field key '{0}', expected '<Entity>.<Field>'")]
    InvalidKey(String),
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while writing or reconciling the schema file.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {output}")]
    Process {
        program: String,
        status: String,
        output: String,
    },

    #[error("merge conflict in {path}: {conflicts} conflicting hunk(s) left for manual resolution")]
    Conflict { path: PathBuf, conflicts: u32 },
}

impl ReconcileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn process(program: &str, status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        let mut output = String::from_utf8_lossy(stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(stdout);
        if !stdout.trim().is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(stdout.trim());
        }
        Self::Process {
            program: program.to_string(),
            status: status.to_string(),
            output,
        }
    }

    /// Returns true when the error is a three-way merge conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Top-level error for a generation run.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_detection() {
        let err = ReconcileError::Conflict {
            path: PathBuf::from("schema.graphql"),
            conflicts: 2,
        };
        assert!(err.is_conflict());
        assert!(err.to_string().contains("2 conflicting hunk(s)"));

        let io = ReconcileError::io("schema.graphql", std::io::Error::other("disk full"));
        assert!(!io.is_conflict());
        assert!(io.to_string().contains("schema.graphql"));
    }

    #[test]
    fn test_schema_error_wraps_sources() {
        let err: SchemaError = ExtractError::InvalidKey("User".into()).into();
        assert_eq!(
            err.to_string(),
            "invalid field key 'User', expected '<Entity>.<Field>'"
        );
    }
}
