//! External formatter and merge tool.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, trace};

use super::union::resolve_insertions;
use crate::error::ReconcileError;

/// Canonical pretty-printer run over schema files before merging.
pub trait SchemaFormatter {
    /// Formats the file at `path` in place.
    fn format(&self, path: &Path) -> Result<(), ReconcileError>;
}

/// Three-way text merge.
pub trait MergeTool {
    /// Merges the changes from `base` to `theirs` into `target`, writing the
    /// result to `target`.
    ///
    /// A merge with conflicts still writes `target` (with markers) and
    /// returns [`ReconcileError::Conflict`].
    fn merge(&self, target: &Path, base: &Path, theirs: &Path) -> Result<(), ReconcileError>;
}

/// Leaves files untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl SchemaFormatter for NoopFormatter {
    fn format(&self, path: &Path) -> Result<(), ReconcileError> {
        trace!(path = %path.display(), "Formatting disabled");
        Ok(())
    }
}

/// Runs an external formatter command with the file path appended, e.g.
/// `prettier --write <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a formatter from a full command line. Returns `None` for an
    /// empty command.
    #[must_use]
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandFormatter {
    fn default() -> Self {
        Self::new("prettier", ["--write"])
    }
}

impl SchemaFormatter for CommandFormatter {
    fn format(&self, path: &Path) -> Result<(), ReconcileError> {
        debug!(program = %self.program, path = %path.display(), "Formatting schema file");
        let output = run(Command::new(&self.program).args(&self.args).arg(path), &self.program)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ReconcileError::process(
                &self.program,
                output.status,
                &output.stdout,
                &output.stderr,
            ))
        }
    }
}

/// Highest exit status `git merge-file` uses to report a conflict count.
const MAX_CONFLICT_STATUS: i32 = 127;

/// Conflict marker labels.
const MINE_LABEL: &str = "existing";
const BASE_LABEL: &str = "base";
const THEIRS_LABEL: &str = "generated";

/// `git merge-file`, which exits with the number of conflicts (capped at
/// 127) or a negative status on failure.
///
/// The reconciler always passes an empty base, so every conflict hunk is
/// made of insertions. Hunks that only hold lines from one side are kept,
/// and only regions where both sides disagree are reported as conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitMergeFile {
    program: String,
}

impl GitMergeFile {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Uses a different `git` binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitMergeFile {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeTool for GitMergeFile {
    fn merge(&self, target: &Path, base: &Path, theirs: &Path) -> Result<(), ReconcileError> {
        debug!(target = %target.display(), "Running three-way merge");
        let output = run(
            Command::new(&self.program)
                .arg("merge-file")
                .args(["-L", MINE_LABEL, "-L", BASE_LABEL, "-L", THEIRS_LABEL])
                .arg(target)
                .arg(base)
                .arg(theirs),
            &self.program,
        )?;

        match output.status.code() {
            Some(0) => Ok(()),
            Some(reported @ 1..=MAX_CONFLICT_STATUS) => {
                let merged =
                    fs::read_to_string(target).map_err(|e| ReconcileError::io(target, e))?;
                let resolution = resolve_insertions(&merged, MINE_LABEL, THEIRS_LABEL);
                fs::write(target, &resolution.text).map_err(|e| ReconcileError::io(target, e))?;

                debug!(
                    target = %target.display(),
                    reported,
                    remaining = resolution.conflicts,
                    "Resolved insertion-only merge hunks"
                );

                if resolution.conflicts == 0 {
                    Ok(())
                } else {
                    Err(ReconcileError::Conflict {
                        path: target.to_path_buf(),
                        conflicts: resolution.conflicts,
                    })
                }
            }
            _ => Err(ReconcileError::process(
                &self.program,
                output.status,
                &output.stdout,
                &output.stderr,
            )),
        }
    }
}

fn run(command: &mut Command, program: &str) -> Result<Output, ReconcileError> {
    command.output().map_err(|source| ReconcileError::Spawn {
        program: program.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_from_command() {
        let command = vec!["prettier".to_string(), "--write".to_string()];
        let formatter = CommandFormatter::from_command(&command).unwrap();
        assert_eq!(formatter, CommandFormatter::default());
        assert_eq!(formatter.program(), "prettier");
        assert!(CommandFormatter::from_command(&[]).is_none());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let formatter = CommandFormatter::new("modelgql-no-such-formatter", Vec::<String>::new());
        let err = formatter.format(Path::new("schema.graphql")).unwrap_err();
        assert!(matches!(err, ReconcileError::Spawn { .. }));
    }

    #[test]
    fn test_missing_merge_program_is_spawn_error() {
        let err = GitMergeFile::with_program("modelgql-no-such-git")
            .merge(
                Path::new("schema.graphql"),
                Path::new("base.graphql"),
                Path::new("new.graphql"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Spawn { ref program, .. } if program == "modelgql-no-such-git"
        ));
    }

    #[test]
    fn test_noop_formatter() {
        assert!(NoopFormatter.format(Path::new("missing.graphql")).is_ok());
    }
}
