//! Regeneration merge.
//!
//! A regenerated schema must not wipe out hand-written additions in the
//! existing file. [`Reconciler::reconcile`] runs a three-way merge with an
//! empty base, the existing file as "mine" and the fresh output as "theirs",
//! so both sides count as insertions and disjoint edits are unioned.
//!
//! Conflict hunks that only hold lines from one side are kept, so only
//! regions edited on both sides end up as conflicts.
//!
//! Both inputs go through the formatter first so that hunks line up on
//! content rather than whitespace. Scratch files live next to the target
//! and are removed on every exit path; a conflicting merge leaves the
//! target in place with conflict markers.

mod process;
mod union;

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, warn};

use crate::error::ReconcileError;

pub use process::{CommandFormatter, GitMergeFile, MergeTool, NoopFormatter, SchemaFormatter};

/// What [`Reconciler::reconcile`] did with the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No file existed; the new schema was written as is.
    Created,
    /// The new schema was merged into the existing file.
    Merged,
}

/// Merges regenerated schema text into an existing schema file.
pub struct Reconciler<'a> {
    formatter: &'a dyn SchemaFormatter,
    merge_tool: &'a dyn MergeTool,
}

impl<'a> Reconciler<'a> {
    pub fn new(formatter: &'a dyn SchemaFormatter, merge_tool: &'a dyn MergeTool) -> Self {
        Self {
            formatter,
            merge_tool,
        }
    }

    /// Writes `new_text` to `path`, merging with any existing content.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::Io`] when a file cannot be created, written or removed
    /// - [`ReconcileError::Spawn`] / [`ReconcileError::Process`] when the
    ///   formatter or merge tool cannot run or fails
    /// - [`ReconcileError::Conflict`] when the merge has conflicts; the
    ///   partially merged file is left at `path`
    pub fn reconcile(&self, path: &Path, new_text: &str) -> Result<ReconcileOutcome, ReconcileError> {
        if !path.exists() {
            info!(path = %path.display(), "No existing schema, writing new file");
            write_schema(path, new_text)?;
            return Ok(ReconcileOutcome::Created);
        }

        info!(path = %path.display(), "Merging regenerated schema into existing file");
        let dir = scratch_dir(path);

        let mut theirs = scratch_file(dir, "new")?;
        let theirs_path = theirs.path().to_path_buf();
        theirs
            .write_all(new_text.as_bytes())
            .and_then(|()| theirs.flush())
            .map_err(|e| ReconcileError::io(&theirs_path, e))?;

        self.formatter.format(path)?;
        self.formatter.format(theirs.path())?;

        let base = scratch_file(dir, "base")?;

        let merged = self.merge_tool.merge(path, base.path(), theirs.path());
        let cleanup = remove_scratch(base).and(remove_scratch(theirs));

        match (merged, cleanup) {
            (Ok(()), Ok(())) => {
                debug!(path = %path.display(), "Merge completed cleanly");
                Ok(ReconcileOutcome::Merged)
            }
            (Ok(()), Err(e)) => Err(e),
            (Err(e), cleanup) => {
                if let Err(cleanup_err) = cleanup {
                    warn!(error = %cleanup_err, "Failed to remove merge scratch file");
                }
                Err(e)
            }
        }
    }
}

/// Writes the schema text to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ReconcileError::Io`] if the directory or file cannot be written.
pub fn write_schema(path: &Path, text: &str) -> Result<(), ReconcileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ReconcileError::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| ReconcileError::io(path, e))
}

fn scratch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Scratch files carry a `.graphql` suffix so formatters pick the right
/// parser.
fn scratch_file(dir: &Path, role: &str) -> Result<NamedTempFile, ReconcileError> {
    Builder::new()
        .prefix(&format!(".modelgql-{role}-"))
        .suffix(".graphql")
        .tempfile_in(dir)
        .map_err(|e| ReconcileError::io(dir, e))
}

fn remove_scratch(file: NamedTempFile) -> Result<(), ReconcileError> {
    let path = file.path().to_path_buf();
    file.close().map_err(|e| ReconcileError::io(path, e))
}
