//! End-to-end generation: metadata -> entities -> schema text -> disk.

use std::path::PathBuf;

use tracing::info;

use crate::Result;
use crate::config::GeneratorConfig;
use crate::emitter::{EmitOptions, SchemaEmitter};
use crate::error::SchemaError;
use crate::metadata::{JsonManifestExtractor, MetadataExtractor};
use crate::model::{Entity, ModelBuilder};
use crate::pluralize::{EnglishPluralizer, Pluralizer};
use crate::reconcile::{GitMergeFile, MergeTool, ReconcileOutcome, Reconciler, write_schema};

/// Result of a generation pass.
#[derive(Debug, Clone)]
pub struct GeneratedSchema {
    pub entities: Vec<Entity>,
    pub text: String,
}

/// Extracts metadata, builds entities and renders the schema.
///
/// # Errors
///
/// Returns [`SchemaError::Extract`] if the metadata cannot be read.
pub fn generate(
    extractor: &dyn MetadataExtractor,
    options: EmitOptions,
    pluralizer: &dyn Pluralizer,
) -> Result<GeneratedSchema> {
    let records = extractor.extract()?;
    let entities = ModelBuilder::build(&records);
    info!(
        records = records.len(),
        entities = entities.len(),
        "Built entity model"
    );

    let text = SchemaEmitter::new(options, pluralizer).render(&entities);
    Ok(GeneratedSchema { entities, text })
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub entities: usize,
    /// `None` when the output was overwritten without merging.
    pub outcome: Option<ReconcileOutcome>,
}

/// Runs the full pipeline for a configuration with the default services:
/// JSON manifests, English plurals, the configured formatter and
/// `git merge-file`.
///
/// # Errors
///
/// Fails on invalid configuration, unreadable metadata, I/O errors, a
/// failing formatter or merge tool, and merge conflicts.
pub fn run(config: &GeneratorConfig) -> Result<RunSummary> {
    run_with(
        config,
        &JsonManifestExtractor::new(&config.input),
        &EnglishPluralizer,
        &GitMergeFile::new(),
    )
}

/// [`run`] with injected extractor, pluralizer and merge tool.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    config: &GeneratorConfig,
    extractor: &dyn MetadataExtractor,
    pluralizer: &dyn Pluralizer,
    merge_tool: &dyn MergeTool,
) -> Result<RunSummary> {
    config.validate().map_err(SchemaError::Config)?;

    let generated = generate(extractor, config.to_emit_options(), pluralizer)?;

    let outcome = if config.merge {
        let formatter = config.schema_formatter();
        let reconciler = Reconciler::new(formatter.as_ref(), merge_tool);
        Some(reconciler.reconcile(&config.output, &generated.text)?)
    } else {
        write_schema(&config.output, &generated.text)?;
        None
    };

    info!(output = %config.output.display(), ?outcome, "Schema written");

    Ok(RunSummary {
        output: config.output.clone(),
        entities: generated.entities.len(),
        outcome,
    })
}
