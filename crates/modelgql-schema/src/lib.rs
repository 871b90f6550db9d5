//! # modelgql-schema
//!
//! Generates a GraphQL schema definition document from ORM model metadata
//! and merges regenerated output into a hand-edited schema file.
//!
//! ## Overview
//!
//! The pipeline runs in one synchronous pass:
//!
//! 1. a [`MetadataExtractor`] yields `<Entity>.<Field> -> raw type` records
//! 2. [`ModelBuilder`] groups them into entities and resolves relations
//! 3. [`SchemaEmitter`] builds and renders the schema document
//! 4. [`Reconciler`] merges the text into the existing file, if any
//!
//! Output is deterministic for unchanged input, which keeps merge hunks
//! small across regenerations.
//!
//! ## Modules
//!
//! - [`mapping`] - Raw type and identifier mapping
//! - [`metadata`] - Input records and extractors
//! - [`model`] - Entity model builder
//! - [`sdl`] - Typed schema nodes and their text form
//! - [`emitter`] - Schema document generation
//! - [`pluralize`] - Plural entity names
//! - [`reconcile`] - Regeneration merge
//! - [`config`] - Configuration options
//! - [`error`] - Error types

pub mod config;
pub mod emitter;
pub mod error;
pub mod mapping;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod pluralize;
pub mod reconcile;
pub mod sdl;

// Re-export main types
pub use config::GeneratorConfig;
pub use emitter::{EmitOptions, PaginationStyle, SchemaEmitter};
pub use error::{ExtractError, ReconcileError, SchemaError};
pub use metadata::{JsonManifestExtractor, MetadataExtractor, RawTypedField};
pub use model::{Entity, FieldDescriptor, ModelBuilder};
pub use pipeline::{GeneratedSchema, RunSummary, generate, run, run_with};
pub use pluralize::{EnglishPluralizer, Pluralizer};
pub use reconcile::{ReconcileOutcome, Reconciler};

/// Result type for schema generation.
pub type Result<T> = std::result::Result<T, SchemaError>;
