//! Model metadata records and the extractor boundary.
//!
//! The source parser that reads ORM model files lives outside this crate. It
//! hands over a flat, ordered list of `<Entity>.<Field> -> raw type` records,
//! either directly through [`MetadataExtractor`] or as JSON manifests read by
//! [`JsonManifestExtractor`].

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::ExtractError;

/// A single typed field record as produced by the metadata extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTypedField {
    /// Owning struct name. A lower-case initial marks a relation container.
    pub entity_key: String,
    /// Field name as declared in the model source.
    pub field_key: String,
    /// Raw type string (`int`, `null.String`, `*User`, `PostSlice`, ...).
    pub raw_type: String,
    /// Stable position of the declaration in the source.
    pub declaration_order: usize,
}

impl RawTypedField {
    pub fn new(
        entity_key: impl Into<String>,
        field_key: impl Into<String>,
        raw_type: impl Into<String>,
        declaration_order: usize,
    ) -> Self {
        Self {
            entity_key: entity_key.into(),
            field_key: field_key.into(),
            raw_type: raw_type.into(),
            declaration_order,
        }
    }

    /// Builds a record from a dotted `<Entity>.<Field>` key.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidKey`] unless the key has exactly one
    /// dot with a non-empty name on each side.
    pub fn parse_key(
        key: &str,
        raw_type: impl Into<String>,
        declaration_order: usize,
    ) -> Result<Self, ExtractError> {
        match key.split_once('.') {
            Some((entity, field))
                if !entity.is_empty() && !field.is_empty() && !field.contains('.') =>
            {
                Ok(Self::new(entity, field, raw_type, declaration_order))
            }
            _ => Err(ExtractError::InvalidKey(key.to_string())),
        }
    }

    /// The dotted `<Entity>.<Field>` key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}", self.entity_key, self.field_key)
    }
}

/// Source of model metadata records.
pub trait MetadataExtractor {
    /// Returns all records in declaration order.
    fn extract(&self) -> Result<Vec<RawTypedField>, ExtractError>;
}

impl MetadataExtractor for Vec<RawTypedField> {
    fn extract(&self) -> Result<Vec<RawTypedField>, ExtractError> {
        Ok(self.clone())
    }
}

/// A manifest entry on disk.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    key: String,
    #[serde(rename = "type")]
    raw_type: String,
    #[serde(default)]
    order: Option<usize>,
}

/// Reads metadata from the `*.json` manifests in a directory.
///
/// Each manifest holds an array of records:
///
/// ```json
/// [
///   { "key": "User.ID", "type": "int" },
///   { "key": "User.Email", "type": "string" },
///   { "key": "userR.Organization", "type": "*Organization" }
/// ]
/// ```
///
/// Files are read in file-name order. Entries without an explicit `order`
/// are numbered by their position across all files.
#[derive(Debug, Clone)]
pub struct JsonManifestExtractor {
    directory: PathBuf,
}

impl JsonManifestExtractor {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn manifest_paths(&self) -> Result<Vec<PathBuf>, ExtractError> {
        let entries =
            fs::read_dir(&self.directory).map_err(|e| ExtractError::io(&self.directory, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ExtractError::io(&self.directory, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl MetadataExtractor for JsonManifestExtractor {
    fn extract(&self) -> Result<Vec<RawTypedField>, ExtractError> {
        let paths = self.manifest_paths()?;
        debug!(
            directory = %self.directory.display(),
            manifests = paths.len(),
            "Reading model metadata"
        );

        let mut records = Vec::new();
        for path in paths {
            let content = fs::read_to_string(&path).map_err(|e| ExtractError::io(&path, e))?;
            let entries: Vec<ManifestEntry> =
                serde_json::from_str(&content).map_err(|source| ExtractError::Json {
                    path: path.clone(),
                    source,
                })?;

            trace!(path = %path.display(), entries = entries.len(), "Parsed manifest");

            for entry in entries {
                let order = entry.order.unwrap_or(records.len());
                records.push(RawTypedField::parse_key(&entry.key, entry.raw_type, order)?);
            }
        }

        Ok(records)
    }
}
