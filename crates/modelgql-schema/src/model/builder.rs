//! Groups raw field records into entities.
//!
//! The extractor reports two kinds of records:
//!
//! - entity-owned fields, keyed by the model struct (`User.Email`)
//! - relation fields, keyed by the model's relation container struct
//!   (`userR.Organization`), which has a lower-case initial and an `R`
//!   suffix
//!
//! Relations are attached to their owning entity after its own fields and
//! paired with their foreign-key scalar (`OrganizationID`) to decide
//! nullability.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::entity::{Entity, FieldDescriptor};
use crate::mapping::{infer_required, infer_type, object_type_name, to_entity_name, to_schema_name};
use crate::metadata::RawTypedField;

/// Suffix of relation container struct names.
pub const RELATION_CONTAINER_SUFFIX: &str = "R";

/// Bookkeeping fields on model structs that hold loaded relations.
pub const PLACEHOLDER_FIELDS: &[&str] = &["L", "R"];

/// Audit timestamps, in the order they are pinned at the end of an entity.
pub const AUDIT_FIELDS: &[&str] = &["CreatedAt", "UpdatedAt", "DeletedAt"];

/// Suffix that links a foreign-key scalar to its relation.
const FOREIGN_KEY_SUFFIX: &str = "ID";

/// Builds entities from raw metadata records.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    owned: IndexMap<String, Vec<FieldDescriptor>>,
    relations: IndexMap<String, Vec<FieldDescriptor>>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the sorted entity list from raw records.
    ///
    /// Records are processed in declaration order regardless of the order
    /// they are supplied in.
    #[must_use]
    pub fn build(records: &[RawTypedField]) -> Vec<Entity> {
        let mut ordered: Vec<&RawTypedField> = records.iter().collect();
        ordered.sort_by_key(|r| r.declaration_order);

        let mut builder = Self::new();
        for record in ordered {
            builder.push(record);
        }
        builder.finish()
    }

    /// Adds one record.
    pub fn push(&mut self, record: &RawTypedField) {
        if starts_uppercase(&record.entity_key) {
            // Register the entity even if every field turns out to be a
            // placeholder.
            let fields = self.owned.entry(record.entity_key.clone()).or_default();
            if PLACEHOLDER_FIELDS.contains(&record.field_key.as_str()) {
                trace!(key = %record.key(), "Skipping relation placeholder field");
                return;
            }
            fields.push(scalar_descriptor(record));
            return;
        }

        match relation_owner(&record.entity_key) {
            Some(owner) => {
                debug!(
                    relation = %record.field_key,
                    entity = %owner,
                    "Adding relation"
                );
                self.relations
                    .entry(owner)
                    .or_default()
                    .push(relation_descriptor(record));
            }
            None => {
                trace!(key = %record.key(), "Ignoring record of unrecognized container");
            }
        }
    }

    /// Merges relations into their entities and sorts by name.
    #[must_use]
    pub fn finish(self) -> Vec<Entity> {
        let Self {
            mut owned,
            relations,
        } = self;

        for fields in owned.values_mut() {
            pin_audit_fields(fields);
        }

        for (owner, fields) in relations {
            if !owned.contains_key(&owner) {
                debug!(entity = %owner, "Entity has relations only");
            }
            owned.entry(owner).or_default().extend(fields);
        }

        let mut entities: Vec<Entity> = owned
            .into_iter()
            .map(|(name, fields)| {
                let mut fields = dedupe_fields(&name, fields);
                pair_relations(&name, &mut fields);
                Entity::new(name, fields)
            })
            .collect();

        entities.sort_by(|a, b| a.name.cmp(&b.name));
        entities
    }
}

fn starts_uppercase(key: &str) -> bool {
    key.chars().next().is_some_and(char::is_uppercase)
}

/// Owning entity name of a relation container key (`userR` -> `User`).
fn relation_owner(entity_key: &str) -> Option<String> {
    let prefix = entity_key.strip_suffix(RELATION_CONTAINER_SUFFIX)?;
    if prefix.is_empty() {
        return None;
    }
    Some(to_entity_name(prefix))
}

fn scalar_descriptor(record: &RawTypedField) -> FieldDescriptor {
    let (graphql_type, is_array) = infer_type(&record.field_key, &record.raw_type);
    trace!(key = %record.key(), raw_type = %record.raw_type, graphql_type = %graphql_type, "Mapped field");
    FieldDescriptor {
        name: to_schema_name(&record.field_key),
        graphql_type,
        is_array,
        is_required: infer_required(&record.raw_type),
        is_relation: false,
        relation_name: None,
        relation_target_type: None,
        source_name: record.field_key.clone(),
        source_type: record.raw_type.clone(),
        suppressed: false,
    }
}

fn relation_descriptor(record: &RawTypedField) -> FieldDescriptor {
    // Relation targets are object types by construction; scalar inference
    // would misread names like `Appointment` as integers.
    let target = object_type_name(&record.raw_type);
    FieldDescriptor {
        name: to_schema_name(&record.field_key),
        graphql_type: target.clone(),
        is_array: crate::mapping::is_array(&record.raw_type),
        is_required: false,
        is_relation: true,
        relation_name: Some(record.field_key.clone()),
        relation_target_type: Some(target),
        source_name: record.field_key.clone(),
        source_type: record.raw_type.clone(),
        suppressed: false,
    }
}

fn audit_rank(field: &FieldDescriptor) -> Option<usize> {
    AUDIT_FIELDS
        .iter()
        .position(|audit| *audit == field.source_name)
}

/// Moves audit timestamps behind the other fields, keeping everything else
/// in arrival order.
fn pin_audit_fields(fields: &mut [FieldDescriptor]) {
    fields.sort_by_key(|f| audit_rank(f).map_or(0, |rank| rank + 1));
}

fn dedupe_fields(entity: &str, fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .filter(|field| {
            let fresh = seen.insert(field.name.clone());
            if !fresh {
                warn!(
                    entity,
                    field = %field.name,
                    source = %field.source_name,
                    "Duplicate schema field name, keeping the first declaration"
                );
            }
            fresh
        })
        .collect()
}

/// Copies foreign-key nullability onto relations and hides the paired
/// scalar. Unpaired relations stay optional.
fn pair_relations(entity: &str, fields: &mut [FieldDescriptor]) {
    for index in 0..fields.len() {
        let Some(relation_name) = fields[index].relation_name.clone() else {
            continue;
        };
        let foreign_key = format!("{relation_name}{FOREIGN_KEY_SUFFIX}");

        let paired = fields
            .iter()
            .position(|f| !f.is_relation && f.source_name == foreign_key);

        match paired {
            Some(scalar) => {
                let required = fields[scalar].is_required;
                fields[scalar].suppressed = true;
                fields[index].is_required = required;
                debug!(
                    entity,
                    relation = %relation_name,
                    foreign_key = %foreign_key,
                    required,
                    "Paired relation with foreign key"
                );
            }
            None => {
                trace!(entity, relation = %relation_name, "No foreign key, relation stays optional");
            }
        }
    }
}
