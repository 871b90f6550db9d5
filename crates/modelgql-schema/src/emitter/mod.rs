//! Schema emitter.
//!
//! Turns the entity model into a schema [`Document`] and renders it. The
//! emission order is fixed so regenerated files diff cleanly:
//!
//! 1. directive declarations
//! 2. one object type per entity
//! 3. generic scalar filter inputs
//! 4. per-entity `Filter`, `Pagination` and `Where` inputs
//! 5. the `Query` root
//! 6. mutation inputs and payloads (when enabled)
//! 7. the `Mutation` root (when enabled)

mod filters;
mod mutation;
mod query;

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::mapping::{ScalarKind, to_schema_name};
use crate::model::{Entity, FieldDescriptor};
use crate::pluralize::Pluralizer;
use crate::sdl::{DirectiveDefinition, Document, TypeRef};

/// Pagination arguments added to plural queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationStyle {
    None,
    /// `limit` / `page` input per entity.
    #[default]
    Offset,
}

/// Options controlling which blocks the emitter produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub generate_mutations: bool,
    pub generate_batch_create: bool,
    pub generate_batch_update: bool,
    pub generate_batch_delete: bool,
    /// Fields left out of create / update inputs, by schema or source name.
    pub skip_input_fields: BTreeSet<String>,
    /// Directives declared and attached to every query and mutation field.
    pub extra_directives: Vec<String>,
    pub pagination: PaginationStyle,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            generate_mutations: true,
            generate_batch_create: true,
            generate_batch_update: true,
            generate_batch_delete: true,
            skip_input_fields: BTreeSet::new(),
            extra_directives: Vec::new(),
            pagination: PaginationStyle::default(),
        }
    }
}

/// Type and field names derived from one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntityNames {
    /// `User`
    pub type_name: String,
    /// `Users`
    pub plural_type: String,
    /// `user`
    pub field: String,
    /// `users`
    pub plural_field: String,
}

impl EntityNames {
    pub fn filter(&self) -> String {
        format!("{}Filter", self.type_name)
    }

    pub fn pagination(&self) -> String {
        format!("{}Pagination", self.type_name)
    }

    pub fn where_input(&self) -> String {
        where_name(&self.type_name)
    }

    pub fn create_input(&self) -> String {
        format!("{}CreateInput", self.type_name)
    }

    pub fn update_input(&self) -> String {
        format!("{}UpdateInput", self.type_name)
    }

    pub fn payload(&self) -> String {
        format!("{}Payload", self.type_name)
    }

    pub fn delete_payload(&self) -> String {
        format!("{}DeletePayload", self.type_name)
    }

    pub fn batch_create_input(&self) -> String {
        format!("{}CreateInput", self.plural_type)
    }

    pub fn batch_payload(&self) -> String {
        format!("{}Payload", self.plural_type)
    }

    pub fn batch_update_payload(&self) -> String {
        format!("{}UpdatePayload", self.plural_type)
    }

    pub fn batch_delete_payload(&self) -> String {
        format!("{}DeletePayload", self.plural_type)
    }
}

pub(crate) fn where_name(type_name: &str) -> String {
    format!("{type_name}Where")
}

/// Renders entities into schema text.
pub struct SchemaEmitter<'a> {
    options: EmitOptions,
    pluralizer: &'a dyn Pluralizer,
}

impl<'a> SchemaEmitter<'a> {
    pub fn new(options: EmitOptions, pluralizer: &'a dyn Pluralizer) -> Self {
        Self {
            options,
            pluralizer,
        }
    }

    /// Renders the full schema text.
    #[must_use]
    pub fn render(&self, entities: &[Entity]) -> String {
        self.build_document(entities).to_string()
    }

    /// Builds the schema document without rendering it.
    #[must_use]
    pub fn build_document(&self, entities: &[Entity]) -> Document {
        debug!(
            entities = entities.len(),
            mutations = self.options.generate_mutations,
            "Building schema document"
        );

        let known: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        let names: Vec<EntityNames> = entities.iter().map(|e| self.names(e, &known)).collect();

        let mut document = Document::new();

        document.extend(
            self.options
                .extra_directives
                .iter()
                .map(DirectiveDefinition::new),
        );

        document.extend(entities.iter().map(query::object_type));

        document.extend(filters::scalar_filters());

        for (entity, names) in entities.iter().zip(&names) {
            document.push(filters::entity_filter(names));
            if self.options.pagination == PaginationStyle::Offset {
                document.push(filters::entity_pagination(names));
            }
            document.push(filters::entity_where(entity, names, &known));
        }

        document.push(query::query_root(&names, &self.options));

        if self.options.generate_mutations {
            for (entity, names) in entities.iter().zip(&names) {
                document.extend(mutation::entity_definitions(entity, names, &self.options));
            }
            document.push(mutation::mutation_root(&names, &self.options));
        }

        document
    }

    /// Derives the names for one entity. A plural that equals the entity's
    /// own name or another entity's name gets a `List` suffix so the
    /// derived types stay unique.
    fn names(&self, entity: &Entity, known: &HashSet<&str>) -> EntityNames {
        let mut plural_type = self.pluralizer.plural(&entity.name);
        if plural_type == entity.name {
            plural_type.push_str("List");
        } else if known.contains(plural_type.as_str()) {
            warn!(
                entity = %entity.name,
                plural = %plural_type,
                "Plural name collides with another entity, adding the List suffix"
            );
            plural_type.push_str("List");
        }
        EntityNames {
            field: to_schema_name(&entity.name),
            plural_field: to_schema_name(&plural_type),
            type_name: entity.name.clone(),
            plural_type,
        }
    }
}

/// Output type of a field: `[T!]` for collections, `!` when required.
pub(crate) fn field_type(field: &FieldDescriptor) -> TypeRef {
    let ty = if field.is_array {
        TypeRef::named_nn_list(&field.graphql_type)
    } else {
        TypeRef::named(&field.graphql_type)
    };
    if field.is_required { ty.non_null() } else { ty }
}

/// Scalar fields that belong in create / update inputs.
pub(crate) fn input_fields<'e>(
    entity: &'e Entity,
    options: &'e EmitOptions,
) -> impl Iterator<Item = (&'e FieldDescriptor, ScalarKind)> + 'e {
    entity.scalar_fields().filter_map(move |field| {
        if field.is_identifier()
            || options.skip_input_fields.contains(&field.name)
            || options.skip_input_fields.contains(&field.source_name)
        {
            return None;
        }
        field.scalar_kind().map(|kind| (field, kind))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RawTypedField;
    use crate::model::ModelBuilder;
    use crate::pluralize::EnglishPluralizer;

    fn entities() -> Vec<Entity> {
        let records: Vec<RawTypedField> = [
            ("Organization.ID", "int"),
            ("Organization.Name", "string"),
            ("organizationR.Users", "UserSlice"),
            ("User.ID", "int"),
            ("User.Email", "string"),
            ("User.Age", "null.Int"),
            ("User.OrganizationID", "int"),
            ("User.CreatedAt", "time.Time"),
            ("userR.Organization", "*Organization"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (key, raw))| RawTypedField::parse_key(key, *raw, i).unwrap())
        .collect();
        ModelBuilder::build(&records)
    }

    #[test]
    fn test_emission_order() {
        let emitter = SchemaEmitter::new(
            EmitOptions {
                extra_directives: vec!["isAuthenticated".into()],
                ..EmitOptions::default()
            },
            &EnglishPluralizer,
        );
        let document = emitter.build_document(&entities());
        assert_eq!(
            document.directive("isAuthenticated").unwrap().to_string(),
            "directive @isAuthenticated on FIELD_DEFINITION"
        );
        let names: Vec<&str> = document.names().collect();

        assert_eq!(
            &names[..8],
            [
                "isAuthenticated",
                "Organization",
                "User",
                "IDFilter",
                "StringFilter",
                "IntFilter",
                "FloatFilter",
                "BooleanFilter",
            ]
        );
        assert_eq!(
            &names[8..14],
            [
                "OrganizationFilter",
                "OrganizationPagination",
                "OrganizationWhere",
                "UserFilter",
                "UserPagination",
                "UserWhere",
            ]
        );
        assert_eq!(names[14], "Query");
        assert_eq!(names.last(), Some(&"Mutation"));
    }

    #[test]
    fn test_plural_collision_gets_suffix() {
        let emitter = SchemaEmitter::new(EmitOptions::default(), &EnglishPluralizer);
        let names = emitter.names(&Entity::new("Sheep", Vec::new()), &HashSet::from(["Sheep"]));
        assert_eq!(names.plural_type, "SheepList");
        assert_eq!(names.plural_field, "sheepList");
        assert_eq!(names.field, "sheep");
    }

    #[test]
    fn test_plural_matching_other_entity_gets_suffix() {
        let records: Vec<RawTypedField> = [("User.ID", "int"), ("Users.ID", "int")]
            .iter()
            .enumerate()
            .map(|(i, (key, raw))| RawTypedField::parse_key(key, *raw, i).unwrap())
            .collect();
        let emitter = SchemaEmitter::new(EmitOptions::default(), &EnglishPluralizer);
        let document = emitter.build_document(&ModelBuilder::build(&records));

        let names: Vec<&str> = document.names().collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len(), "duplicate definitions in {names:?}");
        assert!(unique.contains("UsersCreateInput"));
        assert!(unique.contains("UsersListCreateInput"));

        let query = document.object("Query").unwrap();
        let fields: Vec<&str> = query.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["user", "usersList", "users", "userses"]);
    }

    #[test]
    fn test_input_fields_skip_identifier_relations_and_skip_list() {
        let options = EmitOptions {
            skip_input_fields: ["CreatedAt".to_string()].into(),
            ..EmitOptions::default()
        };
        let entities = entities();
        let user = entities.iter().find(|e| e.name == "User").unwrap();
        let names: Vec<&str> = input_fields(user, &options)
            .map(|(f, _)| f.name.as_str())
            .collect();
        assert_eq!(names, ["email", "age", "organizationId"]);
    }

    #[test]
    fn test_field_types() {
        let entities = entities();
        let user = entities.iter().find(|e| e.name == "User").unwrap();
        assert_eq!(field_type(user.field("email").unwrap()).to_string(), "String!");
        assert_eq!(field_type(user.field("age").unwrap()).to_string(), "Int");
        assert_eq!(
            field_type(user.field("organization").unwrap()).to_string(),
            "Organization!"
        );

        let organization = entities.iter().find(|e| e.name == "Organization").unwrap();
        assert_eq!(
            field_type(organization.field("users").unwrap()).to_string(),
            "[User!]"
        );
    }
}
