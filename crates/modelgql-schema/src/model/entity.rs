//! Entity and field descriptors.

use crate::mapping::ScalarKind;

/// A single schema field of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Lower-camel schema field name.
    pub name: String,
    /// GraphQL type name (scalar or object type).
    pub graphql_type: String,
    pub is_array: bool,
    pub is_required: bool,
    pub is_relation: bool,
    /// Source field name of the relation (`Organization`).
    pub relation_name: Option<String>,
    /// Entity type the relation points to.
    pub relation_target_type: Option<String>,
    /// Field name as declared in the model source.
    pub source_name: String,
    /// Raw type as declared in the model source.
    pub source_type: String,
    /// Foreign-key scalar hidden from the object type because a relation
    /// field covers it.
    pub suppressed: bool,
}

impl FieldDescriptor {
    /// The scalar kind of a non-relation field, if its type is a known scalar.
    #[must_use]
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        if self.is_relation {
            return None;
        }
        ScalarKind::from_graphql_name(&self.graphql_type)
    }

    /// Whether this is the entity's identifier field.
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.name == "id"
    }
}

/// A named schema object type with its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Entity {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Fields rendered on the object type.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.suppressed)
    }

    /// Non-relation fields, including suppressed foreign keys.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_relation)
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_relation)
    }

    /// Looks up a field by schema name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
