//! Schema definition nodes.
//!
//! The emitter builds a [`Document`] out of these nodes first and turns it
//! into text in a single pass (see the `Display` impls in `writer.rs`).
//! Builders follow a chained style:
//!
//! ```
//! use modelgql_schema::sdl::{Field, InputValue, Object, TypeRef};
//!
//! let query = Object::new("Query").field(
//!     Field::new("user", TypeRef::named_nn("User"))
//!         .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID))),
//! );
//! assert_eq!(query.fields.len(), 1);
//! ```

use super::types::TypeRef;

/// Location used for all generated directive declarations.
pub const FIELD_DEFINITION: &str = "FIELD_DEFINITION";

/// `directive @name on LOCATION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub locations: Vec<String>,
}

impl DirectiveDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: vec![FIELD_DEFINITION.to_string()],
        }
    }
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    pub name: String,
    pub ty: TypeRef,
}

impl InputValue {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
    pub directives: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            ty,
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn argument(mut self, argument: InputValue) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn directives<I, S>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives.extend(directives.into_iter().map(Into::into));
        self
    }
}

/// `type Name { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// `input Name { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObject {
    pub name: String,
    pub fields: Vec<InputValue>,
}

impl InputObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: InputValue) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&InputValue> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Directive(DirectiveDefinition),
    Object(Object),
    InputObject(InputObject),
}

impl Definition {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Directive(d) => &d.name,
            Self::Object(o) => &o.name,
            Self::InputObject(i) => &i.name,
        }
    }
}

impl From<DirectiveDefinition> for Definition {
    fn from(value: DirectiveDefinition) -> Self {
        Self::Directive(value)
    }
}

impl From<Object> for Definition {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<InputObject> for Definition {
    fn from(value: InputObject) -> Self {
        Self::InputObject(value)
    }
}

/// An ordered schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, definition: impl Into<Definition>) {
        self.definitions.push(definition.into());
    }

    pub fn extend<I>(&mut self, definitions: I)
    where
        I: IntoIterator,
        I::Item: Into<Definition>,
    {
        self.definitions
            .extend(definitions.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.definitions.iter().find_map(|d| match d {
            Definition::Object(o) if o.name == name => Some(o),
            _ => None,
        })
    }

    #[must_use]
    pub fn input_object(&self, name: &str) -> Option<&InputObject> {
        self.definitions.iter().find_map(|d| match d {
            Definition::InputObject(i) if i.name == name => Some(i),
            _ => None,
        })
    }

    #[must_use]
    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.definitions.iter().find_map(|d| match d {
            Definition::Directive(dir) if dir.name == name => Some(dir),
            _ => None,
        })
    }

    /// Definition names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(Definition::name)
    }
}
