//! Typed schema-definition-language nodes and their text form.

mod document;
mod types;
mod writer;

pub use document::{
    Definition, DirectiveDefinition, Document, FIELD_DEFINITION, Field, InputObject, InputValue,
    Object,
};
pub use types::TypeRef;
