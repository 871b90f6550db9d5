//! Entity model built from raw metadata records.
//!
//! - [`ModelBuilder`] - Groups records per entity and resolves relations
//! - [`Entity`] / [`FieldDescriptor`] - The immutable result handed to the emitter

mod builder;
mod entity;

pub use builder::{AUDIT_FIELDS, ModelBuilder, PLACEHOLDER_FIELDS, RELATION_CONTAINER_SUFFIX};
pub use entity::{Entity, FieldDescriptor};
