//! Object types and the query root.

use tracing::trace;

use super::{EmitOptions, EntityNames, PaginationStyle, field_type};
use crate::model::Entity;
use crate::sdl::{Field, InputValue, Object, TypeRef};

/// Object type for an entity. Foreign keys covered by a relation are left
/// out.
pub(super) fn object_type(entity: &Entity) -> Object {
    trace!(entity = %entity.name, "Emitting object type");
    entity
        .visible_fields()
        .fold(Object::new(&entity.name), |object, field| {
            object.field(Field::new(&field.name, field_type(field)))
        })
}

/// `type Query` with a singular and a plural field per entity.
pub(super) fn query_root(entities: &[EntityNames], options: &EmitOptions) -> Object {
    let directives = &options.extra_directives;
    let mut query = Object::new("Query");

    for names in entities {
        query = query.field(
            Field::new(&names.field, TypeRef::named_nn(&names.type_name))
                .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
                .directives(directives),
        );

        let mut plural = Field::new(
            &names.plural_field,
            TypeRef::named_nn_list_nn(&names.type_name),
        )
        .argument(InputValue::new("filter", TypeRef::named(names.filter())));
        if options.pagination == PaginationStyle::Offset {
            plural = plural.argument(InputValue::new(
                "pagination",
                TypeRef::named(names.pagination()),
            ));
        }
        query = query.field(plural.directives(directives));
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDescriptor;

    fn names() -> EntityNames {
        EntityNames {
            type_name: "Category".into(),
            plural_type: "Categories".into(),
            field: "category".into(),
            plural_field: "categories".into(),
        }
    }

    #[test]
    fn test_query_fields() {
        let options = EmitOptions {
            extra_directives: vec!["isAuthenticated".into()],
            ..EmitOptions::default()
        };
        let query = query_root(&[names()], &options);

        assert_eq!(
            query.get_field("category").unwrap().to_string(),
            "category(id: ID!): Category! @isAuthenticated"
        );
        assert_eq!(
            query.get_field("categories").unwrap().to_string(),
            "categories(filter: CategoryFilter, pagination: CategoryPagination): [Category!]! @isAuthenticated"
        );
    }

    #[test]
    fn test_query_without_pagination() {
        let options = EmitOptions {
            pagination: PaginationStyle::None,
            ..EmitOptions::default()
        };
        let query = query_root(&[names()], &options);
        assert_eq!(
            query.get_field("categories").unwrap().to_string(),
            "categories(filter: CategoryFilter): [Category!]!"
        );
    }

    #[test]
    fn test_object_type_hides_suppressed_fields() {
        let field = |name: &str, suppressed: bool| FieldDescriptor {
            name: name.into(),
            graphql_type: "ID".into(),
            is_array: false,
            is_required: true,
            is_relation: false,
            relation_name: None,
            relation_target_type: None,
            source_name: name.into(),
            source_type: "int".into(),
            suppressed,
        };
        let entity = Entity::new("Post", vec![field("id", false), field("authorId", true)]);
        assert_eq!(object_type(&entity).to_string(), "type Post {\n  id: ID!\n}");
    }
}
