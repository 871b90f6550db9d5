//! Filter, pagination and where inputs.

use std::collections::HashSet;

use tracing::warn;

use super::{EntityNames, where_name};
use crate::mapping::ScalarKind;
use crate::model::Entity;
use crate::sdl::{InputObject, InputValue, TypeRef};

/// Ordering comparisons on numeric kinds.
const ORDERING_OPERATORS: &[&str] = &[
    "lessThan",
    "lessThanOrEqualTo",
    "moreThan",
    "moreThanOrEqualTo",
];

/// Substring operators on strings. Each comes in a case-insensitive form and
/// a case-sensitive `Strict` form.
const STRING_OPERATORS: &[&str] = &[
    "startWith",
    "notStartWith",
    "endWith",
    "notEndWith",
    "contain",
    "notContain",
];

/// Generic filter input for one scalar kind.
pub(super) fn scalar_filter(kind: ScalarKind) -> InputObject {
    let scalar = kind.graphql_name();
    let mut input = InputObject::new(kind.filter_name())
        .field(InputValue::new("equalTo", TypeRef::named(scalar)))
        .field(InputValue::new("notEqualTo", TypeRef::named(scalar)));

    if kind.is_numeric() {
        for operator in ORDERING_OPERATORS {
            input = input.field(InputValue::new(*operator, TypeRef::named(scalar)));
        }
    }

    if kind == ScalarKind::String {
        for operator in STRING_OPERATORS {
            input = input.field(InputValue::new(*operator, TypeRef::named(scalar)));
        }
        for operator in STRING_OPERATORS {
            input = input.field(InputValue::new(
                format!("{operator}Strict"),
                TypeRef::named(scalar),
            ));
        }
    }

    input
        .field(InputValue::new("in", TypeRef::named_nn_list(scalar)))
        .field(InputValue::new("notIn", TypeRef::named_nn_list(scalar)))
}

/// Filter inputs for every scalar kind, in emission order.
pub(super) fn scalar_filters() -> impl Iterator<Item = InputObject> {
    ScalarKind::ALL.into_iter().map(scalar_filter)
}

/// `input UserFilter { search: String where: UserWhere }`
pub(super) fn entity_filter(names: &EntityNames) -> InputObject {
    InputObject::new(names.filter())
        .field(InputValue::new("search", TypeRef::named(TypeRef::STRING)))
        .field(InputValue::new("where", TypeRef::named(names.where_input())))
}

/// `input UserPagination { limit: Int! page: Int! }`
pub(super) fn entity_pagination(names: &EntityNames) -> InputObject {
    InputObject::new(names.pagination())
        .field(InputValue::new("limit", TypeRef::named_nn(TypeRef::INT)))
        .field(InputValue::new("page", TypeRef::named_nn(TypeRef::INT)))
}

/// Where input with one filter per scalar field, a nested where per
/// relation, and `or` / `and` combinators.
pub(super) fn entity_where(
    entity: &Entity,
    names: &EntityNames,
    known_entities: &HashSet<&str>,
) -> InputObject {
    let mut input = InputObject::new(names.where_input());

    for field in &entity.fields {
        if field.is_relation {
            let target = field
                .relation_target_type
                .as_deref()
                .unwrap_or(&field.graphql_type);
            if known_entities.contains(target) {
                input = input.field(InputValue::new(&field.name, TypeRef::named(where_name(target))));
            } else {
                warn!(
                    entity = %entity.name,
                    relation = %field.name,
                    target_type = %target,
                    "Relation target is not a known entity, leaving it out of the where input"
                );
            }
        } else if let Some(kind) = field.scalar_kind() {
            input = input.field(InputValue::new(&field.name, TypeRef::named(kind.filter_name())));
        }
    }

    let self_ref = names.where_input();
    input
        .field(InputValue::new("or", TypeRef::named(&self_ref)))
        .field(InputValue::new("and", TypeRef::named(&self_ref)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(input: &InputObject) -> Vec<&str> {
        input.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_string_filter_operators() {
        let filter = scalar_filter(ScalarKind::String);
        assert_eq!(filter.name, "StringFilter");
        let names = field_names(&filter);
        assert!(names.contains(&"contain"));
        assert!(names.contains(&"containStrict"));
        assert!(names.contains(&"notStartWithStrict"));
        assert!(!names.contains(&"lessThan"));
        assert_eq!(filter.get_field("in").unwrap().ty.to_string(), "[String!]");
    }

    #[test]
    fn test_numeric_filter_operators() {
        let filter = scalar_filter(ScalarKind::Float);
        assert_eq!(
            field_names(&filter),
            [
                "equalTo",
                "notEqualTo",
                "lessThan",
                "lessThanOrEqualTo",
                "moreThan",
                "moreThanOrEqualTo",
                "in",
                "notIn",
            ]
        );
    }

    #[test]
    fn test_id_and_boolean_filters() {
        assert_eq!(
            field_names(&scalar_filter(ScalarKind::Id)),
            ["equalTo", "notEqualTo", "in", "notIn"]
        );
        assert_eq!(
            field_names(&scalar_filter(ScalarKind::Boolean)),
            ["equalTo", "notEqualTo", "in", "notIn"]
        );
    }
}
