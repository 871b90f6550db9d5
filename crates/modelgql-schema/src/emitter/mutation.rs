//! Mutation inputs, payloads and the mutation root.

use super::{EmitOptions, EntityNames, field_type, input_fields};
use crate::model::Entity;
use crate::sdl::{Definition, Field, InputObject, InputValue, Object, TypeRef};

/// Inputs and payloads for one entity, batch variants gated by their flags.
pub(super) fn entity_definitions(
    entity: &Entity,
    names: &EntityNames,
    options: &EmitOptions,
) -> Vec<Definition> {
    let mut create = InputObject::new(names.create_input());
    let mut update = InputObject::new(names.update_input());
    for (field, _) in input_fields(entity, options) {
        let ty = field_type(field);
        update = update.field(InputValue::new(&field.name, ty.clone().nullable()));
        create = create.field(InputValue::new(&field.name, ty));
    }

    let mut definitions: Vec<Definition> = vec![create.into(), update.into()];

    if options.generate_batch_create {
        definitions.push(
            InputObject::new(names.batch_create_input())
                .field(InputValue::new(
                    &names.plural_field,
                    TypeRef::named_nn_list_nn(names.create_input()),
                ))
                .into(),
        );
    }

    definitions.push(
        Object::new(names.payload())
            .field(Field::new(&names.field, TypeRef::named_nn(&names.type_name)))
            .into(),
    );

    if options.generate_batch_create {
        definitions.push(
            Object::new(names.batch_payload())
                .field(Field::new(
                    &names.plural_field,
                    TypeRef::named_nn_list_nn(&names.type_name),
                ))
                .into(),
        );
    }

    definitions.push(
        Object::new(names.delete_payload())
            .field(Field::new("id", TypeRef::named_nn(TypeRef::ID)))
            .into(),
    );

    if options.generate_batch_delete {
        definitions.push(
            Object::new(names.batch_delete_payload())
                .field(Field::new("ids", TypeRef::named_nn_list_nn(TypeRef::ID)))
                .into(),
        );
    }

    if options.generate_batch_update {
        definitions.push(
            Object::new(names.batch_update_payload())
                .field(Field::new("ok", TypeRef::named_nn(TypeRef::BOOLEAN)))
                .into(),
        );
    }

    definitions
}

/// `type Mutation` with create / update / delete fields per entity.
pub(super) fn mutation_root(entities: &[EntityNames], options: &EmitOptions) -> Object {
    let directives = &options.extra_directives;
    let mut mutation = Object::new("Mutation");

    for names in entities {
        let type_name = &names.type_name;
        let plural = &names.plural_type;

        mutation = mutation.field(
            Field::new(format!("create{type_name}"), TypeRef::named_nn(names.payload()))
                .argument(InputValue::new("input", TypeRef::named_nn(names.create_input())))
                .directives(directives),
        );

        if options.generate_batch_create {
            mutation = mutation.field(
                Field::new(format!("create{plural}"), TypeRef::named_nn(names.batch_payload()))
                    .argument(InputValue::new(
                        "input",
                        TypeRef::named_nn(names.batch_create_input()),
                    ))
                    .directives(directives),
            );
        }

        mutation = mutation.field(
            Field::new(format!("update{type_name}"), TypeRef::named_nn(names.payload()))
                .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
                .argument(InputValue::new("input", TypeRef::named_nn(names.update_input())))
                .directives(directives),
        );

        if options.generate_batch_update {
            mutation = mutation.field(
                Field::new(
                    format!("update{plural}"),
                    TypeRef::named_nn(names.batch_update_payload()),
                )
                .argument(InputValue::new("filter", TypeRef::named(names.filter())))
                .argument(InputValue::new("input", TypeRef::named_nn(names.update_input())))
                .directives(directives),
            );
        }

        mutation = mutation.field(
            Field::new(
                format!("delete{type_name}"),
                TypeRef::named_nn(names.delete_payload()),
            )
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
            .directives(directives),
        );

        if options.generate_batch_delete {
            mutation = mutation.field(
                Field::new(
                    format!("delete{plural}"),
                    TypeRef::named_nn(names.batch_delete_payload()),
                )
                .argument(InputValue::new("filter", TypeRef::named(names.filter())))
                .directives(directives),
            );
        }
    }

    mutation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> EntityNames {
        EntityNames {
            type_name: "User".into(),
            plural_type: "Users".into(),
            field: "user".into(),
            plural_field: "users".into(),
        }
    }

    fn field_names(object: &Object) -> Vec<&str> {
        object.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_mutation_root_with_all_batches() {
        let mutation = mutation_root(&[names()], &EmitOptions::default());
        assert_eq!(
            field_names(&mutation),
            ["createUser", "createUsers", "updateUser", "updateUsers", "deleteUser", "deleteUsers"]
        );
        assert_eq!(
            mutation.get_field("updateUsers").unwrap().to_string(),
            "updateUsers(filter: UserFilter, input: UserUpdateInput!): UsersUpdatePayload!"
        );
    }

    #[test]
    fn test_batch_flags_gate_fields() {
        let options = EmitOptions {
            generate_batch_create: false,
            generate_batch_update: false,
            extra_directives: vec!["isAuthenticated".into()],
            ..EmitOptions::default()
        };
        let mutation = mutation_root(&[names()], &options);
        assert_eq!(
            field_names(&mutation),
            ["createUser", "updateUser", "deleteUser", "deleteUsers"]
        );
        assert_eq!(
            mutation.get_field("deleteUser").unwrap().to_string(),
            "deleteUser(id: ID!): UserDeletePayload! @isAuthenticated"
        );

        let definitions = entity_definitions(&Entity::new("User", Vec::new()), &names(), &options);
        let emitted: Vec<&str> = definitions.iter().map(Definition::name).collect();
        assert_eq!(
            emitted,
            [
                "UserCreateInput",
                "UserUpdateInput",
                "UserPayload",
                "UserDeletePayload",
                "UsersDeletePayload",
            ]
        );
    }
}
