//! Text serialization of schema nodes.
//!
//! Two-space indentation, one blank line between definitions, a trailing
//! newline. Types without fields are written without braces.

use std::fmt::{self, Display, Formatter, Write};

use super::document::{
    Definition, DirectiveDefinition, Document, Field, InputObject, InputValue, Object,
};

const INDENT: &str = "  ";

impl Display for DirectiveDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "directive @{} on {}", self.name, self.locations.join(" | "))
    }
}

impl Display for InputValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_char('(')?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_char(')')?;
        }
        write!(f, ": {}", self.ty)?;
        for directive in &self.directives {
            write!(f, " @{directive}")?;
        }
        Ok(())
    }
}

fn write_block<T: Display>(
    f: &mut Formatter<'_>,
    keyword: &str,
    name: &str,
    items: &[T],
) -> fmt::Result {
    write!(f, "{keyword} {name}")?;
    if items.is_empty() {
        return Ok(());
    }
    f.write_str(" {\n")?;
    for item in items {
        writeln!(f, "{INDENT}{item}")?;
    }
    f.write_char('}')
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, "type", &self.name, &self.fields)
    }
}

impl Display for InputObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, "input", &self.name, &self.fields)
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directive(d) => d.fmt(f),
            Self::Object(o) => o.fmt(f),
            Self::InputObject(i) => i.fmt(f),
        }
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            writeln!(f, "{definition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdl::TypeRef;

    #[test]
    fn test_object_rendering() {
        let object = Object::new("User")
            .field(Field::new("id", TypeRef::named_nn(TypeRef::ID)))
            .field(Field::new("posts", TypeRef::named_nn_list("Post")));
        assert_eq!(object.to_string(), "type User {\n  id: ID!\n  posts: [Post!]\n}");
    }

    #[test]
    fn test_field_with_arguments_and_directives() {
        let field = Field::new("user", TypeRef::named_nn("User"))
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
            .argument(InputValue::new("filter", TypeRef::named("UserFilter")))
            .directives(["isAuthenticated", "audit"]);
        assert_eq!(
            field.to_string(),
            "user(id: ID!, filter: UserFilter): User! @isAuthenticated @audit"
        );
    }

    #[test]
    fn test_document_layout() {
        let mut document = Document::new();
        document.push(DirectiveDefinition::new("isAuthenticated"));
        document.push(InputObject::new("Empty"));
        document.push(
            InputObject::new("UserWhere").field(InputValue::new("or", TypeRef::named("UserWhere"))),
        );

        assert_eq!(
            document.to_string(),
            "directive @isAuthenticated on FIELD_DEFINITION\n\
             \n\
             input Empty\n\
             \n\
             input UserWhere {\n  or: UserWhere\n}\n"
        );
    }
}
