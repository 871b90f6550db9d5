//! GraphQL type references.

use std::fmt;

/// A reference to a named type, possibly wrapped in list / non-null.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub const ID: &'static str = "ID";
    pub const STRING: &'static str = "String";
    pub const INT: &'static str = "Int";
    pub const FLOAT: &'static str = "Float";
    pub const BOOLEAN: &'static str = "Boolean";

    /// `T`
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// `T!`
    pub fn named_nn(name: impl Into<String>) -> Self {
        Self::named(name).non_null()
    }

    /// `[T]`
    pub fn named_list(name: impl Into<String>) -> Self {
        Self::List(Box::new(Self::named(name)))
    }

    /// `[T!]`
    pub fn named_nn_list(name: impl Into<String>) -> Self {
        Self::List(Box::new(Self::named_nn(name)))
    }

    /// `[T!]!`
    pub fn named_nn_list_nn(name: impl Into<String>) -> Self {
        Self::named_nn_list(name).non_null()
    }

    /// Wraps the reference in non-null unless it already is.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::NonNull(_) => self,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Drops an outer non-null wrapper.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::NonNull(inner) => *inner,
            other => other,
        }
    }

    #[must_use]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Name of the innermost named type.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TypeRef::named("User").to_string(), "User");
        assert_eq!(TypeRef::named_nn("User").to_string(), "User!");
        assert_eq!(TypeRef::named_list("User").to_string(), "[User]");
        assert_eq!(TypeRef::named_nn_list_nn("User").to_string(), "[User!]!");
    }

    #[test]
    fn test_wrapping() {
        let required = TypeRef::named_nn(TypeRef::ID);
        assert_eq!(required.clone().non_null(), required);
        assert_eq!(required.clone().nullable(), TypeRef::named(TypeRef::ID));
        assert_eq!(TypeRef::named_nn_list_nn("Post").base_name(), "Post");
        assert!(!TypeRef::named_nn_list("Post").is_non_null());
    }
}
