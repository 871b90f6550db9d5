//! Raw model type and identifier mapping.
//!
//! Translates the raw Go-style type strings produced by the metadata
//! extractor (`string`, `null.String`, `int64`, `*User`, `PostSlice`, ...)
//! into GraphQL scalar or object type names, and raw field identifiers
//! (`OrganizationID`, `AvatarURL`) into lower-camel schema field names.
//!
//! Every raw type has a mapping. Types that match no scalar kind are passed
//! through as object type references, which is how relation targets reach
//! the schema unchanged.

use convert_case::{Case, Casing};

/// Suffix marking a collection type (`UserSlice`).
pub const COLLECTION_SUFFIX: &str = "Slice";

/// Prefix marking a nullable wrapper type (`null.String`).
pub const NULLABLE_PREFIX: &str = "null.";

/// Prefix marking a pointer / owned reference type (`*User`).
pub const POINTER_MARKER: &str = "*";

/// Prefix marking a built-in slice type (`[]byte`).
pub const SLICE_PREFIX: &str = "[]";

/// Built-in GraphQL scalar kinds the generator knows how to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    Id,
    String,
    Int,
    Float,
    Boolean,
}

impl ScalarKind {
    /// All kinds, in the order their filter inputs are emitted.
    pub const ALL: [Self; 5] = [Self::Id, Self::String, Self::Int, Self::Float, Self::Boolean];

    /// The GraphQL scalar name.
    #[must_use]
    pub const fn graphql_name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
        }
    }

    /// Name of the generic filter input type for this kind.
    #[must_use]
    pub const fn filter_name(self) -> &'static str {
        match self {
            Self::Id => "IDFilter",
            Self::String => "StringFilter",
            Self::Int => "IntFilter",
            Self::Float => "FloatFilter",
            Self::Boolean => "BooleanFilter",
        }
    }

    /// Whether the kind supports ordering comparisons.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Looks up a kind by its GraphQL scalar name.
    #[must_use]
    pub fn from_graphql_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.graphql_name() == name)
    }
}

/// Infers the GraphQL type name and list-ness of a raw field.
///
/// Returns `(type_name, is_array)`.
#[must_use]
pub fn infer_type(field_name: &str, raw_type: &str) -> (String, bool) {
    (graphql_type(field_name, raw_type), is_array(raw_type))
}

/// Maps a raw type to a GraphQL type name.
///
/// Matching is by substring on the lower-cased raw type, in a fixed
/// priority order. Integer fields whose own name ends in `id` become `ID`.
/// Temporal types are exposed as `Int` epoch seconds.
#[must_use]
pub fn graphql_type(field_name: &str, raw_type: &str) -> String {
    let lower_field = field_name.to_lowercase();
    let lower_type = raw_type.to_lowercase();

    let kind = if lower_type.contains("string") {
        Some(ScalarKind::String)
    } else if lower_type.contains("int") {
        if lower_field.ends_with("id") {
            Some(ScalarKind::Id)
        } else {
            Some(ScalarKind::Int)
        }
    } else if lower_type.contains("decimal") || lower_type.contains("float") {
        Some(ScalarKind::Float)
    } else if lower_type.contains("bool") {
        Some(ScalarKind::Boolean)
    } else if lower_type.contains("time") {
        Some(ScalarKind::Int)
    } else {
        None
    };

    match kind {
        Some(kind) => kind.graphql_name().to_string(),
        None => object_type_name(raw_type),
    }
}

/// Strips reference, collection and package decoration from a raw type,
/// leaving the bare object type name (`*User` -> `User`, `PostSlice` ->
/// `Post`, `types.JSON` -> `JSON`).
#[must_use]
pub fn object_type_name(raw_type: &str) -> String {
    let name = raw_type.strip_prefix(POINTER_MARKER).unwrap_or(raw_type);
    let name = name.strip_prefix(SLICE_PREFIX).unwrap_or(name);
    // Also drops the `null.` wrapper.
    let name = name.rsplit_once('.').map_or(name, |(_, bare)| bare);
    match name.strip_suffix(COLLECTION_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name.to_string(),
    }
}

/// Whether the raw type is a collection.
#[must_use]
pub fn is_array(raw_type: &str) -> bool {
    raw_type.ends_with(COLLECTION_SUFFIX) || raw_type.starts_with(SLICE_PREFIX)
}

/// Whether the raw type is non-nullable.
#[must_use]
pub fn infer_required(raw_type: &str) -> bool {
    !(raw_type.starts_with(NULLABLE_PREFIX) || raw_type.starts_with(POINTER_MARKER))
}

/// Converts a raw field identifier to its schema field name.
///
/// `ID` and `URL` are rewritten as words before case conversion, because
/// case conversion alone treats `OrganizationID` as one trailing acronym.
#[must_use]
pub fn to_schema_name(field_name: &str) -> String {
    if field_name == "ID" {
        return "id".to_string();
    }
    field_name
        .replace("ID", "Id")
        .replace("URL", "Url")
        .to_case(Case::Camel)
}

/// Canonicalizes a relation container prefix (`organizationUser`) to the
/// entity naming convention (`OrganizationUser`).
///
/// Identifiers without separators only get their first letter raised, so
/// acronym-led names such as `aPIKey` come back as `APIKey`.
#[must_use]
pub fn to_entity_name(prefix: &str) -> String {
    if prefix.contains(['_', '-', ' ']) {
        return prefix.to_case(Case::Pascal);
    }
    let mut chars = prefix.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_inference() {
        assert_eq!(infer_type("Title", "null.String"), ("String".into(), false));
        assert_eq!(infer_type("Age", "int"), ("Int".into(), false));
        assert_eq!(infer_type("UserID", "int"), ("ID".into(), false));
        assert_eq!(infer_type("ID", "uint64"), ("ID".into(), false));
        assert_eq!(infer_type("Price", "types.Decimal"), ("Float".into(), false));
        assert_eq!(infer_type("Ratio", "null.Float64"), ("Float".into(), false));
        assert_eq!(infer_type("Active", "bool"), ("Boolean".into(), false));
        assert_eq!(infer_type("CreatedAt", "time.Time"), ("Int".into(), false));
    }

    #[test]
    fn test_string_wins_over_id_suffix() {
        assert_eq!(graphql_type("ExternalID", "string"), "String");
    }

    #[test]
    fn test_object_type_fallback() {
        assert_eq!(infer_type("Organization", "*Organization"), ("Organization".into(), false));
        assert_eq!(infer_type("Posts", "PostSlice"), ("Post".into(), true));
        assert_eq!(object_type_name("Slice"), "Slice");
    }

    #[test]
    fn test_package_qualified_types() {
        assert_eq!(infer_type("Data", "types.JSON"), ("JSON".into(), false));
        assert_eq!(infer_type("Data", "null.JSON"), ("JSON".into(), false));
        assert_eq!(infer_type("Owner", "*models.User"), ("User".into(), false));
        assert_eq!(infer_type("Tags", "models.TagSlice"), ("Tag".into(), true));
        assert_eq!(infer_type("Blob", "[]byte"), ("byte".into(), true));
        assert_eq!(graphql_type("Price", "types.Decimal"), "Float");
    }

    #[test]
    fn test_required() {
        assert!(infer_required("int"));
        assert!(infer_required("PostSlice"));
        assert!(!infer_required("null.String"));
        assert!(!infer_required("*User"));
    }

    #[test]
    fn test_schema_names() {
        assert_eq!(to_schema_name("ID"), "id");
        assert_eq!(to_schema_name("UserURL"), "userUrl");
        assert_eq!(to_schema_name("OrganizationID"), "organizationId");
        assert_eq!(to_schema_name("FirstName"), "firstName");
        assert_eq!(to_schema_name("Organization"), "organization");
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(to_entity_name("user"), "User");
        assert_eq!(to_entity_name("organizationUser"), "OrganizationUser");
        assert_eq!(to_entity_name("aPIKey"), "APIKey");
        assert_eq!(to_entity_name("blog_post"), "BlogPost");
        assert_eq!(to_entity_name(""), "");
    }

    #[test]
    fn test_scalar_kind_lookup() {
        assert_eq!(ScalarKind::from_graphql_name("ID"), Some(ScalarKind::Id));
        assert_eq!(ScalarKind::from_graphql_name("User"), None);
        assert_eq!(ScalarKind::Int.filter_name(), "IntFilter");
        assert!(ScalarKind::Float.is_numeric());
        assert!(!ScalarKind::String.is_numeric());
    }
}
