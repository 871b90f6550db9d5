//! Generator configuration.
//!
//! Configuration is usually read from `modelgql.toml` and then overridden by
//! command-line flags.
//!
//! # Example Configuration
//!
//! ```toml
//! input = "models"
//! output = "graphql/schema.graphql"
//! mutations = true
//! batch_delete = false
//! skip_input_fields = ["createdAt", "updatedAt"]
//! directives = ["isAuthenticated"]
//! pagination = "offset"
//! formatter = ["prettier", "--write"]
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Deserialize;

use crate::emitter::{EmitOptions, PaginationStyle};
use crate::reconcile::{CommandFormatter, NoopFormatter, SchemaFormatter};

/// Schema generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding the model metadata manifests.
    /// Default: "models"
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Schema file to write or merge into.
    /// Default: "schema.graphql"
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Generate the mutation root with inputs and payloads.
    #[serde(default = "default_true")]
    pub mutations: bool,

    #[serde(default = "default_true")]
    pub batch_create: bool,

    #[serde(default = "default_true")]
    pub batch_update: bool,

    #[serde(default = "default_true")]
    pub batch_delete: bool,

    /// Fields left out of create / update inputs.
    #[serde(default)]
    pub skip_input_fields: Vec<String>,

    /// Directives declared and attached to every query and mutation field.
    #[serde(default)]
    pub directives: Vec<String>,

    /// Default: offset
    #[serde(default)]
    pub pagination: PaginationStyle,

    /// Formatter command; the file path is appended. Empty disables
    /// formatting.
    /// Default: ["prettier", "--write"]
    #[serde(default = "default_formatter")]
    pub formatter: Vec<String>,

    /// Merge into an existing output file instead of overwriting it.
    #[serde(default = "default_true")]
    pub merge: bool,

    /// Default: "warn"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_input() -> PathBuf {
    PathBuf::from("models")
}

fn default_output() -> PathBuf {
    PathBuf::from("schema.graphql")
}

fn default_true() -> bool {
    true
}

fn default_formatter() -> Vec<String> {
    vec!["prettier".to_string(), "--write".to_string()]
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            mutations: true,
            batch_create: true,
            batch_update: true,
            batch_delete: true,
            skip_input_fields: Vec::new(),
            directives: Vec::new(),
            pagination: PaginationStyle::default(),
            formatter: default_formatter(),
            merge: true,
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.output.as_os_str().is_empty() {
            return Err("output must not be empty".into());
        }
        if let Some(directive) = self.directives.iter().find(|d| !is_graphql_name(d)) {
            return Err(format!("directive '{directive}' is not a valid GraphQL name"));
        }
        if self
            .formatter
            .first()
            .is_some_and(|program| program.trim().is_empty())
        {
            return Err("formatter program must not be blank".into());
        }
        let level = self.log_level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&level.as_str()) {
            return Err(format!("log_level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    /// Converts this config to emitter options.
    #[must_use]
    pub fn to_emit_options(&self) -> EmitOptions {
        EmitOptions {
            generate_mutations: self.mutations,
            generate_batch_create: self.batch_create,
            generate_batch_update: self.batch_update,
            generate_batch_delete: self.batch_delete,
            skip_input_fields: self.skip_input_fields.iter().cloned().collect::<BTreeSet<_>>(),
            extra_directives: self.directives.clone(),
            pagination: self.pagination,
        }
    }

    /// The configured formatter, or a no-op when formatting is disabled.
    #[must_use]
    pub fn schema_formatter(&self) -> Box<dyn SchemaFormatter> {
        match CommandFormatter::from_command(&self.formatter) {
            Some(formatter) => Box::new(formatter),
            None => Box::new(NoopFormatter),
        }
    }
}

/// `/[_A-Za-z][_0-9A-Za-z]*/`
fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.input, PathBuf::from("models"));
        assert_eq!(config.output, PathBuf::from("schema.graphql"));
        assert!(config.mutations);
        assert!(config.merge);
        assert_eq!(config.pagination, PaginationStyle::Offset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_directive() {
        let mut config = GeneratorConfig::default();
        config.directives = vec!["is-authenticated".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_formatter_and_level() {
        let mut config = GeneratorConfig::default();
        config.formatter = vec![" ".into()];
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.log_level = "loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_emit_options() {
        let mut config = GeneratorConfig::default();
        config.batch_delete = false;
        config.skip_input_fields = vec!["updatedAt".into(), "createdAt".into()];
        let options = config.to_emit_options();
        assert!(!options.generate_batch_delete);
        assert!(options.skip_input_fields.contains("createdAt"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            output = "graphql/schema.graphql"
            mutations = false
            directives = ["isAuthenticated"]
            pagination = "none"
            formatter = []
        "#;

        let config: GeneratorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.output, PathBuf::from("graphql/schema.graphql"));
        assert_eq!(config.input, PathBuf::from("models"));
        assert!(!config.mutations);
        assert!(config.batch_create);
        assert_eq!(config.pagination, PaginationStyle::None);
        assert!(config.formatter.is_empty());
        assert!(config.validate().is_ok());
    }
}
