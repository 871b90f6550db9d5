use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use modelgql_schema::GeneratorConfig;

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "modelgql.toml";

/// Loads the config file and applies command-line overrides.
pub fn resolve(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = load(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    Ok(config)
}

/// Reads `path`, or the default file if it exists. An explicit path must
/// exist.
pub fn load(path: Option<&Path>) -> Result<GeneratorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn apply_overrides(config: &mut GeneratorConfig, cli: &Cli) {
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if cli.no_mutations {
        config.mutations = false;
    }
    if cli.no_batch_create {
        config.batch_create = false;
    }
    if cli.no_batch_update {
        config.batch_update = false;
    }
    if cli.no_batch_delete {
        config.batch_delete = false;
    }
    if !cli.skip_input_fields.is_empty() {
        config.skip_input_fields = trimmed(&cli.skip_input_fields);
    }
    if !cli.directives.is_empty() {
        config.directives = trimmed(&cli.directives);
    }
    if let Some(pagination) = cli.pagination {
        config.pagination = pagination.into();
    }
    if let Some(formatter) = &cli.formatter {
        config.formatter = formatter.split_whitespace().map(str::to_string).collect();
    }
    if cli.no_format {
        config.formatter.clear();
    }
    if cli.no_merge {
        config.merge = false;
    }
    if cli.verbose {
        config.log_level = "debug".to_string();
    } else if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
}

fn trimmed(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
