use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use modelgql_schema::PaginationStyle;

#[derive(Parser, Debug)]
#[command(name = "modelgql")]
#[command(about = "Generate a GraphQL schema from ORM model metadata")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to modelgql.toml when present)
    #[arg(short, long, env = "MODELGQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the model metadata manifests
    #[arg(short, long, env = "MODELGQL_INPUT")]
    pub input: Option<PathBuf>,

    /// Schema file to write or merge into
    #[arg(short, long, env = "MODELGQL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Skip the mutation root, inputs and payloads
    #[arg(long)]
    pub no_mutations: bool,

    #[arg(long)]
    pub no_batch_create: bool,

    #[arg(long)]
    pub no_batch_update: bool,

    #[arg(long)]
    pub no_batch_delete: bool,

    /// Field left out of create / update inputs (repeatable, comma separated)
    #[arg(long = "skip-input-field", value_name = "NAME", value_delimiter = ',')]
    pub skip_input_fields: Vec<String>,

    /// Directive attached to every query and mutation field (repeatable, comma separated)
    #[arg(long = "directive", value_name = "NAME", value_delimiter = ',')]
    pub directives: Vec<String>,

    /// Pagination arguments on plural queries
    #[arg(long)]
    pub pagination: Option<PaginationArg>,

    /// Formatter command, e.g. "npx prettier --write"; the schema path is appended
    #[arg(long, value_name = "CMD", conflicts_with = "no_format")]
    pub formatter: Option<String>,

    /// Do not run a formatter before merging
    #[arg(long)]
    pub no_format: bool,

    /// Overwrite the output file instead of merging into it
    #[arg(long)]
    pub no_merge: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "MODELGQL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum PaginationArg {
    None,
    Offset,
}

impl From<PaginationArg> for PaginationStyle {
    fn from(arg: PaginationArg) -> Self {
        match arg {
            PaginationArg::None => PaginationStyle::None,
            PaginationArg::Offset => PaginationStyle::Offset,
        }
    }
}
