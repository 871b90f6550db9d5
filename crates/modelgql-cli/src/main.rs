mod cli;
mod config;
mod observability;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use modelgql_schema::ReconcileOutcome;

use cli::Cli;
use output::{print_error, print_success};

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::resolve(&cli)?;
    observability::init_tracing_with_level(&config.log_level);

    tracing::debug!(?config, "Resolved configuration");

    let summary = modelgql_schema::run(&config).context("Schema generation failed")?;

    let verb = match summary.outcome {
        Some(ReconcileOutcome::Merged) => "Merged",
        Some(ReconcileOutcome::Created) | None => "Wrote",
    };
    print_success(&format!(
        "{verb} {} ({} entities)",
        summary.output.display(),
        summary.entities
    ));

    Ok(())
}
