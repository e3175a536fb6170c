//! Schema command.

use anyhow::{Context, Result};
use colored::Colorize;
use dgmovie_graph::{DgraphConfig, schema};

pub async fn execute(config: &DgraphConfig) -> Result<()> {
    let (client, guard) = super::connect(config).await?;

    schema::initialize_schema(&client)
        .await
        .context("Failed to apply schema")?;

    eprintln!("{}", "Schema applied:".green().bold());
    for line in schema::movie_schema().lines() {
        eprintln!("  {}", line.dimmed());
    }

    guard.release();
    Ok(())
}
