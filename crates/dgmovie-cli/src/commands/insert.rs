//! Insert command.

use anyhow::{Context, Result};
use dgmovie_core::sample;
use dgmovie_graph::{DgraphConfig, insert_movie};

use crate::output;

pub async fn execute(config: &DgraphConfig) -> Result<()> {
    let (client, guard) = super::connect(config).await?;

    let movie = sample::everything_gonna_be_great();
    let inserted = insert_movie(&client, &movie)
        .await
        .context("Mutation failed")?;

    output::print_assigned(&inserted);

    guard.release();
    Ok(())
}
