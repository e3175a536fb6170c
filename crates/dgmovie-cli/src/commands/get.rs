//! Get command.

use anyhow::{Context, Result};
use colored::Colorize;
use dgmovie_graph::{DgraphConfig, fetch_movie};

use crate::output;

pub async fn execute(config: &DgraphConfig, uid: &str) -> Result<()> {
    let (client, guard) = super::connect(config).await?;

    let readback = fetch_movie(&client, uid)
        .await
        .with_context(|| format!("Query for {uid} failed"))?;
    println!("{}", readback.raw);

    match &readback.movie {
        Some(movie) => output::print_movie_summary(movie),
        None => eprintln!("{}", format!("No movie with uid {uid}.").yellow()),
    }

    guard.release();
    Ok(())
}
