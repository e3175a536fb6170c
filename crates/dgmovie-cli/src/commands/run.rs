//! The end-to-end demonstration: insert the sample movie, then read it back.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dgmovie_core::{query, sample};
use dgmovie_graph::{DgraphConfig, fetch_movie, insert_movie, schema};

use crate::output;

#[derive(Args)]
pub struct RunArgs {
    /// Apply the movie schema before inserting.
    ///
    /// Needed on a fresh Dgraph: localized names such as name@en are
    /// rejected until the `name` predicate is declared with @lang.
    #[arg(long)]
    pub apply_schema: bool,
}

pub async fn execute(args: RunArgs, config: &DgraphConfig) -> Result<()> {
    let (client, guard) = super::connect(config).await?;

    if args.apply_schema {
        schema::initialize_schema(&client)
            .await
            .context("Failed to apply schema")?;
    }

    let movie = sample::everything_gonna_be_great();
    let inserted = insert_movie(&client, &movie)
        .await
        .context("Mutation failed")?;
    println!("{}", inserted.movie_uid);

    let readback = fetch_movie(&client, &inserted.movie_uid)
        .await
        .context("Query failed")?;
    println!("{}", readback.raw);

    let read = query::require_movie(readback.movie, &inserted.movie_uid)?;
    query::check_readback(&movie, &read).context("Read-back did not match what was written")?;

    output::print_movie_summary(&read);
    eprintln!("{}", "Read-back matches the inserted record.".green());

    guard.release();
    Ok(())
}
