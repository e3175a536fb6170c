//! Server administration commands.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use dgmovie_graph::DgraphConfig;

/// Drop all data and schema.
pub async fn drop_all(config: &DgraphConfig, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to drop all data without --yes");
    }

    let (client, guard) = super::connect(config).await?;
    client.drop_all().await.context("Drop failed")?;
    eprintln!("{}", "All data dropped.".green());

    guard.release();
    Ok(())
}

/// Print the server version.
pub async fn version(config: &DgraphConfig) -> Result<()> {
    let (client, guard) = super::connect(config).await?;
    let version = client.check_version().await.context("Version check failed")?;
    println!("{}", version.tag);

    guard.release();
    Ok(())
}
