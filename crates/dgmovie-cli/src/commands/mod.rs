//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dgmovie_graph::{DgraphClient, DgraphConfig, ReleaseGuard};
use std::path::PathBuf;

pub mod admin;
pub mod get;
pub mod insert;
pub mod run;
pub mod schema;

/// Write a movie graph to Dgraph and read it back
#[derive(Parser)]
#[command(name = "dgmovie")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dgraph gRPC endpoint, e.g. localhost:9080
    #[arg(long, global = true, env = "DGRAPH_ADDR")]
    pub addr: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "DGRAPH_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert the sample movie and read it back (use --apply-schema on a fresh Dgraph)
    Run(run::RunArgs),

    /// Apply the movie schema
    Schema,

    /// Insert the sample movie and print the assigned uids
    Insert,

    /// Read a movie by uid
    Get {
        /// Uid of the movie node
        uid: String,
    },

    /// Drop all data and schema
    DropAll {
        /// Confirm the drop
        #[arg(long)]
        yes: bool,
    },

    /// Show the Dgraph server version
    Version,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = DgraphConfig {
            addr: self.addr.unwrap_or_default(),
            timeout_secs: self.timeout_secs,
            ..DgraphConfig::default()
        };

        match self.command {
            Commands::Run(args) => run::execute(args, &config).await,
            Commands::Schema => schema::execute(&config).await,
            Commands::Insert => insert::execute(&config).await,
            Commands::Get { uid } => get::execute(&config, &uid).await,
            Commands::DropAll { yes } => admin::drop_all(&config, yes).await,
            Commands::Version => admin::version(&config).await,
        }
    }
}

/// Connect or fail before any mutation or query is attempted.
pub(crate) async fn connect(config: &DgraphConfig) -> Result<(DgraphClient, ReleaseGuard)> {
    DgraphClient::connect(config)
        .await
        .context("While trying to dial gRPC")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use run::RunArgs;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["dgmovie", "--addr", "localhost:9080", "run", "--apply-schema"]).unwrap();
        assert_eq!(cli.addr.as_deref(), Some("localhost:9080"));
        assert_eq!(cli.timeout_secs, 30);
        assert!(matches!(cli.command, Commands::Run(RunArgs { apply_schema: true })));
    }

    #[test]
    fn test_parse_get_and_drop_all() {
        let cli = Cli::try_parse_from(["dgmovie", "get", "0x2a", "--timeout-secs", "5"]).unwrap();
        assert_eq!(cli.timeout_secs, 5);
        assert!(matches!(cli.command, Commands::Get { ref uid } if uid == "0x2a"));

        let cli = Cli::try_parse_from(["dgmovie", "drop-all"]).unwrap();
        assert!(matches!(cli.command, Commands::DropAll { yes: false }));
    }

    #[test]
    fn test_run_help_mentions_schema() {
        let mut cmd = Cli::command();
        let run = cmd.find_subcommand_mut("run").unwrap();
        let help = run.render_long_help().to_string();
        assert!(help.contains("--apply-schema"));
        assert!(help.contains("@lang"));
    }

    #[tokio::test]
    async fn test_missing_addr_fails_before_any_call() {
        let config = DgraphConfig::default();
        let err = connect(&config).await.unwrap_err();
        assert!(format!("{err:#}").contains("no address configured"));
    }
}
