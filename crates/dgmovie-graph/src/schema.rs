//! Dgraph schema for the movie graph.

use tracing::info;

use crate::client::DgraphClient;
use crate::error::DgraphResult;

/// Predicate definitions. Localized names need `@lang`.
const SCHEMA_STATEMENTS: &[&str] = &[
    "name: string @index(term) @lang .",
    "initial_release_date: datetime @index(year) .",
    "genre: [uid] @reverse .",
    "starring: [uid] .",
    "director.film: [uid] @reverse .",
    "actor.film: [uid] @count .",
    "performance.actor: [uid] .",
    "performance.character: [uid] .",
    "performance.film: [uid] .",
];

/// The full schema as sent to `Alter`.
pub fn movie_schema() -> String {
    SCHEMA_STATEMENTS.join("\n")
}

/// Apply the movie schema.
///
/// Safe to run multiple times; Dgraph replaces predicate definitions in place.
pub async fn initialize_schema(client: &DgraphClient) -> DgraphResult<()> {
    info!("Initializing Dgraph schema...");

    client.set_schema(&movie_schema()).await?;

    info!("Dgraph schema initialized ({} predicates)", SCHEMA_STATEMENTS.len());
    Ok(())
}
