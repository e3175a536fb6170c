//! Movie write and read paths.

use std::collections::HashMap;

use dgmovie_core::labels::{self, MOVIE_LABEL};
use dgmovie_core::{Movie, query};
use tracing::{debug, info};

use crate::api::Mutation;
use crate::client::DgraphClient;
use crate::error::DgraphResult;

/// Outcome of writing one movie graph.
#[derive(Debug, Clone)]
pub struct InsertResult {
    /// Uid allocated for the root movie node.
    pub movie_uid: String,
    /// Every blank-node label sent, in assignment order.
    pub labels: Vec<String>,
    /// Blank-node label to allocated uid, as returned by Dgraph.
    pub uids: HashMap<String, String>,
}

/// A movie read back by uid.
#[derive(Debug, Clone)]
pub struct MovieReadback {
    /// The JSON document exactly as returned.
    pub raw: String,
    pub movie: Option<Movie>,
}

/// Write `movie` and everything it references in one committed transaction.
///
/// The caller's record is left untouched; blank-node labels are assigned on
/// a copy. Fails if Dgraph did not return a uid for every label.
pub async fn insert_movie(client: &DgraphClient, movie: &Movie) -> DgraphResult<InsertResult> {
    let mut labelled = movie.clone();
    let blank_labels = labels::label_blank_nodes(&mut labelled);

    let mut mutation = Mutation::set_json(&labelled)?;
    mutation.commit_now = true;

    let response = client.new_txn().mutate(mutation).await?;
    labels::verify_assigned(&blank_labels, &response.uids)?;
    let movie_uid = labels::assigned_uid(&response.uids, MOVIE_LABEL)?;

    info!(uid = %movie_uid, nodes = blank_labels.len(), name = %movie.name, "Inserted movie");
    Ok(InsertResult {
        movie_uid,
        labels: blank_labels,
        uids: response.uids,
    })
}

/// Read a movie back with the uid query template.
pub async fn fetch_movie(client: &DgraphClient, uid: &str) -> DgraphResult<MovieReadback> {
    let response = client
        .new_read_only_txn()
        .query_with_vars(query::MOVIE_BY_UID, query::uid_vars(uid))
        .await?;

    let root = query::parse_root(&response.json)?;
    debug!(uid, matches = root.me.len(), "Fetched movie");

    Ok(MovieReadback {
        raw: String::from_utf8_lossy(&response.json).into_owned(),
        movie: root.me.into_iter().next(),
    })
}
