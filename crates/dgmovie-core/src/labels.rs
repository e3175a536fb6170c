//! Blank-node labelling.
//!
//! Nodes without a uid are given a `_:<label>` placeholder before they are
//! written. Dgraph answers with a map from each label (prefix stripped) to
//! the uid it allocated, so labels must be unique within one mutation.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MovieError, MovieResult};
use crate::model::Movie;

/// Prefix Dgraph uses for blank nodes.
pub const BLANK_PREFIX: &str = "_:";

/// Label given to the root movie node.
pub const MOVIE_LABEL: &str = "movie";

/// Assign blank-node labels to every node of `movie` that has no uid yet.
///
/// Returns the labels in assignment order. Nodes that already carry a uid
/// keep it and are not listed.
pub fn label_blank_nodes(movie: &mut Movie) -> Vec<String> {
    let mut labels = Vec::new();

    assign(&mut movie.uid, MOVIE_LABEL.to_string(), &mut labels);

    for (i, genre) in movie.genre.iter_mut().enumerate() {
        assign(&mut genre.uid, format!("genre-{i}"), &mut labels);
    }

    for (i, starring) in movie.starring.iter_mut().enumerate() {
        assign(&mut starring.uid, format!("starring-{i}"), &mut labels);
        for (j, actor) in starring.actor.iter_mut().enumerate() {
            assign(&mut actor.uid, format!("starring-{i}-actor-{j}"), &mut labels);
        }
        for (j, character) in starring.character.iter_mut().enumerate() {
            assign(&mut character.uid, format!("starring-{i}-character-{j}"), &mut labels);
        }
    }

    for (i, director) in movie.director.iter_mut().enumerate() {
        assign(&mut director.uid, format!("director-{i}"), &mut labels);
    }

    for (i, actor) in movie.actor.iter_mut().enumerate() {
        assign(&mut actor.uid, format!("actor-{i}"), &mut labels);
    }

    debug!(count = labels.len(), "Assigned blank-node labels");
    labels
}

fn assign(uid: &mut String, label: String, labels: &mut Vec<String>) {
    if uid.is_empty() {
        *uid = format!("{BLANK_PREFIX}{label}");
        labels.push(label);
    }
}

/// Check that the server assigned a uid to every label.
pub fn verify_assigned(labels: &[String], uids: &HashMap<String, String>) -> MovieResult<()> {
    match labels.iter().find(|label| !uids.contains_key(label.as_str())) {
        Some(missing) => Err(MovieError::MissingUid(missing.clone())),
        None => Ok(()),
    }
}

/// Look up the uid assigned to `label`.
pub fn assigned_uid(uids: &HashMap<String, String>, label: &str) -> MovieResult<String> {
    uids.get(label)
        .cloned()
        .ok_or_else(|| MovieError::MissingUid(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::everything_gonna_be_great;

    #[test]
    fn test_labels_every_node() {
        let mut movie = everything_gonna_be_great();
        let labels = label_blank_nodes(&mut movie);
        // movie + 2 genres + 5 performances (actor, character each) + director
        assert_eq!(labels.len(), 1 + 2 + 5 * 3 + 1);
        assert_eq!(labels[0], "movie");
        assert_eq!(movie.uid, "_:movie");
        assert_eq!(movie.genre[1].uid, "_:genre-1");
        assert_eq!(movie.starring[2].uid, "_:starring-2");
        assert_eq!(movie.starring[2].actor[0].uid, "_:starring-2-actor-0");
        assert_eq!(movie.director[0].uid, "_:director-0");
    }

    #[test]
    fn test_labels_are_unique() {
        let mut movie = everything_gonna_be_great();
        let labels = label_blank_nodes(&mut movie);
        let mut sorted = labels.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), labels.len());
    }

    #[test]
    fn test_labels_reach_the_json() {
        let mut movie = everything_gonna_be_great();
        let labels = label_blank_nodes(&mut movie);
        let json = serde_json::to_string(&movie).unwrap();
        for label in &labels {
            assert!(json.contains(&format!("\"{BLANK_PREFIX}{label}\"")), "{label} not in JSON");
        }
    }

    #[test]
    fn test_existing_uids_are_kept() {
        let mut movie = everything_gonna_be_great();
        movie.genre[0].uid = "0x7".to_string();
        let labels = label_blank_nodes(&mut movie);
        assert_eq!(movie.genre[0].uid, "0x7");
        assert!(!labels.iter().any(|l| l == "genre-0"));
        assert!(labels.iter().any(|l| l == "genre-1"));
    }

    #[test]
    fn test_verify_assigned() {
        let labels = vec!["movie".to_string(), "genre-0".to_string()];
        let mut uids = HashMap::new();
        uids.insert("movie".to_string(), "0x1".to_string());
        uids.insert("genre-0".to_string(), "0x2".to_string());
        assert!(verify_assigned(&labels, &uids).is_ok());
        assert_eq!(assigned_uid(&uids, MOVIE_LABEL).unwrap(), "0x1");

        uids.remove("genre-0");
        match verify_assigned(&labels, &uids) {
            Err(MovieError::MissingUid(label)) => assert_eq!(label, "genre-0"),
            other => panic!("expected MissingUid, got {other:?}"),
        }
    }
}
