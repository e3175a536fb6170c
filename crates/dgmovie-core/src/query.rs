//! Read-back query template and result checks.

use std::collections::HashMap;

use crate::error::{MovieError, MovieResult};
use crate::model::{Movie, QueryRoot};

/// Variable bound to the movie uid in [`MOVIE_BY_UID`].
pub const UID_VAR: &str = "$id";

/// Fetch one movie with its names, release date, genres, director and cast.
pub const MOVIE_BY_UID: &str = r#"query Me($id: string){
    me(func: uid($id)) {
        uid
        name@en
        name@de
        name@tr
        initial_release_date
        genre {
            name@en
        }
        director.film {
            name@en
        }
        starring {
            performance.actor {
                name@en
            }
            performance.character {
                name@en
            }
        }
    }
}"#;

/// Variables for [`MOVIE_BY_UID`].
pub fn uid_vars(uid: &str) -> HashMap<String, String> {
    HashMap::from([(UID_VAR.to_string(), uid.to_string())])
}

/// Parse a query response document rooted at `me`.
pub fn parse_root(json: &[u8]) -> MovieResult<QueryRoot> {
    Ok(serde_json::from_slice(json)?)
}

/// The movie a uid query matched, or [`MovieError::NotFound`].
pub fn require_movie(movie: Option<Movie>, uid: &str) -> MovieResult<Movie> {
    movie.ok_or_else(|| MovieError::NotFound(uid.to_string()))
}

/// Check that the movie read back carries the names and release date that were written.
pub fn check_readback(written: &Movie, read: &Movie) -> MovieResult<()> {
    compare("name@en", &written.name, &read.name)?;
    compare("name@de", &written.name_de, &read.name_de)?;
    compare("name@tr", &written.name_tr, &read.name_tr)?;
    if written.initial_release_date != read.initial_release_date {
        return Err(MovieError::Mismatch {
            field: "initial_release_date",
            written: format!("{:?}", written.initial_release_date),
            read: format!("{:?}", read.initial_release_date),
        });
    }
    Ok(())
}

fn compare(field: &'static str, written: &str, read: &str) -> MovieResult<()> {
    if written == read {
        Ok(())
    } else {
        Err(MovieError::Mismatch {
            field,
            written: written.to_string(),
            read: read.to_string(),
        })
    }
}
