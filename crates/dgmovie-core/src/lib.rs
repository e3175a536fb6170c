//! dgmovie Core Library
//!
//! Movie graph records, the bundled sample film, blank-node labelling
//! and the read-back query template.

pub mod error;
pub mod labels;
pub mod model;
pub mod query;
pub mod sample;

pub use error::{MovieError, MovieResult};
pub use model::{Actor, Character, Director, Genre, Movie, QueryRoot, Starring};
