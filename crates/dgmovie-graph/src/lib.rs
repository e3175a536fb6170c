//! # dgmovie Graph
//!
//! Dgraph gRPC client for dgmovie.
//!
//! Provides the connection and its release guard, transactions,
//! schema setup, and the movie write and read paths.

pub mod api;
pub mod client;
pub mod error;
pub mod movies;
pub mod release;
pub mod schema;
pub mod txn;

pub use client::{DgraphClient, DgraphConfig};
pub use error::{DgraphError, DgraphResult};
pub use movies::{InsertResult, MovieReadback, fetch_movie, insert_movie};
pub use release::ReleaseGuard;
pub use txn::Txn;
