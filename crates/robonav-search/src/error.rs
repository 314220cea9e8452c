//! Error types for search setup.
//!
//! Running out of frontier is not an error; see
//! [`SearchOutcome::Exhausted`](crate::SearchOutcome::Exhausted).

use robonav_core::MapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("unknown search algorithm `{name}`; available algorithms are: {available}")]
    UnknownAlgorithm { name: String, available: String },

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Map(#[from] MapError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
