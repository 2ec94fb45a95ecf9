use thiserror::Error;

/// Failure of a single query against the snapshot.
///
/// Empty results from multi-result queries are never reported here; they come
/// back as empty collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
