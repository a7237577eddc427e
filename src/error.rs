//! Error types for the store adapter.

use thiserror::Error;

/// Errors surfaced by [`Store`](crate::Store) operations.
///
/// Every variant except the absorbed failures of
/// [`Store::query_all`](crate::Store::query_all) propagates to the caller
/// unmodified; the adapter performs no retries and no partial recovery.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The engine did not confirm an open handle after an open attempt.
    #[error("failed to open database: {0}")]
    Open(String),

    /// The engine did not confirm closure after a close attempt.
    ///
    /// This is fatal during a file-mode reset: deleting the backing file
    /// while a handle is still mapped would corrupt the store.
    #[error("failed to close database: {0}")]
    Close(String),

    /// An operation was invoked while no handle is open.
    #[error("database connection is closed")]
    Closed,

    /// Malformed SQL, constraint violation, or type error from the engine.
    #[error("statement failed: {0}")]
    Statement(#[from] rusqlite::Error),

    /// The `count` helper's result shape contract was violated.
    #[error("invalid count query: {0}")]
    InvalidCountQuery(#[from] CountQueryError),

    /// Filesystem failure while removing a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The ways a `count` query can violate its result contract.
#[derive(Debug, Error)]
pub enum CountQueryError {
    /// The query returned zero rows.
    #[error("query returned no rows")]
    NoRows,

    /// The first row has no column literally named `count`.
    #[error("result has no `count` column")]
    MissingCountColumn,

    /// The `count` value could not be coerced to an integer.
    #[error("`count` value is not numeric: {0}")]
    NotNumeric(String),
}
