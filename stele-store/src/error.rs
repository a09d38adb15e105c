//! Error types for the store crate

use stele_core::{IndexOrder, StatementError};
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert of a statement already present in the default index
    #[error("statement already present")]
    Duplicate,

    /// Structural constraint violation
    #[error(transparent)]
    Statement(#[from] StatementError),

    /// `add_index` for an order that is already built
    #[error("index {0} already exists")]
    IndexExists(IndexOrder),

    /// `drop_index`/`begin_ordered` for an order that is not built
    #[error("index {0} does not exist")]
    NoSuchIndex(IndexOrder),

    /// `drop_index` for the default index
    #[error("index {0} is the default index and cannot be dropped")]
    DefaultIndex(IndexOrder),

    /// Graph-qualified order requested while the store does not index graphs
    #[error("index {0} orders by graph but the store does not index graphs")]
    GraphsNotIndexed(IndexOrder),

    /// Cursor created before the last mutation
    #[error("stale cursor: created at version {cursor}, store is at version {store}")]
    StaleCursor {
        /// Version captured by the cursor
        cursor: u64,
        /// Current store version
        store: u64,
    },

    /// Operation needing a positioned cursor got the end cursor
    #[error("cursor is at the end of its scan")]
    CursorAtEnd,

    /// Statement id space or capacity exhausted; the store is unchanged
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(&'static str),

    /// Ingest rejected an IRI it cannot use as-is
    #[error("unresolved relative IRI: {0}")]
    UnresolvedIri(String),

    /// Ingest rejected a malformed term description
    #[error("invalid term: {0}")]
    InvalidTerm(String),
}

impl StoreError {
    /// Create an unresolved-IRI error
    pub fn unresolved_iri(iri: impl Into<String>) -> Self {
        StoreError::UnresolvedIri(iri.into())
    }

    /// Create an invalid-term error
    pub fn invalid_term(msg: impl Into<String>) -> Self {
        StoreError::InvalidTerm(msg.into())
    }
}
