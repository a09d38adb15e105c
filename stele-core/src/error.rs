//! Error types for stele-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, StatementError>;

/// Structural constraint violations raised at statement construction
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementError {
    /// A literal node was supplied as a subject
    #[error("literal node is not a valid subject")]
    LiteralSubject,

    /// A literal node was supplied as a predicate
    #[error("literal node is not a valid predicate")]
    LiteralPredicate,

    /// A blank node was supplied as a predicate
    #[error("blank node is not a valid predicate")]
    BlankPredicate,

    /// A literal node was supplied as a graph
    #[error("literal node is not a valid graph")]
    LiteralGraph,
}
