//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations found while interpreting a trie.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid metadata: {reason}")]
    InvalidMetadata { reason: String },

    #[error("trie deeper than {limit} levels (at node {id})")]
    DepthExceeded { limit: usize, id: u64 },

    #[error("label index {id} out of range ({len} labels)")]
    LabelOutOfRange { id: u64, len: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
