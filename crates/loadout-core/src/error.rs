//! Error types for loadout

use thiserror::Error;

use crate::domain::{EntryRef, NodeId};

/// Main error type for loadout operations
#[derive(Debug, Error)]
pub enum LoadoutError {
    /// Error in the domain model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// An atom carries more than one way to obtain it.
    ///
    /// Trees are built upstream; this means the builder produced a corrupt tree.
    #[error("Procurement invariant violated: atom {node} has {alternatives} nested alternatives")]
    ProcurementInvariant { node: NodeId, alternatives: usize },

    /// Node handle does not belong to the forest
    #[error("Unknown procurement node: {0}")]
    UnknownNode(NodeId),

    /// Entry handle does not resolve against the configuration list
    #[error("Unknown demand entry: {0}")]
    UnknownEntry(EntryRef),

    /// The optimal assignment routine could not produce a matching
    #[error("Matching error: {0}")]
    Matching(String),

    /// Invalid operation for current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for loadout operations
pub type Result<T> = std::result::Result<T, LoadoutError>;
