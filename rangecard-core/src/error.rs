//! Error types for targeting operations
//!
//! Every error here is recoverable at the API boundary: the consuming
//! application rejects the offending input and re-prompts. Failed
//! operations leave store and registry state unchanged.

use thiserror::Error;

/// Error type for store, registry, and session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetingError {
    /// A gun profile or TRP with this name already exists
    #[error("name already in use: {0}")]
    DuplicateName(String),

    /// Lookup by a name not present in the store or registry
    #[error("not found: {0}")]
    NotFound(String),

    /// A computation was requested while no gun profile is active
    #[error("no active gun profile")]
    NoActiveProfile,

    /// A field was non-finite or outside its valid domain
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
