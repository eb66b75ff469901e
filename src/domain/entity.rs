//! Domain Layer - Core Entity Trait
//!
//! Every list and item carries an opaque id that is unique within its scope.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Index of the entity with the given id, if present
pub fn position_by_id<T: Entity>(entities: &[T], id: &T::Id) -> Option<usize> {
    entities.iter().position(|entity| entity.id() == id)
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// None of these are fatal: callers keep the prior state when an operation
/// fails, and gateway failures never leave the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    /// Empty or whitespace-only name
    #[error("Invalid input: {0}")]
    Validation(String),
    /// Stale list or item id
    #[error("Not found: {0}")]
    NotFound(String),
    /// A suggestion request for the same list is already outstanding
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Credential, network or response failure inside a suggestion gateway
    #[error("Gateway error: {0}")]
    Gateway(String),
    /// Key-value slot I/O or document encoding failure
    #[error("Storage error: {0}")]
    Storage(String),
    /// Stored bytes that are not a readable document
    #[error("Corrupt data: {0}")]
    Corrupt(String),
    /// Unreadable configuration
    #[error("Config error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::NotFound("list abc".to_string());
        assert_eq!(err.to_string(), "Not found: list abc");

        let err = DomainError::Validation("item name is empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: item name is empty");
    }
}
