//! Registry error types
//!
//! Error types for recipient registry operations.

use super::recipient::RecipientId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Recipient not found
    RecipientNotFound(RecipientId),
    /// A recipient with this id is already provisioned
    DuplicateRecipient(RecipientId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::RecipientNotFound(id) => write!(f, "Recipient not found: {}", id),
            RegistryError::DuplicateRecipient(id) => {
                write!(f, "Recipient already provisioned: {}", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
