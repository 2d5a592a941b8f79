//! Engine error types

use crate::catalog::{ArtifactId, CatalogError};
use crate::handle::AllocationError;
use crate::registry::RegistryError;

/// Error type for distribution operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    /// Request rejected before any mutation (e.g., no targets or no files)
    InvalidRequest(&'static str),
    /// Artifact id is not in the catalog
    NotFound(ArtifactId),
    /// File's declared content type is neither a PDF nor an image
    ///
    /// `share` filters such files out and counts them in
    /// `ShareReport::rejected_count`; this variant only surfaces when a
    /// catalog error is converted directly.
    UnsupportedArtifactType {
        display_name: String,
        content_type: String,
    },
    /// Handle allocation failed
    ///
    /// `share` records per-file failures in its report instead of failing;
    /// `ShareReport::ensure_allocated` turns them into this error.
    Allocation(AllocationError),
    /// Recipient registry rejected the operation
    Registry(RegistryError),
}

impl std::fmt::Display for DistributionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionError::InvalidRequest(reason) => write!(f, "Invalid request: {}", reason),
            DistributionError::NotFound(id) => write!(f, "Artifact not found: {}", id),
            DistributionError::UnsupportedArtifactType {
                display_name,
                content_type,
            } => write!(
                f,
                "Unsupported artifact type for {}: {}",
                display_name, content_type
            ),
            DistributionError::Allocation(e) => write!(f, "{}", e),
            DistributionError::Registry(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DistributionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistributionError::Allocation(e) => Some(e),
            DistributionError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegistryError> for DistributionError {
    fn from(e: RegistryError) -> Self {
        DistributionError::Registry(e)
    }
}

impl From<AllocationError> for DistributionError {
    fn from(e: AllocationError) -> Self {
        DistributionError::Allocation(e)
    }
}

impl From<CatalogError> for DistributionError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ArtifactNotFound(id) => DistributionError::NotFound(id),
            CatalogError::Allocation(e) => DistributionError::Allocation(e),
            CatalogError::UnsupportedArtifactType {
                display_name,
                content_type,
            } => DistributionError::UnsupportedArtifactType {
                display_name,
                content_type,
            },
        }
    }
}
