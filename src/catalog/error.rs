//! Catalog error types

use crate::handle::AllocationError;

use super::artifact::ArtifactId;

/// Error type for catalog operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Declared content type is neither a PDF nor an image
    UnsupportedArtifactType {
        display_name: String,
        content_type: String,
    },
    /// No handle could be allocated for the artifact's bytes
    Allocation(AllocationError),
    /// Artifact is not in the catalog
    ArtifactNotFound(ArtifactId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnsupportedArtifactType {
                display_name,
                content_type,
            } => write!(
                f,
                "Unsupported artifact type for {}: {}",
                display_name, content_type
            ),
            CatalogError::Allocation(e) => write!(f, "{}", e),
            CatalogError::ArtifactNotFound(id) => write!(f, "Artifact not found: {}", id),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Allocation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AllocationError> for CatalogError {
    fn from(e: AllocationError) -> Self {
        CatalogError::Allocation(e)
    }
}
