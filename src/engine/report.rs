//! Operation outcomes
//!
//! Share and revoke report what they did instead of failing on per-file or
//! per-reference problems, so a caller can render a summary.

use crate::catalog::Artifact;
use crate::handle::AllocationError;

use super::error::DistributionError;

/// A file whose handle could not be allocated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAdmission {
    /// Display name of the file
    pub display_name: String,
    /// Why allocation failed
    pub error: AllocationError,
}

/// Outcome of a share operation
#[derive(Debug, Clone, Default)]
pub struct ShareReport {
    /// Distinct artifacts shared, in submission order
    pub admitted: Vec<Artifact>,
    /// Files excluded because of their content type
    pub rejected_count: usize,
    /// Files that classified fine but could not get a handle
    pub failed: Vec<FailedAdmission>,
    /// Online target recipients the share reached
    pub recipients_reached: usize,
    /// References actually inserted (duplicates excluded)
    pub references_added: usize,
}

impl ShareReport {
    /// Number of distinct files shared
    pub fn files_shared(&self) -> usize {
        self.admitted.len()
    }

    /// Whether every submitted file was shared
    pub fn is_complete(&self) -> bool {
        self.rejected_count == 0 && self.failed.is_empty()
    }

    /// First allocation failure, if any
    pub fn allocation_error(&self) -> Option<&AllocationError> {
        self.failed.first().map(|f| &f.error)
    }

    /// Escalate the first allocation failure into an error
    ///
    /// Files shared before the failure keep their references either way.
    pub fn ensure_allocated(self) -> Result<Self, DistributionError> {
        match self.allocation_error() {
            Some(error) => Err(error.clone().into()),
            None => Ok(self),
        }
    }
}

/// Outcome of revoking a single reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revocation {
    /// A reference existed and was removed
    pub reference_removed: bool,
    /// The artifact had no referents left and its handle was released
    pub artifact_released: bool,
}
