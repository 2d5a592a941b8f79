//! Change notifications
//!
//! The engine fans events out through a `tokio::sync::broadcast` channel so
//! any number of presentation surfaces can follow catalog and registry
//! changes. Sending never blocks and never fails the operation that caused
//! it; with no receivers the event is simply dropped.

use crate::catalog::{ArtifactId, ArtifactKind};
use crate::handle::HandleRef;
use crate::registry::RecipientId;

/// A change to distribution state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionEvent {
    /// A new artifact entered the catalog
    ArtifactAdmitted {
        artifact: ArtifactId,
        display_name: String,
        kind: ArtifactKind,
    },
    /// An artifact became visible to a recipient
    ReferenceAdded {
        recipient: RecipientId,
        artifact: ArtifactId,
    },
    /// An artifact is no longer visible to a recipient
    ReferenceRemoved {
        recipient: RecipientId,
        artifact: ArtifactId,
    },
    /// An artifact left the catalog and its handle was released
    ArtifactReleased {
        artifact: ArtifactId,
        handle: HandleRef,
    },
    /// An artifact was opened in the viewer
    ViewerOpened { artifact: ArtifactId },
    /// The viewer was closed
    ViewerClosed { artifact: ArtifactId },
}

impl DistributionEvent {
    /// Artifact the event concerns
    pub fn artifact(&self) -> ArtifactId {
        match self {
            DistributionEvent::ArtifactAdmitted { artifact, .. }
            | DistributionEvent::ReferenceAdded { artifact, .. }
            | DistributionEvent::ReferenceRemoved { artifact, .. }
            | DistributionEvent::ArtifactReleased { artifact, .. }
            | DistributionEvent::ViewerOpened { artifact }
            | DistributionEvent::ViewerClosed { artifact } => *artifact,
        }
    }
}
