//! Recipient types
//!
//! This module defines the per-recipient state stored in the registry.

use crate::catalog::{Artifact, ArtifactId, ArtifactKey};

/// Unique identifier for a recipient
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientId(String);

impl RecipientId {
    /// Create a new recipient id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Presence of a recipient, supplied from outside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Eligible as a share target
    Online,
    /// Keeps existing references but receives no new ones
    Offline,
}

/// Non-owning reference from a recipient to a catalogued artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    /// Artifact being referenced
    pub id: ArtifactId,
    /// Identity key, used for per-recipient dedup
    pub key: ArtifactKey,
}

impl From<&Artifact> for ArtifactRef {
    fn from(artifact: &Artifact) -> Self {
        Self {
            id: artifact.id(),
            key: artifact.key().clone(),
        }
    }
}

/// One addressable destination
#[derive(Debug, Clone)]
pub struct Recipient {
    /// Unique recipient id
    pub id: RecipientId,

    /// Human-readable name
    pub display_name: String,

    /// Current presence
    pub availability: Availability,

    /// Visible artifacts in share order, no duplicates
    pub(super) visible: Vec<ArtifactRef>,
}

impl Recipient {
    /// Create a recipient with nothing shared
    pub fn new(
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
        availability: Availability,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            availability,
            visible: Vec::new(),
        }
    }

    /// Create an online recipient
    pub fn online(id: impl Into<RecipientId>, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, Availability::Online)
    }

    /// Create an offline recipient
    pub fn offline(id: impl Into<RecipientId>, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, Availability::Offline)
    }

    pub fn is_online(&self) -> bool {
        self.availability == Availability::Online
    }

    /// References visible to this recipient, in share order
    pub fn visible(&self) -> &[ArtifactRef] {
        &self.visible
    }

    /// Check whether the recipient can see the given artifact
    pub fn sees(&self, id: ArtifactId) -> bool {
        self.visible.iter().any(|r| r.id == id)
    }

    /// Check whether the recipient already has an artifact with this key
    pub(super) fn has_key(&self, key: &ArtifactKey) -> bool {
        self.visible.iter().any(|r| &r.key == key)
    }
}
