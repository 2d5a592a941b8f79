//! Artifact and file types
//!
//! This module defines the identity types for artifacts and the raw files
//! that an upload surface hands to the engine.

use bytes::Bytes;

use crate::handle::HandleRef;

/// System-generated artifact identifier
///
/// Unique and stable for the artifact's lifetime. Identifiers are issued in
/// increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(pub(crate) u64);

impl ArtifactId {
    /// Raw identifier value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "artifact-{}", self.0)
    }
}

/// Identity key used for deduplication
///
/// Derived from the display name only; payload bytes are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey(String);

impl ArtifactKey {
    /// Derive the key for a file with the given display name
    pub fn from_display_name(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Derive the key for a raw file
    pub fn of(file: &RawFile) -> Self {
        Self::from_display_name(&file.display_name)
    }
}

impl std::fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of artifact, derived from the declared content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// PDF document
    Document,
    /// Any `image/*` type
    Image,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Document => f.write_str("document"),
            ArtifactKind::Image => f.write_str("image"),
        }
    }
}

/// A file as supplied by the upload surface
#[derive(Debug, Clone)]
pub struct RawFile {
    /// Original filename
    pub display_name: String,
    /// Declared MIME type (e.g., "image/png")
    pub content_type: String,
    /// File contents (zero-copy via reference counting)
    pub payload: Bytes,
}

impl RawFile {
    /// Create a raw file
    pub fn new(
        display_name: impl Into<String>,
        content_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }
}

/// One distinct shared file tracked by the catalog
///
/// Artifacts are only created by the catalog. Copies handed out to callers
/// are read-only snapshots; the catalog keeps the authoritative entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub(crate) id: ArtifactId,
    pub(crate) key: ArtifactKey,
    pub(crate) display_name: String,
    pub(crate) kind: ArtifactKind,
    pub(crate) handle: HandleRef,
}

impl Artifact {
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Handle backing this artifact's bytes
    pub fn handle(&self) -> HandleRef {
        self.handle
    }

    pub fn is_image(&self) -> bool {
        self.kind == ArtifactKind::Image
    }
}
