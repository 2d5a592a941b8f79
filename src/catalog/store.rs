//! Artifact catalog implementation
//!
//! Owns every distinct artifact and the handle manager that backs their
//! bytes. The catalog does not count references; its caller decides when an
//! artifact may be forgotten.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;

use crate::handle::HandleManager;

use super::artifact::{Artifact, ArtifactId, ArtifactKey, RawFile};
use super::classify::classify;
use super::error::CatalogError;

/// Result of admitting a file into the catalog
#[derive(Debug, Clone)]
pub struct Admission {
    /// The artifact now representing the file
    pub artifact: Artifact,
    /// Whether a new artifact (and handle) was created
    pub created: bool,
}

/// Set of distinct artifacts, keyed by identity
pub struct ArtifactCatalog {
    /// Artifacts by id; ids increase monotonically so iteration follows
    /// creation order
    artifacts: BTreeMap<ArtifactId, Artifact>,

    /// Dedup index
    by_key: HashMap<ArtifactKey, ArtifactId>,

    /// Handles backing artifact payloads
    handles: HandleManager,

    next_id: u64,
}

impl ArtifactCatalog {
    /// Create an empty catalog with an unlimited handle manager
    pub fn new() -> Self {
        Self::with_handles(HandleManager::new())
    }

    /// Create an empty catalog backed by the given handle manager
    pub fn with_handles(handles: HandleManager) -> Self {
        Self {
            artifacts: BTreeMap::new(),
            by_key: HashMap::new(),
            handles,
            next_id: 1,
        }
    }

    /// Admit a file, reusing the existing artifact with the same key
    ///
    /// A new handle is acquired only when no artifact with the file's key
    /// exists. If acquisition fails the catalog is left unchanged.
    pub fn admit(&mut self, file: &RawFile) -> Result<Admission, CatalogError> {
        let kind = classify(file).ok_or_else(|| CatalogError::UnsupportedArtifactType {
            display_name: file.display_name.clone(),
            content_type: file.content_type.clone(),
        })?;

        let key = ArtifactKey::of(file);
        if let Some(artifact) = self.by_key.get(&key).and_then(|id| self.artifacts.get(id)) {
            tracing::debug!(
                artifact = %artifact.id,
                name = %artifact.display_name,
                "Admission matched existing artifact"
            );
            return Ok(Admission {
                artifact: artifact.clone(),
                created: false,
            });
        }

        let handle = self.handles.acquire(file.payload.clone())?;

        let id = ArtifactId(self.next_id);
        self.next_id += 1;

        let artifact = Artifact {
            id,
            key: key.clone(),
            display_name: file.display_name.clone(),
            kind,
            handle,
        };

        self.by_key.insert(key, id);
        self.artifacts.insert(id, artifact.clone());

        tracing::info!(
            artifact = %id,
            name = %artifact.display_name,
            kind = %kind,
            handle = %handle,
            "Artifact admitted"
        );

        Ok(Admission {
            artifact,
            created: true,
        })
    }

    /// Remove an artifact and release its handle
    pub fn forget(&mut self, id: ArtifactId) -> Result<Artifact, CatalogError> {
        let artifact = self
            .artifacts
            .remove(&id)
            .ok_or(CatalogError::ArtifactNotFound(id))?;

        self.by_key.remove(&artifact.key);
        self.handles.release(artifact.handle);

        tracing::info!(
            artifact = %id,
            name = %artifact.display_name,
            handle = %artifact.handle,
            "Artifact forgotten"
        );

        Ok(artifact)
    }

    /// Get an artifact by id
    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.get(&id)
    }

    /// Look up an artifact by identity key
    pub fn find(&self, key: &ArtifactKey) -> Option<&Artifact> {
        self.by_key.get(key).and_then(|id| self.artifacts.get(id))
    }

    /// Check whether an artifact is catalogued
    pub fn contains(&self, id: ArtifactId) -> bool {
        self.artifacts.contains_key(&id)
    }

    /// Payload of a catalogued artifact
    pub fn payload(&self, id: ArtifactId) -> Option<Bytes> {
        self.artifacts
            .get(&id)
            .map(|artifact| self.handles.resolve(artifact.handle))
    }

    /// Iterate artifacts in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    /// Number of catalogued artifacts
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Handle manager backing this catalog
    pub fn handles(&self) -> &HandleManager {
        &self.handles
    }
}

impl Default for ArtifactCatalog {
    fn default() -> Self {
        Self::new()
    }
}
