//! Recipient registry implementation
//!
//! Holds recipients in provisioning order together with their visible
//! artifact references.

use crate::catalog::{Artifact, ArtifactId};

use super::error::RegistryError;
use super::recipient::{ArtifactRef, Availability, Recipient, RecipientId};

/// Set of recipients and the artifacts each one can see
#[derive(Debug, Default)]
pub struct RecipientRegistry {
    /// Recipients in registry order
    recipients: Vec<Recipient>,
}

impl RecipientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipient
    ///
    /// Any references the recipient already carries are dropped; recipients
    /// only gain artifacts through the distribution engine.
    pub fn provision(&mut self, mut recipient: Recipient) -> Result<(), RegistryError> {
        if self.get(&recipient.id).is_some() {
            return Err(RegistryError::DuplicateRecipient(recipient.id));
        }

        recipient.visible.clear();

        tracing::info!(
            recipient = %recipient.id,
            name = %recipient.display_name,
            availability = ?recipient.availability,
            "Recipient provisioned"
        );

        self.recipients.push(recipient);
        Ok(())
    }

    /// Update a recipient's presence
    ///
    /// Going offline keeps every reference the recipient already has.
    pub fn set_availability(
        &mut self,
        id: &RecipientId,
        availability: Availability,
    ) -> Result<(), RegistryError> {
        let recipient = self
            .get_mut(id)
            .ok_or_else(|| RegistryError::RecipientNotFound(id.clone()))?;

        if recipient.availability != availability {
            recipient.availability = availability;
            tracing::info!(
                recipient = %id,
                availability = ?availability,
                visible = recipient.visible.len(),
                "Recipient availability changed"
            );
        }

        Ok(())
    }

    /// Get a recipient by id
    pub fn get(&self, id: &RecipientId) -> Option<&Recipient> {
        self.recipients.iter().find(|r| &r.id == id)
    }

    fn get_mut(&mut self, id: &RecipientId) -> Option<&mut Recipient> {
        self.recipients.iter_mut().find(|r| &r.id == id)
    }

    /// All recipients in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter()
    }

    /// Recipients eligible as share targets (online), in registry order
    pub fn list_eligible(&self) -> Vec<&Recipient> {
        self.recipients.iter().filter(|r| r.is_online()).collect()
    }

    /// Append a reference to a recipient's visible set
    ///
    /// Returns `Ok(false)` without changes if the recipient already has an
    /// artifact with the same key. Availability is not checked here; the
    /// engine only calls this for eligible recipients.
    pub fn add_reference(
        &mut self,
        id: &RecipientId,
        artifact: &Artifact,
    ) -> Result<bool, RegistryError> {
        let recipient = self
            .get_mut(id)
            .ok_or_else(|| RegistryError::RecipientNotFound(id.clone()))?;

        if recipient.has_key(artifact.key()) {
            tracing::debug!(
                recipient = %id,
                artifact = %artifact.id(),
                name = %artifact.display_name(),
                "Recipient already has artifact"
            );
            return Ok(false);
        }

        recipient.visible.push(ArtifactRef::from(artifact));

        tracing::debug!(
            recipient = %id,
            artifact = %artifact.id(),
            visible = recipient.visible.len(),
            "Reference added"
        );

        Ok(true)
    }

    /// Remove one reference
    ///
    /// Returns `true` if a reference was removed. Unknown recipients and
    /// missing references are no-ops.
    pub fn remove_reference(&mut self, id: &RecipientId, artifact: ArtifactId) -> bool {
        let Some(recipient) = self.get_mut(id) else {
            return false;
        };

        let before = recipient.visible.len();
        recipient.visible.retain(|r| r.id != artifact);
        let removed = recipient.visible.len() != before;

        if removed {
            tracing::debug!(recipient = %id, artifact = %artifact, "Reference removed");
        }

        removed
    }

    /// Remove an artifact from every recipient that has it
    ///
    /// Returns the number of recipients affected.
    pub fn remove_reference_from_all(&mut self, artifact: ArtifactId) -> usize {
        let mut affected = 0;

        for recipient in &mut self.recipients {
            let before = recipient.visible.len();
            recipient.visible.retain(|r| r.id != artifact);
            if recipient.visible.len() != before {
                affected += 1;
            }
        }

        tracing::debug!(artifact = %artifact, affected = affected, "Reference removed from all");

        affected
    }

    /// Number of recipients whose visible set contains the artifact
    pub fn reference_count(&self, artifact: ArtifactId) -> usize {
        self.recipients.iter().filter(|r| r.sees(artifact)).count()
    }

    /// Recipients that can see the artifact, in registry order
    pub fn holders(&self, artifact: ArtifactId) -> Vec<&Recipient> {
        self.recipients.iter().filter(|r| r.sees(artifact)).collect()
    }

    /// Get total number of recipients
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
