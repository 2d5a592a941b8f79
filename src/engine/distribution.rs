//! Distribution engine implementation
//!
//! Orchestrates share and revoke across the catalog and the registry, and
//! releases artifacts once their referent count drops to zero.

use bytes::Bytes;
use tokio::sync::broadcast;

use crate::catalog::{classify, Artifact, ArtifactCatalog, ArtifactId, CatalogError, RawFile};
use crate::handle::HandleManager;
use crate::registry::{Availability, Recipient, RecipientId, RecipientRegistry, RegistryError};
use crate::stats::EngineStats;

use super::config::EngineConfig;
use super::error::DistributionError;
use super::event::DistributionEvent;
use super::report::{FailedAdmission, Revocation, ShareReport};
use super::viewer::{ViewerFocus, ViewerSession};

/// Owner of all distribution state
///
/// Construct one per process and pass it by reference; there is no global
/// state.
pub struct DistributionEngine {
    /// Distinct artifacts and their handles
    catalog: ArtifactCatalog,

    /// Recipients and their visible sets
    registry: RecipientRegistry,

    /// Open viewer, counted as an extra referent of its artifact
    viewer: ViewerSession,

    /// Broadcast sender for change notifications
    events: broadcast::Sender<DistributionEvent>,

    stats: EngineStats,

    config: EngineConfig,
}

impl DistributionEngine {
    /// Create an engine over the given recipients with default configuration
    pub fn new(registry: RecipientRegistry) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(registry: RecipientRegistry, config: EngineConfig) -> Self {
        let handles =
            HandleManager::with_capacity(config.max_handles).with_scheme(&config.handle_scheme);
        // broadcast::channel panics on zero capacity
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        Self {
            catalog: ArtifactCatalog::with_handles(handles),
            registry,
            viewer: ViewerSession::new(),
            events,
            stats: EngineStats::new(),
            config,
        }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<DistributionEvent> {
        self.events.subscribe()
    }

    /// Share files with a set of recipients
    ///
    /// Files with unsupported content types are skipped and counted. Target
    /// ids that are offline or unknown are skipped. Each admitted file is
    /// shared with every reachable target before the next file is touched,
    /// so an allocation failure on one file leaves the others' references in
    /// place.
    pub fn share(
        &mut self,
        targets: &[RecipientId],
        files: &[RawFile],
    ) -> Result<ShareReport, DistributionError> {
        if targets.is_empty() {
            return Err(DistributionError::InvalidRequest("no target recipients"));
        }
        if files.is_empty() {
            return Err(DistributionError::InvalidRequest("no files"));
        }

        self.stats.shares += 1;

        let (accepted, rejected): (Vec<&RawFile>, Vec<&RawFile>) =
            files.iter().partition(|file| classify(file).is_some());

        let mut report = ShareReport {
            rejected_count: rejected.len(),
            ..ShareReport::default()
        };
        self.stats.files_rejected += rejected.len() as u64;

        for file in &rejected {
            tracing::warn!(
                name = %file.display_name,
                content_type = %file.content_type,
                "Unsupported artifact type, file skipped"
            );
        }

        if accepted.is_empty() {
            tracing::info!(rejected = report.rejected_count, "Nothing to share");
            return Ok(report);
        }

        // Registry order, deduplicated, online only
        let reachable: Vec<RecipientId> = self
            .registry
            .list_eligible()
            .into_iter()
            .filter(|r| targets.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();

        if reachable.is_empty() {
            tracing::info!(
                targets = targets.len(),
                "No online recipients among targets, nothing shared"
            );
            return Ok(report);
        }

        for file in accepted {
            let admission = match self.catalog.admit(file) {
                Ok(admission) => admission,
                Err(CatalogError::Allocation(error)) => {
                    tracing::warn!(
                        name = %file.display_name,
                        error = %error,
                        "Handle allocation failed, file skipped"
                    );
                    self.stats.allocation_failures += 1;
                    report.failed.push(FailedAdmission {
                        display_name: file.display_name.clone(),
                        error,
                    });
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let artifact = admission.artifact;

            // Same name submitted twice in one batch
            if report.admitted.iter().any(|a| a.id() == artifact.id()) {
                continue;
            }

            if admission.created {
                self.emit(DistributionEvent::ArtifactAdmitted {
                    artifact: artifact.id(),
                    display_name: artifact.display_name().to_string(),
                    kind: artifact.kind(),
                });
            }

            for recipient in &reachable {
                if self.registry.add_reference(recipient, &artifact)? {
                    report.references_added += 1;
                    self.stats.references_added += 1;
                    self.emit(DistributionEvent::ReferenceAdded {
                        recipient: recipient.clone(),
                        artifact: artifact.id(),
                    });
                }
            }

            self.stats.files_admitted += 1;
            report.admitted.push(artifact);
        }

        // Nobody is reached when every accepted file failed allocation
        if !report.admitted.is_empty() {
            report.recipients_reached = reachable.len();
        }

        tracing::info!(
            files = report.files_shared(),
            rejected = report.rejected_count,
            failed = report.failed.len(),
            recipients = report.recipients_reached,
            references = report.references_added,
            "Share complete"
        );

        Ok(report)
    }

    /// Remove one artifact from one recipient
    ///
    /// Releases the artifact if nothing else refers to it. Unknown ids and
    /// missing references are no-ops.
    pub fn revoke(&mut self, recipient: &RecipientId, artifact: ArtifactId) -> Revocation {
        if !self.registry.remove_reference(recipient, artifact) {
            tracing::debug!(
                recipient = %recipient,
                artifact = %artifact,
                "Revoke of absent reference ignored"
            );
            return Revocation::default();
        }

        self.stats.references_removed += 1;
        self.emit(DistributionEvent::ReferenceRemoved {
            recipient: recipient.clone(),
            artifact,
        });

        Revocation {
            reference_removed: true,
            artifact_released: self.release_if_unreferenced(artifact),
        }
    }

    /// Remove an artifact from every recipient
    ///
    /// Returns the number of recipients affected. The handle is released
    /// immediately unless the artifact is open in the viewer, in which case
    /// release happens when the viewer closes.
    pub fn revoke_from_all(&mut self, artifact: ArtifactId) -> Result<usize, DistributionError> {
        if !self.catalog.contains(artifact) {
            return Err(DistributionError::NotFound(artifact));
        }

        let holders: Vec<RecipientId> = self
            .registry
            .holders(artifact)
            .into_iter()
            .map(|r| r.id.clone())
            .collect();

        let affected = self.registry.remove_reference_from_all(artifact);
        self.stats.references_removed += affected as u64;

        for recipient in holders {
            self.emit(DistributionEvent::ReferenceRemoved {
                recipient,
                artifact,
            });
        }

        if !self.release_if_unreferenced(artifact) {
            tracing::info!(
                artifact = %artifact,
                "Artifact open in viewer, release deferred until close"
            );
        }

        Ok(affected)
    }

    /// Open an artifact in the viewer
    ///
    /// Any artifact already open is closed first, and released if that
    /// viewer hold was its last referent.
    pub fn open_viewer(&mut self, artifact: ArtifactId) -> Result<ViewerFocus, DistributionError> {
        let target = self
            .catalog
            .get(artifact)
            .cloned()
            .ok_or(DistributionError::NotFound(artifact))?;
        let address = self.catalog.handles().address(target.handle());

        let previous = self.viewer.open(&target, address);
        self.stats.viewer_opens += 1;

        if let Some(previous) = previous {
            self.emit(DistributionEvent::ViewerClosed {
                artifact: previous.artifact,
            });
            if previous.artifact != artifact {
                self.release_if_unreferenced(previous.artifact);
            }
        }

        tracing::debug!(artifact = %artifact, name = %target.display_name(), "Viewer opened");
        self.emit(DistributionEvent::ViewerOpened { artifact });

        self.viewer
            .focus()
            .cloned()
            .ok_or(DistributionError::NotFound(artifact))
    }

    /// Close the viewer
    ///
    /// Always succeeds. Returns `true` if closing dropped the last referent
    /// and released the artifact.
    pub fn close_viewer(&mut self) -> bool {
        let Some(focus) = self.viewer.close() else {
            return false;
        };

        tracing::debug!(artifact = %focus.artifact, "Viewer closed");
        self.emit(DistributionEvent::ViewerClosed {
            artifact: focus.artifact,
        });

        self.release_if_unreferenced(focus.artifact)
    }

    /// Viewer state (zoom controls are available through `viewer_mut`)
    pub fn viewer(&self) -> &ViewerSession {
        &self.viewer
    }

    /// Mutable viewer access for zooming
    pub fn viewer_mut(&mut self) -> &mut ViewerSession {
        &mut self.viewer
    }

    /// Bytes of the artifact open in the viewer
    pub fn viewer_payload(&self) -> Option<Bytes> {
        self.viewer
            .focus()
            .map(|focus| self.catalog.handles().resolve(focus.handle))
    }

    /// Update a recipient's availability
    pub fn set_availability(
        &mut self,
        recipient: &RecipientId,
        availability: Availability,
    ) -> Result<(), DistributionError> {
        Ok(self.registry.set_availability(recipient, availability)?)
    }

    /// Add a recipient after construction
    pub fn provision(&mut self, recipient: Recipient) -> Result<(), DistributionError> {
        Ok(self.registry.provision(recipient)?)
    }

    /// Artifacts visible to a recipient, in share order
    pub fn recipient_view(
        &self,
        recipient: &RecipientId,
    ) -> Result<Vec<&Artifact>, DistributionError> {
        let recipient = self
            .registry
            .get(recipient)
            .ok_or_else(|| RegistryError::RecipientNotFound(recipient.clone()))?;

        Ok(recipient
            .visible()
            .iter()
            .filter_map(|r| self.catalog.get(r.id))
            .collect())
    }

    /// Every catalogued artifact with the recipients that can see it
    ///
    /// Artifacts appear in creation order, recipients in registry order. An
    /// artifact kept alive only by the viewer appears with no recipients.
    pub fn shared_overview(&self) -> Vec<(&Artifact, Vec<&Recipient>)> {
        self.catalog
            .iter()
            .map(|artifact| (artifact, self.registry.holders(artifact.id())))
            .collect()
    }

    /// Number of recipients that can see the artifact
    pub fn reference_count(&self, artifact: ArtifactId) -> usize {
        self.registry.reference_count(artifact)
    }

    /// Recipients plus the viewer hold
    pub fn referents(&self, artifact: ArtifactId) -> usize {
        self.registry.reference_count(artifact) + usize::from(self.viewer.holds(artifact))
    }

    pub fn catalog(&self) -> &ArtifactCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &RecipientRegistry {
        &self.registry
    }

    /// Snapshot of engine counters
    pub fn stats(&self) -> EngineStats {
        let handles = self.catalog.handles();
        EngineStats {
            handles_acquired: handles.acquired_total(),
            handles_released: handles.released_total(),
            live_artifacts: self.catalog.len() as u64,
            ..self.stats.clone()
        }
    }

    /// Forget the artifact if nothing refers to it
    ///
    /// Returns `true` if the artifact was released by this call.
    fn release_if_unreferenced(&mut self, artifact: ArtifactId) -> bool {
        if !self.catalog.contains(artifact) || self.referents(artifact) > 0 {
            return false;
        }

        match self.catalog.forget(artifact) {
            Ok(forgotten) => {
                self.emit(DistributionEvent::ArtifactReleased {
                    artifact,
                    handle: forgotten.handle(),
                });
                true
            }
            Err(e) => {
                tracing::warn!(artifact = %artifact, error = %e, "Release failed");
                false
            }
        }
    }

    fn emit(&self, event: DistributionEvent) {
        // Err only means nobody is listening
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::catalog::ArtifactKind;
    use crate::handle::AllocationError;

    fn alice() -> RecipientId {
        RecipientId::new("user-1")
    }

    fn bob() -> RecipientId {
        RecipientId::new("user-2")
    }

    fn charlie() -> RecipientId {
        RecipientId::new("user-3")
    }

    fn engine() -> DistributionEngine {
        engine_with(EngineConfig::default())
    }

    fn engine_with(config: EngineConfig) -> DistributionEngine {
        let mut registry = RecipientRegistry::new();
        registry.provision(Recipient::online("user-1", "Alice (Desktop-A)")).unwrap();
        registry.provision(Recipient::online("user-2", "Bob (Laptop-B)")).unwrap();
        registry.provision(Recipient::offline("user-3", "Charlie (Tablet-C)")).unwrap();
        DistributionEngine::with_config(registry, config)
    }

    fn pdf(name: &str) -> RawFile {
        RawFile::new(name, "application/pdf", Bytes::from_static(b"%PDF-1.7"))
    }

    fn png(name: &str) -> RawFile {
        RawFile::new(name, "image/png", Bytes::from_static(b"\x89PNG"))
    }

    fn share_one(engine: &mut DistributionEngine, targets: &[RecipientId], file: RawFile) -> Artifact {
        let report = assert_ok!(engine.share(targets, &[file]));
        report.admitted[0].clone()
    }

    #[test]
    fn test_share_rejects_empty_request() {
        let mut engine = engine();

        let err = assert_err!(engine.share(&[], &[pdf("a.pdf")]));
        assert_eq!(err, DistributionError::InvalidRequest("no target recipients"));

        let err = assert_err!(engine.share(&[alice()], &[]));
        assert_eq!(err, DistributionError::InvalidRequest("no files"));

        assert!(engine.catalog().is_empty());
        assert_eq!(engine.stats().shares, 0);
    }

    #[test]
    fn test_idempotent_share() {
        let mut engine = engine();

        let first = share_one(&mut engine, &[alice()], pdf("report.pdf"));
        let report = assert_ok!(engine.share(&[alice()], &[pdf("report.pdf")]));

        assert_eq!(report.admitted[0].id(), first.id());
        assert_eq!(report.references_added, 0);
        assert_eq!(engine.registry().get(&alice()).unwrap().visible().len(), 1);
        assert_eq!(engine.catalog().len(), 1);
        assert_eq!(engine.stats().handles_acquired, 1);
    }

    #[test]
    fn test_fan_out() {
        let mut engine = engine();

        let report = assert_ok!(engine.share(&[alice(), bob()], &[png("photo.png")]));

        assert_eq!(report.files_shared(), 1);
        assert_eq!(report.recipients_reached, 2);
        assert_eq!(report.references_added, 2);
        assert_eq!(engine.catalog().len(), 1);
        assert_eq!(engine.reference_count(report.admitted[0].id()), 2);
    }

    #[test]
    fn test_share_to_recipient_missing_existing_artifact() {
        let mut engine = engine();

        let photo = share_one(&mut engine, &[alice()], png("photo.png"));
        let report = assert_ok!(engine.share(&[alice(), bob()], &[png("photo.png")]));

        assert_eq!(report.admitted[0].id(), photo.id());
        assert_eq!(report.references_added, 1);
        assert_eq!(engine.reference_count(photo.id()), 2);
        assert_eq!(engine.stats().handles_acquired, 1);
    }

    #[test]
    fn test_offline_exclusion() {
        let mut engine = engine();

        let report = assert_ok!(engine.share(&[charlie()], &[pdf("report.pdf")]));

        assert_eq!(report.recipients_reached, 0);
        assert_eq!(report.references_added, 0);
        assert!(report.admitted.is_empty());
        assert!(engine.catalog().is_empty());
        assert_eq!(engine.stats().handles_acquired, 0);
    }

    #[test]
    fn test_unknown_and_duplicate_targets_skipped() {
        let mut engine = engine();
        let targets = [alice(), RecipientId::new("ghost"), alice(), charlie()];

        let report = assert_ok!(engine.share(&targets, &[pdf("report.pdf")]));

        assert_eq!(report.recipients_reached, 1);
        assert_eq!(report.references_added, 1);
    }

    #[test]
    fn test_rejection_accounting() {
        let mut engine = engine();
        let files = [pdf("report.pdf"), RawFile::new("notes.txt", "text/plain", "hi")];

        let report = assert_ok!(engine.share(&[alice()], &files));

        assert_eq!(report.files_shared(), 1);
        assert_eq!(report.rejected_count, 1);
        assert!(!report.is_complete());
        assert_eq!(engine.stats().files_rejected, 1);
    }

    #[test]
    fn test_all_rejected_is_noop() {
        let mut engine = engine();

        let report = assert_ok!(engine.share(&[alice()], &[RawFile::new("a.zip", "application/zip", "PK")]));

        assert_eq!(report.files_shared(), 0);
        assert_eq!(report.rejected_count, 1);
        assert_eq!(report.recipients_reached, 0);
        assert!(engine.catalog().is_empty());
    }

    #[test]
    fn test_same_name_twice_in_batch() {
        let mut engine = engine();

        let report = assert_ok!(engine.share(&[alice()], &[png("a.png"), png("a.png")]));

        assert_eq!(report.files_shared(), 1);
        assert_eq!(report.references_added, 1);
        assert_eq!(engine.stats().files_admitted, 1);
    }

    #[test]
    fn test_allocation_failure_keeps_other_files() {
        let mut engine = engine_with(EngineConfig::default().max_handles(1));
        let files = [pdf("one.pdf"), pdf("two.pdf")];

        let report = assert_ok!(engine.share(&[alice(), bob()], &files));

        assert_eq!(report.files_shared(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].display_name, "two.pdf");
        assert!(report.allocation_error().is_some());

        let one = report.admitted[0].id();
        assert_eq!(engine.reference_count(one), 2);
        assert_eq!(engine.catalog().len(), 1);
        assert_eq!(engine.stats().allocation_failures, 1);
    }

    #[test]
    fn test_revoke_releases_on_last_reference() {
        let mut engine = engine();
        let report = assert_ok!(engine.share(&[alice(), bob()], &[pdf("report.pdf")]));
        let artifact = report.admitted[0].clone();

        let first = engine.revoke(&alice(), artifact.id());
        assert!(first.reference_removed);
        assert!(!first.artifact_released);
        assert!(engine.catalog().contains(artifact.id()));
        assert!(engine.catalog().handles().is_live(artifact.handle()));

        let second = engine.revoke(&bob(), artifact.id());
        assert!(second.artifact_released);
        assert!(!engine.catalog().contains(artifact.id()));
        assert!(!engine.catalog().handles().is_live(artifact.handle()));
        assert_eq!(engine.stats().handles_released, 1);
    }

    #[test]
    fn test_revoke_absent_reference_is_noop() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));

        let outcome = engine.revoke(&bob(), artifact.id());
        assert_eq!(outcome, Revocation::default());
        assert_eq!(engine.reference_count(artifact.id()), 1);
    }

    #[test]
    fn test_revoke_from_all() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice(), bob()], pdf("report.pdf"));

        // Charlie got it while online, then went offline
        assert_ok!(engine.set_availability(&charlie(), Availability::Online));
        assert_ok!(engine.share(&[charlie()], &[pdf("report.pdf")]));
        assert_ok!(engine.set_availability(&charlie(), Availability::Offline));
        assert_eq!(engine.reference_count(artifact.id()), 3);

        let affected = assert_ok!(engine.revoke_from_all(artifact.id()));

        assert_eq!(affected, 3);
        assert!(!engine.catalog().contains(artifact.id()));
        assert_eq!(engine.stats().handles_released, 1);
        assert_eq!(engine.stats().live_handles(), 0);
    }

    #[test]
    fn test_unknown_id_safety() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));
        assert_ok!(engine.revoke_from_all(artifact.id()));

        let outcome = engine.revoke(&RecipientId::new("ghost"), artifact.id());
        assert!(!outcome.artifact_released);

        let err = assert_err!(engine.revoke_from_all(artifact.id()));
        assert_eq!(err, DistributionError::NotFound(artifact.id()));
        assert_eq!(engine.stats().handles_released, 1);
    }

    #[test]
    fn test_viewer_holds_release() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice(), bob()], png("photo.png"));

        let focus = assert_ok!(engine.open_viewer(artifact.id()));
        assert_eq!(focus.kind, ArtifactKind::Image);
        assert_eq!(engine.referents(artifact.id()), 3);

        assert_eq!(assert_ok!(engine.revoke_from_all(artifact.id())), 2);

        // Still displayable while open
        assert!(engine.catalog().handles().is_live(artifact.handle()));
        assert_eq!(engine.viewer_payload(), Some(Bytes::from_static(b"\x89PNG")));
        assert_eq!(engine.stats().handles_released, 0);
        assert_eq!(engine.shared_overview().len(), 1);
        assert!(engine.shared_overview()[0].1.is_empty());

        assert!(engine.close_viewer());
        assert!(!engine.catalog().handles().is_live(artifact.handle()));
        assert!(!engine.catalog().contains(artifact.id()));
        assert_eq!(engine.stats().handles_released, 1);
    }

    #[test]
    fn test_viewer_close_without_revoke_keeps_artifact() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));

        assert_ok!(engine.open_viewer(artifact.id()));
        assert!(!engine.close_viewer());

        assert!(engine.catalog().handles().is_live(artifact.handle()));
        assert!(!engine.close_viewer());
    }

    #[test]
    fn test_viewer_hold_after_single_revoke() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));
        assert_ok!(engine.open_viewer(artifact.id()));

        let outcome = engine.revoke(&alice(), artifact.id());
        assert!(outcome.reference_removed);
        assert!(!outcome.artifact_released);

        assert!(engine.close_viewer());
        assert_eq!(engine.stats().handles_released, 1);
    }

    #[test]
    fn test_reshare_while_held_reuses_artifact() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], png("photo.png"));
        assert_ok!(engine.open_viewer(artifact.id()));
        assert_ok!(engine.revoke_from_all(artifact.id()));

        let again = share_one(&mut engine, &[bob()], png("photo.png"));
        assert_eq!(again.id(), artifact.id());

        assert!(!engine.close_viewer());
        assert_eq!(engine.reference_count(artifact.id()), 1);
        assert_eq!(engine.stats().handles_acquired, 1);
    }

    #[test]
    fn test_opening_another_artifact_drops_previous_hold() {
        let mut engine = engine();
        let report = assert_ok!(engine.share(&[alice()], &[png("a.png"), png("b.png")]));
        let a = report.admitted[0].clone();
        let b = report.admitted[1].clone();

        assert_ok!(engine.open_viewer(a.id()));
        assert_ok!(engine.revoke_from_all(a.id()));
        assert!(engine.catalog().contains(a.id()));

        assert_ok!(engine.open_viewer(b.id()));
        assert!(!engine.catalog().contains(a.id()));
        assert!(engine.viewer().holds(b.id()));
        assert_eq!(engine.stats().handles_released, 1);
    }

    #[test]
    fn test_open_unknown_artifact() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));
        engine.revoke(&alice(), artifact.id());

        let err = assert_err!(engine.open_viewer(artifact.id()));
        assert_eq!(err, DistributionError::NotFound(artifact.id()));
        assert!(!engine.viewer().is_open());
    }

    #[test]
    fn test_viewer_zoom_through_engine() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice()], png("photo.png"));
        let focus = assert_ok!(engine.open_viewer(artifact.id()));
        assert_eq!(focus.address, format!("blob:{}", artifact.handle().as_u64()));

        engine.viewer_mut().zoom_in();
        engine.viewer_mut().zoom_in();

        assert_eq!(engine.viewer().focus().unwrap().zoom_percent(), 140);
    }

    #[test]
    fn test_recipient_view_in_share_order() {
        let mut engine = engine();
        assert_ok!(engine.share(&[alice()], &[pdf("b.pdf")]));
        assert_ok!(engine.share(&[alice(), bob()], &[pdf("a.pdf"), pdf("b.pdf")]));

        let names: Vec<&str> = assert_ok!(engine.recipient_view(&alice()))
            .iter()
            .map(|a| a.display_name())
            .collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);

        let names: Vec<&str> = assert_ok!(engine.recipient_view(&bob()))
            .iter()
            .map(|a| a.display_name())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);

        assert!(engine.recipient_view(&RecipientId::new("ghost")).is_err());
    }

    #[test]
    fn test_shared_overview() {
        let mut engine = engine();
        assert_ok!(engine.share(&[alice(), bob()], &[pdf("report.pdf")]));
        assert_ok!(engine.share(&[bob()], &[png("photo.png")]));

        let overview = engine.shared_overview();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].0.display_name(), "report.pdf");
        assert_eq!(overview[0].1.len(), 2);
        assert_eq!(overview[1].0.display_name(), "photo.png");
        assert_eq!(overview[1].1[0].id, bob());
    }

    #[test]
    fn test_provision_after_construction() {
        let mut engine = engine();
        assert_ok!(engine.provision(Recipient::online("user-4", "Dana")));

        let err = assert_err!(engine.provision(Recipient::online("user-4", "Dana")));
        assert!(matches!(err, DistributionError::Registry(_)));

        let report = assert_ok!(engine.share(&[RecipientId::new("user-4")], &[pdf("a.pdf")]));
        assert_eq!(report.recipients_reached, 1);
    }

    #[test]
    fn test_events_without_subscribers() {
        let mut engine = engine();

        // Sending with no receivers must not affect the operation
        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));
        assert!(engine.revoke(&alice(), artifact.id()).artifact_released);
    }

    #[test]
    fn test_event_order_for_share_and_revoke() {
        let mut engine = engine();
        let mut rx = engine.subscribe();

        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));
        engine.revoke(&alice(), artifact.id());

        assert!(matches!(
            rx.try_recv(),
            Ok(DistributionEvent::ArtifactAdmitted { .. })
        ));
        assert_eq!(
            rx.try_recv(),
            Ok(DistributionEvent::ReferenceAdded {
                recipient: alice(),
                artifact: artifact.id(),
            })
        );
        assert_eq!(
            rx.try_recv(),
            Ok(DistributionEvent::ReferenceRemoved {
                recipient: alice(),
                artifact: artifact.id(),
            })
        );
        assert_eq!(
            rx.try_recv(),
            Ok(DistributionEvent::ArtifactReleased {
                artifact: artifact.id(),
                handle: artifact.handle(),
            })
        );
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_release_event_waits_for_viewer_close() {
        let mut engine = engine();
        let artifact = share_one(&mut engine, &[alice(), bob()], png("photo.png"));
        assert_ok!(engine.open_viewer(artifact.id()));

        let mut rx = engine.subscribe();
        assert_ok!(engine.revoke_from_all(artifact.id()));
        engine.close_viewer();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], DistributionEvent::ReferenceRemoved { .. }));
        assert!(matches!(events[1], DistributionEvent::ReferenceRemoved { .. }));
        assert_eq!(
            events[2],
            DistributionEvent::ViewerClosed {
                artifact: artifact.id()
            }
        );
        assert!(matches!(
            events[3],
            DistributionEvent::ArtifactReleased { .. }
        ));
    }

    #[tokio::test]
    async fn test_multiple_observers() {
        let mut engine = engine();
        let mut admin = engine.subscribe();
        let mut viewer = engine.subscribe();

        let artifact = share_one(&mut engine, &[bob()], pdf("report.pdf"));

        let a = admin.recv().await.unwrap();
        let v = viewer.recv().await.unwrap();
        assert_eq!(a, v);
        assert_eq!(a.artifact(), artifact.id());
    }

    #[test]
    fn test_zero_event_capacity_from_struct_literal() {
        let config = EngineConfig {
            event_capacity: 0,
            ..EngineConfig::default()
        };
        let mut engine = engine_with(config);
        let mut rx = engine.subscribe();

        let artifact = share_one(&mut engine, &[alice()], pdf("report.pdf"));

        assert_eq!(engine.config().event_capacity, 0);
        // Capacity 1: only the newest event is retained
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(_))));
        assert_eq!(
            rx.try_recv(),
            Ok(DistributionEvent::ReferenceAdded {
                recipient: alice(),
                artifact: artifact.id(),
            })
        );
    }

    #[test]
    fn test_all_allocations_failed_reaches_nobody() {
        let mut engine = engine_with(EngineConfig::default().max_handles(1));
        share_one(&mut engine, &[alice()], pdf("a.pdf"));

        let report = assert_ok!(engine.share(&[alice(), bob()], &[pdf("b.pdf")]));

        assert_eq!(report.files_shared(), 0);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.references_added, 0);
        assert_eq!(report.recipients_reached, 0);

        let err = assert_err!(report.ensure_allocated());
        assert_eq!(err, DistributionError::Allocation(AllocationError { live: 1, capacity: 1 }));
    }

    #[test]
    fn test_partial_allocation_still_reaches_recipients() {
        let mut engine = engine_with(EngineConfig::default().max_handles(1));

        let report = assert_ok!(engine.share(&[alice(), bob()], &[pdf("a.pdf"), pdf("b.pdf")]));

        assert_eq!(report.files_shared(), 1);
        assert_eq!(report.recipients_reached, 2);
    }
}
