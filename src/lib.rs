//! One-to-many artifact distribution
//!
//! `localshare` tracks documents and images that a single distributing party
//! shares with a set of named recipients. Each recipient has its own ordered
//! view of what was shared with it; the catalog keeps exactly one artifact
//! per distinct file and releases the handle backing its bytes once no
//! recipient (and no open viewer) refers to it.
//!
//! # Architecture
//!
//! ```text
//!                       DistributionEngine
//!          ┌──────────────────┬──────────────────┬───────────────┐
//!          │                  │                  │               │
//!          ▼                  ▼                  ▼               ▼
//!   ArtifactCatalog   RecipientRegistry    ViewerSession   broadcast::Sender
//!          │            (non-owning refs)   (viewer hold)   <DistributionEvent>
//!          ▼
//!    HandleManager
//! ```
//!
//! # Example
//!
//! ```
//! use localshare::{DistributionEngine, RawFile, Recipient, RecipientId, RecipientRegistry};
//!
//! let mut registry = RecipientRegistry::new();
//! registry.provision(Recipient::online("alice", "Alice")).unwrap();
//! registry.provision(Recipient::online("bob", "Bob")).unwrap();
//!
//! let mut engine = DistributionEngine::new(registry);
//! let targets = [RecipientId::new("alice"), RecipientId::new("bob")];
//! let report = engine
//!     .share(&targets, &[RawFile::new("plan.pdf", "application/pdf", "%PDF")])
//!     .unwrap();
//!
//! let plan = report.admitted[0].id();
//! assert_eq!(engine.reference_count(plan), 2);
//!
//! engine.revoke(&targets[0], plan);
//! assert!(engine.revoke(&targets[1], plan).artifact_released);
//! ```
//!
//! The engine is single-threaded by construction: every mutating operation
//! takes `&mut self` and completes before returning. Payloads are
//! `bytes::Bytes`, so the catalog, handle manager and viewer share one
//! allocation per file.

pub mod catalog;
pub mod engine;
pub mod handle;
pub mod registry;
pub mod stats;

pub use catalog::{Artifact, ArtifactCatalog, ArtifactId, ArtifactKey, ArtifactKind, RawFile};
pub use engine::{
    DistributionEngine, DistributionError, DistributionEvent, EngineConfig, Revocation,
    ShareReport, ViewerFocus, ViewerSession,
};
pub use handle::{AllocationError, HandleManager, HandleRef};
pub use registry::{Availability, Recipient, RecipientId, RecipientRegistry, RegistryError};
pub use stats::EngineStats;
