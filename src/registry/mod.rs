//! Recipient registry
//!
//! The registry holds every provisioned recipient and, for each one, the
//! ordered set of artifact references it can currently see.
//!
//! # Ownership
//!
//! ```text
//!        ArtifactCatalog (owns Artifact + handle)
//!              ▲          ▲          ▲
//!              │ ref      │ ref      │ ref
//!         ┌────┴───┐ ┌────┴───┐ ┌────┴───┐
//!         │ alice  │ │  bob   │ │ charlie│  RecipientRegistry
//!         └────────┘ └────────┘ └────────┘
//! ```
//!
//! References are non-owning. Dropping a reference never destroys the
//! artifact; the distribution engine decides that from the total reference
//! count.

pub mod error;
pub mod recipient;
pub mod store;

pub use error::RegistryError;
pub use recipient::{ArtifactRef, Availability, Recipient, RecipientId};
pub use store::RecipientRegistry;
