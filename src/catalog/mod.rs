//! Artifact catalog
//!
//! The catalog is the single owner of every distinct artifact in the system
//! and of the handle backing each artifact's bytes. Recipients only hold
//! references into it.
//!
//! Artifact identity is an [`ArtifactKey`]. Today the key is the display name
//! of the file, so two different files that share a name are treated as one
//! artifact. Swapping the key for a content hash only touches
//! [`ArtifactKey`]; callers compare keys, never names.

pub mod artifact;
pub mod classify;
pub mod error;
pub mod store;

pub use artifact::{Artifact, ArtifactId, ArtifactKey, ArtifactKind, RawFile};
pub use classify::classify;
pub use error::CatalogError;
pub use store::{Admission, ArtifactCatalog};
