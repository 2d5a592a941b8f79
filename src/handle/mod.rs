//! Transient handles for artifact payloads
//!
//! A handle lets an artifact's bytes be addressed by reference, the way an
//! object URL addresses an in-memory file. The manager never looks inside
//! the payload; it only tracks which handles are live.
//!
//! ```text
//!   acquire(Bytes) ──► HandleRef ──► resolve() ──► Bytes (shared, not copied)
//!                          │
//!                          └──► release() ──► dead (second release is a no-op)
//! ```

pub mod error;
pub mod manager;

pub use error::AllocationError;
pub use manager::{HandleManager, HandleRef};
