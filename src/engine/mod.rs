//! Distribution engine
//!
//! The engine is the only writer of catalog and registry state. It turns
//! share and revoke requests into reference changes and releases an
//! artifact's handle once nothing refers to it any more.
//!
//! # Reference accounting
//!
//! ```text
//!   referents(A) = |{ r : A ∈ r.visible }| + (1 if A is open in the viewer)
//!
//!   share ──► admit ──► add_reference ─┐
//!                                      ├──► referents(A) == 0 ──► forget(A) ──► release(handle)
//!   revoke ──► remove_reference ───────┤
//!   close viewer ──► drop hold ────────┘
//! ```
//!
//! Every mutating call takes `&mut self` and runs to completion, so the
//! count is always consistent when a call returns.

pub mod config;
pub mod distribution;
pub mod error;
pub mod event;
pub mod report;
pub mod viewer;

pub use config::EngineConfig;
pub use distribution::DistributionEngine;
pub use error::DistributionError;
pub use event::DistributionEvent;
pub use report::{FailedAdmission, Revocation, ShareReport};
pub use viewer::{ViewerFocus, ViewerSession};
