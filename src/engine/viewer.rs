//! Viewer session
//!
//! Tracks the single artifact currently open for display and its zoom
//! factor. The session never mutates catalog or registry state; the engine
//! reads [`ViewerSession::holds`] to count the open artifact as a referent.
//!
//! Zoom is kept as an integer number of 0.2 steps so repeated zooming never
//! accumulates floating-point drift.

use crate::catalog::{Artifact, ArtifactId, ArtifactKind};
use crate::handle::HandleRef;

/// Zoom steps per 1.0 of zoom factor (one step = 0.2)
const STEPS_PER_UNIT: u8 = 5;
/// 0.2
const MIN_ZOOM_STEPS: u8 = 1;
/// 3.0
const MAX_ZOOM_STEPS: u8 = 15;
/// 1.0
const DEFAULT_ZOOM_STEPS: u8 = STEPS_PER_UNIT;

/// The artifact currently open in the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerFocus {
    /// Artifact being displayed
    pub artifact: ArtifactId,
    /// Display name, for the viewer title
    pub display_name: String,
    /// Kind of artifact
    pub kind: ArtifactKind,
    /// Handle backing the displayed bytes
    pub handle: HandleRef,
    /// Dereferenceable address of the payload
    pub address: String,
    zoom_steps: u8,
}

impl ViewerFocus {
    fn new(artifact: &Artifact, address: String) -> Self {
        Self {
            artifact: artifact.id(),
            display_name: artifact.display_name().to_string(),
            kind: artifact.kind(),
            handle: artifact.handle(),
            address,
            zoom_steps: DEFAULT_ZOOM_STEPS,
        }
    }

    /// Current zoom factor (always 1.0 for documents)
    pub fn zoom_factor(&self) -> f64 {
        f64::from(self.zoom_steps) / f64::from(STEPS_PER_UNIT)
    }

    /// Zoom percentage rounded for display (e.g., 120)
    pub fn zoom_percent(&self) -> u32 {
        u32::from(self.zoom_steps) * 100 / u32::from(STEPS_PER_UNIT)
    }

    pub fn is_zoomable(&self) -> bool {
        self.kind == ArtifactKind::Image
    }
}

/// Single-item focus state for the viewer surface
#[derive(Debug, Default)]
pub struct ViewerSession {
    focus: Option<ViewerFocus>,
}

impl ViewerSession {
    /// Create a closed session
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an artifact, replacing any current focus
    ///
    /// Returns the focus that was replaced. Zoom always starts at 1.0.
    pub(crate) fn open(&mut self, artifact: &Artifact, address: String) -> Option<ViewerFocus> {
        self.focus.replace(ViewerFocus::new(artifact, address))
    }

    /// Close the session, returning the focus that was open
    pub(crate) fn close(&mut self) -> Option<ViewerFocus> {
        self.focus.take()
    }

    /// Current focus, if an artifact is open
    pub fn focus(&self) -> Option<&ViewerFocus> {
        self.focus.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.focus.is_some()
    }

    /// Whether the viewer currently holds the given artifact
    pub fn holds(&self, artifact: ArtifactId) -> bool {
        self.focus.as_ref().is_some_and(|f| f.artifact == artifact)
    }

    /// Zoom in one step, up to 3.0
    ///
    /// No-op for documents or when nothing is open. Returns the resulting
    /// zoom factor if an artifact is open.
    pub fn zoom_in(&mut self) -> Option<f64> {
        let focus = self.focus.as_mut()?;
        if focus.is_zoomable() && focus.zoom_steps < MAX_ZOOM_STEPS {
            focus.zoom_steps += 1;
        }
        Some(focus.zoom_factor())
    }

    /// Zoom out one step, down to 0.2
    ///
    /// No-op for documents or when nothing is open. Returns the resulting
    /// zoom factor if an artifact is open.
    pub fn zoom_out(&mut self) -> Option<f64> {
        let focus = self.focus.as_mut()?;
        if focus.is_zoomable() && focus.zoom_steps > MIN_ZOOM_STEPS {
            focus.zoom_steps -= 1;
        }
        Some(focus.zoom_factor())
    }

    /// Whether a further zoom-in would change anything
    pub fn can_zoom_in(&self) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|f| f.is_zoomable() && f.zoom_steps < MAX_ZOOM_STEPS)
    }

    /// Whether a further zoom-out would change anything
    pub fn can_zoom_out(&self) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|f| f.is_zoomable() && f.zoom_steps > MIN_ZOOM_STEPS)
    }
}
