//! Engine-wide counters

/// Snapshot of engine activity since construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Share calls that passed validation
    pub shares: u64,
    /// Files turned into (new or existing) artifacts by share calls
    pub files_admitted: u64,
    /// Files excluded because of their content type
    pub files_rejected: u64,
    /// Files that failed handle allocation
    pub allocation_failures: u64,
    /// References inserted
    pub references_added: u64,
    /// References removed
    pub references_removed: u64,
    /// Handles acquired
    pub handles_acquired: u64,
    /// Handles released
    pub handles_released: u64,
    /// Artifacts currently catalogued
    pub live_artifacts: u64,
    /// Viewer open calls
    pub viewer_opens: u64,
}

impl EngineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles acquired but not yet released
    pub fn live_handles(&self) -> u64 {
        self.handles_acquired.saturating_sub(self.handles_released)
    }

    /// Fraction of submitted files that were admitted (0.0 when none seen)
    pub fn admission_rate(&self) -> f64 {
        let seen = self.files_admitted + self.files_rejected + self.allocation_failures;
        if seen > 0 {
            self.files_admitted as f64 / seen as f64
        } else {
            0.0
        }
    }
}
