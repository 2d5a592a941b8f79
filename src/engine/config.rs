//! Engine configuration

/// Distribution engine configuration options
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum live payload handles (0 = unlimited)
    pub max_handles: usize,

    /// Capacity of the change-notification channel
    ///
    /// Observers that fall further behind than this miss events and see a
    /// `Lagged` error on their next receive.
    pub event_capacity: usize,

    /// Scheme prefix for rendered handle addresses
    pub handle_scheme: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_handles: 0, // Unlimited
            event_capacity: 256,
            handle_scheme: "blob".to_string(),
        }
    }
}

impl EngineConfig {
    /// Set maximum live handles
    pub fn max_handles(mut self, max: usize) -> Self {
        self.max_handles = max;
        self
    }

    /// Set event channel capacity (at least 1)
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Set the handle address scheme
    pub fn handle_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.handle_scheme = scheme.into();
        self
    }
}
