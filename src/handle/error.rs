//! Handle allocation errors

/// Error returned when the manager refuses to allocate another handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationError {
    /// Number of live handles at the time of the refusal
    pub live: usize,
    /// Configured handle capacity
    pub capacity: usize,
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Handle allocation refused: {} of {} handles in use",
            self.live, self.capacity
        )
    }
}

impl std::error::Error for AllocationError {}
