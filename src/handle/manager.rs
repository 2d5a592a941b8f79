//! Handle manager implementation

use std::collections::HashMap;

use bytes::Bytes;

use super::error::AllocationError;

/// Opaque reference to a payload held by a [`HandleManager`]
///
/// Cheap to copy. A `HandleRef` stays comparable after release, but it can
/// no longer be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleRef(u64);

impl HandleRef {
    /// Raw handle number
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for HandleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

/// Allocates and revokes payload handles
pub struct HandleManager {
    /// Live handles and the payload each one addresses
    live: HashMap<HandleRef, Bytes>,

    /// Next handle number to hand out (never reused)
    next_id: u64,

    /// Maximum number of live handles (0 = unlimited)
    capacity: usize,

    /// Address scheme used by [`HandleManager::address`]
    scheme: String,

    acquired_total: u64,
    released_total: u64,
}

impl HandleManager {
    /// Create a manager with no handle limit
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a manager that refuses allocations beyond `capacity` live handles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: HashMap::new(),
            next_id: 1,
            capacity,
            scheme: "blob".to_string(),
            acquired_total: 0,
            released_total: 0,
        }
    }

    /// Set the scheme prefix for rendered addresses
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Allocate a handle addressing `payload`
    ///
    /// The payload is reference counted, so the manager shares the caller's
    /// allocation instead of copying it.
    pub fn acquire(&mut self, payload: Bytes) -> Result<HandleRef, AllocationError> {
        if self.capacity > 0 && self.live.len() >= self.capacity {
            tracing::warn!(
                live = self.live.len(),
                capacity = self.capacity,
                "Handle allocation refused"
            );
            return Err(AllocationError {
                live: self.live.len(),
                capacity: self.capacity,
            });
        }

        let handle = HandleRef(self.next_id);
        self.next_id += 1;

        tracing::debug!(handle = %handle, bytes = payload.len(), "Handle acquired");

        self.live.insert(handle, payload);
        self.acquired_total += 1;
        Ok(handle)
    }

    /// Invalidate a handle
    ///
    /// Returns `true` if the handle was live. Releasing an already released
    /// (or never issued) handle is a no-op and returns `false`.
    pub fn release(&mut self, handle: HandleRef) -> bool {
        if self.live.remove(&handle).is_some() {
            self.released_total += 1;
            tracing::debug!(handle = %handle, "Handle released");
            true
        } else {
            tracing::debug!(handle = %handle, "Release of dead handle ignored");
            false
        }
    }

    /// Check whether a handle is still live
    pub fn is_live(&self, handle: HandleRef) -> bool {
        self.live.contains_key(&handle)
    }

    /// Get the payload behind a live handle
    ///
    /// # Panics
    ///
    /// Panics if the handle has been released. Dereferencing a dead handle
    /// is a bug in the caller.
    pub fn resolve(&self, handle: HandleRef) -> Bytes {
        match self.live.get(&handle) {
            Some(payload) => payload.clone(),
            None => panic!("dereferenced released handle {}", handle),
        }
    }

    /// Render the address a viewer uses to display the payload
    pub fn address(&self, handle: HandleRef) -> String {
        format!("{}:{}", self.scheme, handle.0)
    }

    /// Number of live handles
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total handles ever acquired
    pub fn acquired_total(&self) -> u64 {
        self.acquired_total
    }

    /// Total handles ever released
    pub fn released_total(&self) -> u64 {
        self.released_total
    }
}

impl Default for HandleManager {
    fn default() -> Self {
        Self::new()
    }
}
