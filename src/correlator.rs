//! Request/response correlation
//!
//! The simulator tags every structured-data reply with the numeric id of the
//! request that asked for it. The [`Correlator`] remembers what each id was
//! issued for so replies can be routed without guessing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::{DefinitionHandle, RequestHandle};
use crate::{BridgeError, Result};

static NEXT_REQUEST: AtomicU32 = AtomicU32::new(1);

/// Allocate a request handle that has not been handed out before in this
/// process.
pub fn next_request_handle() -> RequestHandle {
    RequestHandle(NEXT_REQUEST.fetch_add(1, Ordering::Relaxed))
}

/// What a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StreamPurpose {
    /// Per-frame position of the user aircraft.
    AircraftPosition,
}

/// Meaning attached to one request handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Correlation {
    pub purpose: StreamPurpose,
    /// Definition the replies are encoded with
    pub definition: DefinitionHandle,
}

/// Lookup table from request handle to meaning.
#[derive(Debug, Clone, Default)]
pub struct Correlator {
    entries: HashMap<RequestHandle, Correlation>,
}

impl Correlator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle and register it for `purpose`.
    pub fn allocate(
        &mut self,
        purpose: StreamPurpose,
        definition: DefinitionHandle,
    ) -> RequestHandle {
        let mut handle = next_request_handle();
        // Manually registered handles may collide with the allocator.
        while self.entries.contains_key(&handle) {
            handle = next_request_handle();
        }
        self.entries.insert(handle, Correlation { purpose, definition });
        handle
    }

    /// Register a caller-chosen handle. Each handle can be registered once.
    pub fn register(&mut self, handle: RequestHandle, correlation: Correlation) -> Result<()> {
        if self.entries.contains_key(&handle) {
            return Err(BridgeError::duplicate_registration(handle.to_string()));
        }
        self.entries.insert(handle, correlation);
        Ok(())
    }

    /// Look up the meaning of a handle.
    pub fn resolve(&self, handle: RequestHandle) -> Option<Correlation> {
        self.entries.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
