//! Numeric identifiers exchanged with the simulator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier scoping a registered telemetry field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DefinitionHandle(pub u32);

/// Identifier scoping an outstanding data request.
///
/// Allocated by the [`Correlator`](crate::Correlator); never reused within a
/// process, so a stale notification from an earlier session cannot be routed
/// to a newer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RequestHandle(pub u32);

/// Simulation object a request or command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// The user's aircraft.
    pub const USER: ObjectId = ObjectId(0);
}

/// Opaque handle of the host window that receives transport wake-up messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HostHandle(pub isize);

/// Vendor exception identifier carried by engine error notifications.
///
/// Treated as an opaque integer; no vendor meaning is attached to it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ExceptionCode(pub u32);

impl fmt::Display for DefinitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "definition #{}", self.0)
    }
}

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request #{}", self.0)
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exception {}", self.0)
    }
}
