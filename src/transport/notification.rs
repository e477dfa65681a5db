//! Decoded transport notifications

use serde::{Deserialize, Serialize};

use crate::types::{DefinitionHandle, ExceptionCode, ObjectId, RequestHandle, TelemetryRecord};

/// Identity of the simulator reported when the connection opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub application_name: String,
    pub version_major: u32,
    pub version_minor: u32,
}

/// One decoded message, as handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Open(EngineInfo),
    Quit,
    Exception { code: ExceptionCode, send_id: u32, index: u32 },
    Event { group: u32, event: u32, data: u32 },
    /// Structured data decoded against its registered definition.
    Data {
        request: RequestHandle,
        definition: DefinitionHandle,
        object: ObjectId,
        record: TelemetryRecord,
    },
    /// Structured data that could not be decoded.
    Malformed { request: RequestHandle, definition: DefinitionHandle, reason: String },
    SystemState { request: RequestHandle, integer: u32, float: f32, string: String },
    Unrecognized { id: u32 },
}

impl Notification {
    /// Short name of the notification kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Open(_) => "open",
            Notification::Quit => "quit",
            Notification::Exception { .. } => "exception",
            Notification::Event { .. } => "event",
            Notification::Data { .. } => "data",
            Notification::Malformed { .. } => "malformed",
            Notification::SystemState { .. } => "system_state",
            Notification::Unrecognized { .. } => "unrecognized",
        }
    }
}
