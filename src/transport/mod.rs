//! Transport channel to the simulator.
//!
//! The channel is modelled as two layers:
//!
//! - [`Transport`] is the raw wire: open it, pull the next pending
//!   [`TransportMessage`] without blocking, push [`TransportCommand`]s, close
//!   it. Implementations wrap the vendor client library, or, like
//!   [`MemoryTransport`], a script.
//! - [`TransportSession`] owns a transport for the lifetime of one session,
//!   enforces the [`SessionState`](crate::SessionState) machine, keeps the
//!   schema registry and decodes raw messages into [`Notification`]s.
//!
//! The simulator only delivers messages when the host's message loop asks for
//! them, so nothing in this module ever waits for a message to arrive.

mod memory;
mod notification;
mod session;

pub use memory::MemoryTransport;
pub use notification::{EngineInfo, Notification};
pub use session::{ConnectParams, TransportSession};

use serde::{Deserialize, Serialize};

use crate::TransportFault;
use crate::types::{
    ClientEvent, DefinitionHandle, ObjectId, RequestHandle, RequestPeriod, TelemetryFieldSpec,
};

/// Trait for the raw channel to a simulator.
///
/// All methods are called from the thread that owns the host message loop.
pub trait Transport {
    /// Establish the channel.
    fn open(&mut self, params: &ConnectParams) -> Result<(), TransportFault>;

    /// Take the next pending message, if any.
    ///
    /// Returns:
    /// - `Ok(Some(message))` - one message was pending
    /// - `Ok(None)` - nothing pending; must return immediately
    /// - `Err(fault)` - the channel failed while receiving
    fn receive(&mut self) -> Result<Option<TransportMessage>, TransportFault>;

    /// Send one command. Fire-and-forget: the simulator never acknowledges,
    /// it may only report an exception later.
    fn send(&mut self, command: TransportCommand) -> Result<(), TransportFault>;

    /// Release the channel. Calling it more than once is harmless.
    fn close(&mut self);
}

/// Raw message as delivered by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportMessage {
    /// Connection accepted.
    Open { application_name: String, version_major: u32, version_minor: u32 },
    /// The simulator is shutting down.
    Quit,
    /// The simulator rejected an earlier command.
    Exception { code: u32, send_id: u32, index: u32 },
    /// A subscribed simulator event fired.
    Event { group: u32, event: u32, data: u32 },
    /// Packed values for a data request.
    SimObjectData {
        request: RequestHandle,
        definition: DefinitionHandle,
        object: ObjectId,
        payload: Vec<u8>,
    },
    /// Reply to a system state request.
    SystemState { request: RequestHandle, integer: u32, float: f32, string: String },
    /// Any message kind this crate does not handle.
    Other { id: u32 },
}

/// Command written to the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportCommand {
    /// Append one field to a data definition.
    AddToDefinition { definition: DefinitionHandle, field: TelemetryFieldSpec },
    /// Start (or stop) periodic data for a definition.
    RequestData {
        request: RequestHandle,
        definition: DefinitionHandle,
        object: ObjectId,
        period: RequestPeriod,
    },
    /// Map a client event id onto a named simulator event.
    MapClientEvent { event: ClientEvent, sim_event: String },
    /// Fire a mapped event at an object, in the generic group with priority.
    TransmitEvent { object: ObjectId, event: ClientEvent, data: u32 },
    /// Overwrite an object's state with a packed record.
    SetData { definition: DefinitionHandle, object: ObjectId, payload: Vec<u8> },
}
