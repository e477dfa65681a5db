//! Message-pump telemetry bridge between a flight simulator and a recording
//! application.
//!
//! The simulator talks over a single transport channel that multiplexes
//! connection-open, quit, exception, event and structured-data notifications.
//! The bridge registers a telemetry definition, streams the user aircraft's
//! position every simulation frame, sends control commands back, and turns
//! transport failures into domain events.
//!
//! # Features
//!
//! - **Pull-based pump**: the host message loop calls in; nothing blocks and
//!   no threads are spawned
//! - **Ordered events**: every event is emitted before
//!   [`Connector::pump_once`] returns, in transport order
//! - **Typed schema**: definitions are ordered [`TelemetryFieldSpec`] lists
//!   with a checked record codec
//! - **Fault classification**: fatal transport faults close the session,
//!   everything else is reported and survived
//!
//! # Quick Start
//!
//! ```rust
//! use simbridge::transport::{MemoryTransport, TransportMessage};
//! use simbridge::{BridgeEvent, Connector, HostHandle, SessionState};
//!
//! let transport = MemoryTransport::new();
//! let mut connector = Connector::new(transport.clone(), Vec::new());
//! connector.initialize(HostHandle::default())?;
//!
//! transport.push_message(TransportMessage::Quit);
//! while connector.state() == SessionState::Open {
//!     connector.pump_once()?;
//! }
//!
//! assert_eq!(connector.sink(), &vec![BridgeEvent::Initialized, BridgeEvent::Closed]);
//! # Ok::<(), simbridge::BridgeError>(())
//! ```

// Core types and error handling
mod error;
pub mod types;

// Ambient configuration and diagnostics
pub mod config;
pub mod logging;

// Schema, transport and routing
pub mod connector;
pub mod correlator;
pub mod event;
pub mod fault;
pub mod schema;
pub mod transport;

// Platform-specific modules
#[cfg(windows)]
pub mod windows;

// Core exports
pub use error::*;
pub use types::*;

// Main API exports
pub use config::BridgeConfig;
pub use connector::{Connector, PumpStatus};
pub use correlator::{Correlation, Correlator, StreamPurpose};
pub use event::{BridgeEvent, EventSink, EventStream, event_channel, sink_fn};
pub use fault::{FaultClass, FaultTranslator, RawFault};
pub use schema::{AircraftPosition, Definition, SchemaRegistry};
pub use transport::{MemoryTransport, Transport, TransportSession};

/// Unified entry point for simulator connections.
///
/// ```rust
/// use simbridge::{HostHandle, MemoryTransport, SimBridge};
///
/// let connector = SimBridge::connect(MemoryTransport::new(), HostHandle::default(), Vec::new())?;
/// assert_eq!(connector.sink().len(), 1);
/// # Ok::<(), simbridge::BridgeError>(())
/// ```
pub struct SimBridge;

impl SimBridge {
    /// Create and initialize a connector with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transport cannot be opened
    /// - The position definition or stream request cannot be written
    pub fn connect<T: Transport, S: EventSink>(
        transport: T,
        host: HostHandle,
        sink: S,
    ) -> Result<Connector<T, S>> {
        Self::connect_with_config(transport, host, sink, BridgeConfig::default())
    }

    /// Create and initialize a connector with an explicit configuration.
    pub fn connect_with_config<T: Transport, S: EventSink>(
        transport: T,
        host: HostHandle,
        sink: S,
        config: BridgeConfig,
    ) -> Result<Connector<T, S>> {
        let mut connector = Connector::with_config(transport, sink, config);
        connector.initialize(host)?;
        Ok(connector)
    }
}
