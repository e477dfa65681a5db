//! Transport session: lifecycle, schema registration and message decoding

use tracing::{debug, info, trace};

use super::{EngineInfo, Notification, Transport, TransportCommand, TransportMessage};
use crate::schema::{Definition, SchemaRegistry};
use crate::types::{DefinitionHandle, ExceptionCode, HostHandle, SessionState, TelemetryFieldSpec};
use crate::{BridgeError, Result};

/// Parameters passed to [`Transport::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Name the client identifies itself with
    pub application_name: String,
    /// Window that receives wake-up messages
    pub host: HostHandle,
    /// Message id posted to `host` when a message is pending
    pub message_id: u32,
}

/// Exclusive owner of one transport for the lifetime of a session.
pub struct TransportSession<T: Transport> {
    transport: T,
    state: SessionState,
    registry: SchemaRegistry,
}

impl<T: Transport> TransportSession<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, state: SessionState::Uninitialized, registry: SchemaRegistry::new() }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get a registered definition.
    pub fn definition(&self, handle: DefinitionHandle) -> Option<&Definition> {
        self.registry.get(handle)
    }

    /// Open the channel. Allowed once per session.
    ///
    /// On failure the session moves straight to `Closed`.
    pub fn open(&mut self, params: &ConnectParams) -> Result<()> {
        match self.state {
            SessionState::Uninitialized => {}
            SessionState::Open => return Err(BridgeError::AlreadyInitialized),
            SessionState::Closed => return Err(BridgeError::SessionClosed),
        }

        trace!(application = %params.application_name, "Opening transport channel");
        match self.transport.open(params) {
            Ok(()) => {
                self.state = SessionState::Open;
                debug!("Transport channel open");
                Ok(())
            }
            Err(fault) => {
                self.state = SessionState::Closed;
                Err(BridgeError::connection_failed_with_source("transport open failed", fault))
            }
        }
    }

    /// Register a definition locally and announce each field to the simulator.
    pub fn register_definition(
        &mut self,
        handle: DefinitionHandle,
        fields: Vec<TelemetryFieldSpec>,
    ) -> Result<()> {
        self.ensure_open()?;

        let commands: Vec<TransportCommand> = self
            .registry
            .register(handle, fields)?
            .fields()
            .iter()
            .map(|field| TransportCommand::AddToDefinition {
                definition: handle,
                field: field.clone(),
            })
            .collect();

        debug!(definition = handle.0, fields = commands.len(), "Registering data definition");
        for command in commands {
            self.transport.send(command)?;
        }
        Ok(())
    }

    /// Process at most one pending message.
    ///
    /// Returns `Ok(None)` immediately when nothing is pending.
    pub fn pump_once(&mut self) -> Result<Option<Notification>> {
        self.ensure_open()?;

        match self.transport.receive()? {
            Some(message) => Ok(Some(self.decode(message))),
            None => Ok(None),
        }
    }

    /// Send one command.
    pub fn write(&mut self, command: TransportCommand) -> Result<()> {
        self.ensure_open()?;
        trace!(?command, "Writing command");
        self.transport.send(command)?;
        Ok(())
    }

    /// Release the channel. Idempotent.
    pub fn close(&mut self) {
        if self.state == SessionState::Open {
            self.transport.close();
            info!("Transport channel closed");
        }
        self.state = SessionState::Closed;
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Uninitialized => Err(BridgeError::NotInitialized),
            SessionState::Closed => Err(BridgeError::SessionClosed),
        }
    }

    fn decode(&self, message: TransportMessage) -> Notification {
        match message {
            TransportMessage::Open { application_name, version_major, version_minor } => {
                Notification::Open(EngineInfo { application_name, version_major, version_minor })
            }
            TransportMessage::Quit => Notification::Quit,
            TransportMessage::Exception { code, send_id, index } => {
                Notification::Exception { code: ExceptionCode(code), send_id, index }
            }
            TransportMessage::Event { group, event, data } => {
                Notification::Event { group, event, data }
            }
            TransportMessage::SimObjectData { request, definition, object, payload } => {
                let Some(registered) = self.registry.get(definition) else {
                    return Notification::Malformed {
                        request,
                        definition,
                        reason: format!("{} is not registered", definition),
                    };
                };
                match registered.decode(&payload) {
                    Ok(record) => Notification::Data { request, definition, object, record },
                    Err(e) => {
                        Notification::Malformed { request, definition, reason: e.to_string() }
                    }
                }
            }
            TransportMessage::SystemState { request, integer, float, string } => {
                Notification::SystemState { request, integer, float, string }
            }
            TransportMessage::Other { id } => Notification::Unrecognized { id },
        }
    }
}

impl<T: Transport> Drop for TransportSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use crate::types::{ObjectId, RequestHandle, TelemetryRecord};
    use crate::{FaultKind, TransportFault};

    fn params() -> ConnectParams {
        ConnectParams {
            application_name: "Flight Recorder".to_string(),
            host: HostHandle(42),
            message_id: 0x0402,
        }
    }

    fn open_session() -> (TransportSession<MemoryTransport>, MemoryTransport) {
        let transport = MemoryTransport::new();
        let mut session = TransportSession::new(transport.clone());
        session.open(&params()).expect("open should succeed");
        (session, transport)
    }

    #[test]
    fn open_transitions_to_open_once() {
        let (mut session, transport) = open_session();
        assert_eq!(session.state(), SessionState::Open);
        assert_eq!(transport.opened_with(), Some(params()));

        assert!(matches!(session.open(&params()), Err(BridgeError::AlreadyInitialized)));
    }

    #[test]
    fn failed_open_closes_session() {
        let transport = MemoryTransport::new();
        transport
            .fail_next_open(TransportFault::new(FaultKind::Unreachable, 0x8000_4005, "no sim"));
        let mut session = TransportSession::new(transport.clone());

        let err = session.open(&params()).unwrap_err();
        assert!(matches!(err, BridgeError::Connection { source: Some(_), .. }));
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(session.pump_once(), Err(BridgeError::SessionClosed)));
    }

    #[test]
    fn operations_before_open_fail() {
        let transport = MemoryTransport::new();
        let mut session = TransportSession::new(transport.clone());

        assert!(matches!(session.pump_once(), Err(BridgeError::NotInitialized)));
        assert!(matches!(
            session.write(TransportCommand::TransmitEvent {
                object: ObjectId::USER,
                event: crate::types::ClientEvent::Pause,
                data: 0,
            }),
            Err(BridgeError::NotInitialized)
        ));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn pump_with_nothing_pending_is_a_no_op() {
        let (mut session, transport) = open_session();
        assert_eq!(session.pump_once().unwrap(), None);
        assert_eq!(session.state(), SessionState::Open);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn registration_sends_one_write_per_field_in_order() {
        let (mut session, transport) = open_session();
        let fields = vec![
            TelemetryFieldSpec::float64("PLANE LATITUDE", "Degrees"),
            TelemetryFieldSpec::float64("PLANE LONGITUDE", "Degrees"),
        ];
        session.register_definition(DefinitionHandle(4), fields.clone()).unwrap();

        let sent = transport.sent();
        assert_eq!(
            sent,
            fields
                .into_iter()
                .map(|field| TransportCommand::AddToDefinition {
                    definition: DefinitionHandle(4),
                    field,
                })
                .collect::<Vec<_>>()
        );
        assert!(session.definition(DefinitionHandle(4)).is_some());
    }

    #[test]
    fn data_is_decoded_against_registered_definition() {
        let (mut session, transport) = open_session();
        let fields = vec![TelemetryFieldSpec::float64("A", "Feet")];
        session.register_definition(DefinitionHandle(1), fields).unwrap();

        transport.push_message(TransportMessage::SimObjectData {
            request: RequestHandle(9),
            definition: DefinitionHandle(1),
            object: ObjectId::USER,
            payload: 12.5f64.to_le_bytes().to_vec(),
        });
        transport.push_message(TransportMessage::SimObjectData {
            request: RequestHandle(9),
            definition: DefinitionHandle(1),
            object: ObjectId::USER,
            payload: vec![1, 2, 3],
        });
        transport.push_message(TransportMessage::SimObjectData {
            request: RequestHandle(9),
            definition: DefinitionHandle(5),
            object: ObjectId::USER,
            payload: Vec::new(),
        });

        assert_eq!(
            session.pump_once().unwrap(),
            Some(Notification::Data {
                request: RequestHandle(9),
                definition: DefinitionHandle(1),
                object: ObjectId::USER,
                record: TelemetryRecord::from_f64s([12.5]),
            })
        );
        assert!(matches!(session.pump_once().unwrap(), Some(Notification::Malformed { .. })));
        assert!(matches!(session.pump_once().unwrap(), Some(Notification::Malformed { .. })));
    }

    #[test]
    fn receive_fault_surfaces_as_transport_fault() {
        let (mut session, transport) = open_session();
        transport.push_fault(TransportFault::new(FaultKind::Io, 7, "read failed"));

        let err = session.pump_once().unwrap_err();
        assert!(matches!(err, BridgeError::TransportFault(TransportFault { code: 7, .. })));
        assert_eq!(session.state(), SessionState::Open);
    }

    #[test]
    fn close_is_idempotent_and_releases_channel() {
        let (mut session, transport) = open_session();
        session.close();
        session.close();

        assert_eq!(session.state(), SessionState::Closed);
        assert!(!transport.is_open());
        assert_eq!(transport.close_count(), 1);
    }

    #[test]
    fn dropping_open_session_closes_transport() {
        let (session, transport) = open_session();
        drop(session);
        assert!(!transport.is_open());
    }
}
