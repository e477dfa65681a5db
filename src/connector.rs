//! Event dispatcher between the transport session and the consumer.
//!
//! The [`Connector`] is the public face of the bridge. It drives a
//! [`TransportSession`], routes every decoded notification to a handler, turns
//! the recognised ones into [`BridgeEvent`]s and translates control calls into
//! transport writes.
//!
//! Session lifecycle:
//!
//! ```text
//! Uninitialized --initialize()--> Open --quit | fatal fault | shutdown()--> Closed
//! ```
//!
//! A `Closed` event is emitted exactly once, on whichever transition reaches
//! `Closed` first (including a failed `initialize`). After that every
//! operation fails with [`BridgeError::SessionClosed`] without touching the
//! transport.

use tracing::{debug, error, info, trace, warn};

use crate::config::BridgeConfig;
use crate::correlator::{Correlator, StreamPurpose};
use crate::event::{BridgeEvent, EventSink};
use crate::fault::{FaultClass, FaultTranslator, RawFault};
use crate::schema::{AIRCRAFT_POSITION_DEFINITION, aircraft_position_fields};
use crate::transport::{
    ConnectParams, EngineInfo, Notification, Transport, TransportCommand, TransportSession,
};
use crate::types::{
    ClientEvent, HostHandle, ObjectId, RequestHandle, SessionState, TelemetryRecord,
};
use crate::{BridgeError, Result};

/// Full deflection of an axis event.
const AXIS_MAX: f64 = 16384.0;

/// What a call to [`Connector::pump_once`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// No message was pending.
    Idle,
    /// One message or recoverable fault was processed.
    Processed,
    /// The session closed while pumping.
    Disconnected,
}

/// Bridge between a simulator transport and a consumer's event sink.
pub struct Connector<T: Transport, S: EventSink> {
    session: TransportSession<T>,
    correlator: Correlator,
    faults: FaultTranslator,
    sink: S,
    config: BridgeConfig,
    position_request: Option<RequestHandle>,
    engine: Option<EngineInfo>,
    closed_emitted: bool,
}

impl<T: Transport, S: EventSink> Connector<T, S> {
    /// Create an uninitialized connector with the default configuration.
    pub fn new(transport: T, sink: S) -> Self {
        Self::with_config(transport, sink, BridgeConfig::default())
    }

    pub fn with_config(transport: T, sink: S, config: BridgeConfig) -> Self {
        Self {
            session: TransportSession::new(transport),
            correlator: Correlator::new(),
            faults: config.fault_translator(),
            sink,
            config,
            position_request: None,
            engine: None,
            closed_emitted: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Simulator identity, once the open notification has arrived.
    pub fn engine_info(&self) -> Option<&EngineInfo> {
        self.engine.as_ref()
    }

    /// Request handle of the aircraft position stream.
    pub fn position_request(&self) -> Option<RequestHandle> {
        self.position_request
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Open the session and start the aircraft position stream.
    ///
    /// Registers the position definition, maps the client events, requests
    /// position data at the configured period and emits `Initialized`. If any
    /// step fails the session is closed, `Closed` is emitted and the error
    /// returned.
    pub fn initialize(&mut self, host: HostHandle) -> Result<()> {
        match self.session.state() {
            SessionState::Uninitialized => {}
            SessionState::Open => return Err(BridgeError::AlreadyInitialized),
            SessionState::Closed => return Err(BridgeError::SessionClosed),
        }

        let params = ConnectParams {
            application_name: self.config.application_name.clone(),
            host,
            message_id: self.config.host_message_id,
        };

        if let Err(e) = self.session.open(&params).and_then(|()| self.start_streams()) {
            error!(error = %e, "Cannot initialize simulator connection");
            self.terminate();
            return Err(e);
        }

        info!(application = %self.config.application_name, "Simulator connection initialized");
        self.sink.emit(BridgeEvent::Initialized);
        Ok(())
    }

    fn start_streams(&mut self) -> Result<()> {
        self.session.register_definition(AIRCRAFT_POSITION_DEFINITION, aircraft_position_fields())?;

        for event in ClientEvent::ALL {
            self.session.write(TransportCommand::MapClientEvent {
                event,
                sim_event: event.sim_event_name().to_string(),
            })?;
        }

        let request =
            self.correlator.allocate(StreamPurpose::AircraftPosition, AIRCRAFT_POSITION_DEFINITION);
        self.session.write(TransportCommand::RequestData {
            request,
            definition: AIRCRAFT_POSITION_DEFINITION,
            object: ObjectId::USER,
            period: self.config.request_period,
        })?;
        self.position_request = Some(request);

        debug!(
            request = request.0,
            period = ?self.config.request_period,
            "Requested aircraft position"
        );
        Ok(())
    }

    /// Process at most one pending transport message.
    ///
    /// Never blocks. Events caused by the message are emitted before this
    /// returns. Transport faults are classified rather than returned: fatal
    /// ones close the session (`Disconnected`), others are emitted as
    /// `EngineError`.
    pub fn pump_once(&mut self) -> Result<PumpStatus> {
        match self.session.pump_once() {
            Ok(None) => Ok(PumpStatus::Idle),
            Ok(Some(notification)) => {
                self.dispatch(notification);
                Ok(self.status_after_processing())
            }
            Err(BridgeError::TransportFault(fault)) => {
                match self.faults.classify(RawFault::Pump(&fault)) {
                    FaultClass::Disconnect => {
                        error!(%fault, "Cannot receive simulator message");
                        self.terminate();
                        Ok(PumpStatus::Disconnected)
                    }
                    FaultClass::Recoverable(code) => {
                        error!(%fault, "Recoverable transport fault");
                        self.sink.emit(BridgeEvent::EngineError(code));
                        Ok(PumpStatus::Processed)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Entry point for the host message loop.
    ///
    /// Returns `true` when `message_id` is the transport's wake-up message and
    /// a message was pumped for it; the host should then stop offering the
    /// message to other handlers.
    pub fn handle_host_message(&mut self, message_id: u32) -> bool {
        if message_id != self.config.host_message_id {
            trace!(message = message_id, "Unknown message type");
            return false;
        }

        match self.pump_once() {
            Ok(status) => {
                trace!(?status, "Host message pumped");
                true
            }
            Err(e) => {
                debug!(error = %e, "Host message left for other handlers");
                false
            }
        }
    }

    /// Pause the simulation.
    pub fn pause(&mut self) -> Result<()> {
        self.transmit(ClientEvent::Pause, 0)
    }

    /// Resume the simulation.
    pub fn unpause(&mut self) -> Result<()> {
        self.transmit(ClientEvent::Unpause, 0)
    }

    /// Set the left brake, `amount` in `[0, 1]`.
    pub fn set_left_brake(&mut self, amount: f64) -> Result<()> {
        self.session.ensure_open()?;
        let data = axis_value("amount", amount)?;
        self.transmit(ClientEvent::LeftBrakeSet, data)
    }

    /// Set the right brake, `amount` in `[0, 1]`.
    pub fn set_right_brake(&mut self, amount: f64) -> Result<()> {
        self.session.ensure_open()?;
        let data = axis_value("amount", amount)?;
        self.transmit(ClientEvent::RightBrakeSet, data)
    }

    /// Overwrite the user aircraft's position.
    ///
    /// `record` must match the registered position definition field for
    /// field, otherwise the call fails with `SchemaMismatch` and nothing is
    /// written.
    pub fn set_position(&mut self, record: &TelemetryRecord) -> Result<()> {
        self.session.ensure_open()?;
        let definition = self
            .session
            .definition(AIRCRAFT_POSITION_DEFINITION)
            .ok_or(BridgeError::NotInitialized)?;
        let payload = definition.encode(record)?;

        self.write(TransportCommand::SetData {
            definition: AIRCRAFT_POSITION_DEFINITION,
            object: ObjectId::USER,
            payload,
        })
    }

    /// Close the session. Emits `Closed` unless the session already closed.
    pub fn shutdown(&mut self) {
        info!("Shutting down simulator connection");
        self.terminate();
    }

    fn transmit(&mut self, event: ClientEvent, data: u32) -> Result<()> {
        self.write(TransportCommand::TransmitEvent { object: ObjectId::USER, event, data })
    }

    /// Write one command. A fault meaning the simulator is gone closes the
    /// session before the fault is returned.
    fn write(&mut self, command: TransportCommand) -> Result<()> {
        match self.session.write(command) {
            Err(BridgeError::TransportFault(fault)) => {
                match self.faults.classify(RawFault::Write(&fault)) {
                    FaultClass::Disconnect => {
                        error!(%fault, "Cannot send command to simulator");
                        self.terminate();
                    }
                    FaultClass::Recoverable(_) => warn!(%fault, "Command not delivered"),
                }
                Err(BridgeError::TransportFault(fault))
            }
            result => result,
        }
    }

    fn status_after_processing(&self) -> PumpStatus {
        if self.session.state() == SessionState::Closed {
            PumpStatus::Disconnected
        } else {
            PumpStatus::Processed
        }
    }

    fn dispatch(&mut self, notification: Notification) {
        trace!(kind = notification.kind(), "Dispatching notification");
        match notification {
            Notification::Open(engine) => {
                info!(
                    application = %engine.application_name,
                    version = %format!("{}.{}", engine.version_major, engine.version_minor),
                    "Connected to simulator"
                );
                self.engine = Some(engine);
            }
            Notification::Quit => {
                info!("Simulator has exited");
                self.terminate();
            }
            Notification::Exception { code, send_id, index } => {
                error!(code = code.0, send_id, index, "Simulator error received");
                match self.faults.classify(RawFault::Exception(code)) {
                    FaultClass::Recoverable(code) => self.sink.emit(BridgeEvent::EngineError(code)),
                    FaultClass::Disconnect => self.terminate(),
                }
            }
            Notification::Event { group, event, data } => {
                debug!(group, event, data, "Simulator event received");
            }
            Notification::Data { request, definition, record, .. } => {
                match self.correlator.resolve(request) {
                    Some(correlation) if correlation.definition != definition => {
                        warn!(
                            request = request.0,
                            expected = correlation.definition.0,
                            actual = definition.0,
                            "Data arrived with unexpected definition"
                        );
                    }
                    Some(correlation) => match correlation.purpose {
                        StreamPurpose::AircraftPosition => {
                            trace!("Aircraft position updated");
                            self.sink.emit(BridgeEvent::PositionUpdated(record));
                        }
                    },
                    None => trace!(request = request.0, "Data for unknown request dropped"),
                }
            }
            Notification::Malformed { request, definition, reason } => {
                if self.correlator.resolve(request).is_some() {
                    warn!(
                        request = request.0,
                        definition = definition.0,
                        %reason,
                        "Undecodable data dropped"
                    );
                } else {
                    trace!(request = request.0, "Data for unknown request dropped");
                }
            }
            Notification::SystemState { request, integer, float, string } => {
                debug!(
                    request = request.0,
                    integer,
                    float = f64::from(float),
                    %string,
                    "System state received"
                );
            }
            Notification::Unrecognized { id } => {
                debug!(id, "Unrecognized notification dropped");
            }
        }
    }

    fn terminate(&mut self) {
        self.session.close();
        if !self.closed_emitted {
            self.closed_emitted = true;
            self.sink.emit(BridgeEvent::Closed);
        }
    }
}

/// Scale a `[0, 1]` control input to the simulator's axis range.
fn axis_value(name: &str, amount: f64) -> Result<u32> {
    // NaN fails the range check too.
    if !(0.0..=1.0).contains(&amount) {
        return Err(BridgeError::invalid_argument(name, format!("{} is outside [0, 1]", amount)));
    }
    Ok((amount * AXIS_MAX) as u32)
}
