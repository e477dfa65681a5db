//! Error types for the simulator bridge.
//!
//! Every fallible operation in this crate returns [`BridgeError`]. Errors fall
//! into two groups:
//!
//! - **Session errors** raised by the transport: [`BridgeError::Connection`]
//!   when the channel cannot be opened, and [`BridgeError::TransportFault`]
//!   when a message cannot be received or a command cannot be sent.
//! - **Contract violations** detected locally before anything is written:
//!   [`BridgeError::SchemaMismatch`], [`BridgeError::SessionClosed`],
//!   [`BridgeError::InvalidArgument`] and friends. These are returned to the
//!   caller of the offending operation and never forwarded as domain events.
//!
//! ```rust
//! use simbridge::{BridgeError, FaultKind, TransportFault};
//!
//! let fault = TransportFault::new(FaultKind::ProcessExited, 0xC000_00B0, "pipe closed");
//! let error = BridgeError::connection_failed_with_source("simulator not running", fault);
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::fmt;
use thiserror::Error;

use crate::types::DefinitionHandle;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for bridge operations.
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("Failed to connect to the simulator: {reason}")]
    Connection {
        reason: String,
        #[source]
        source: Option<TransportFault>,
    },

    #[error("Transport fault: {0}")]
    TransportFault(#[from] TransportFault),

    #[error("Record does not match definition {definition}: {details}")]
    SchemaMismatch { definition: DefinitionHandle, details: String },

    #[error("Session is closed")]
    SessionClosed,

    #[error("Session has not been initialized")]
    NotInitialized,

    #[error("Session has already been initialized")]
    AlreadyInitialized,

    #[error("Invalid argument '{name}': {details}")]
    InvalidArgument { name: String, details: String },

    #[error("Duplicate registration of {what}")]
    DuplicateRegistration { what: String },

    #[error("Configuration error: {context}")]
    Config {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BridgeError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            BridgeError::Connection { .. } => true,
            BridgeError::TransportFault(fault) => fault.kind.is_transient(),
            BridgeError::SchemaMismatch { .. } => false,
            BridgeError::SessionClosed => false,
            BridgeError::NotInitialized => false,
            BridgeError::AlreadyInitialized => false,
            BridgeError::InvalidArgument { .. } => false,
            BridgeError::DuplicateRegistration { .. } => false,
            BridgeError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            BridgeError::Connection { .. } => vec![
                "Ensure the simulator is running",
                "Check that the host window handle is valid",
                "Try initializing a new session",
            ],
            BridgeError::TransportFault(_) => vec![
                "Check whether the simulator is still responding",
                "Construct a new session if the simulator has exited",
            ],
            BridgeError::SchemaMismatch { .. } => vec![
                "Build records from the registered field list",
                "Check field count and numeric kinds against the definition",
            ],
            BridgeError::SessionClosed => {
                vec![
                    "Construct a new session and initialize it",
                    "Stop issuing commands after Closed",
                ]
            }
            BridgeError::NotInitialized => {
                vec!["Call initialize before pumping or sending commands"]
            }
            BridgeError::AlreadyInitialized => {
                vec!["Initialize each session exactly once", "Construct a new session instead"]
            }
            BridgeError::InvalidArgument { .. } => vec![
                "Check the documented range of the argument",
                "Clamp control inputs before sending them",
            ],
            BridgeError::DuplicateRegistration { .. } => vec![
                "Register each definition and request handle once per session",
                "Use a fresh handle for each stream",
            ],
            BridgeError::Config { .. } => vec![
                "Check the configuration file exists and is readable",
                "Verify the YAML keys and value types",
            ],
        }
    }

    /// Helper constructor for connection errors.
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        BridgeError::Connection { reason: reason.into(), source: None }
    }

    /// Helper constructor for connection errors caused by a transport fault.
    pub fn connection_failed_with_source(
        reason: impl Into<String>,
        source: TransportFault,
    ) -> Self {
        BridgeError::Connection { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for schema mismatch errors.
    pub fn schema_mismatch(definition: DefinitionHandle, details: impl Into<String>) -> Self {
        BridgeError::SchemaMismatch { definition, details: details.into() }
    }

    /// Helper constructor for invalid argument errors.
    pub fn invalid_argument(name: impl Into<String>, details: impl Into<String>) -> Self {
        BridgeError::InvalidArgument { name: name.into(), details: details.into() }
    }

    /// Helper constructor for duplicate registration errors.
    pub fn duplicate_registration(what: impl Into<String>) -> Self {
        BridgeError::DuplicateRegistration { what: what.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(
        context: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        BridgeError::Config { context: context.into(), source }
    }
}

/// Broad category of a raw transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Reading or writing the channel failed.
    Io,
    /// The channel delivered something that could not be understood.
    Protocol,
    /// The other end of the channel can no longer be reached.
    Unreachable,
    /// The simulator process has terminated.
    ProcessExited,
}

impl FaultKind {
    /// Whether the fault can clear up on its own.
    pub fn is_transient(self) -> bool {
        matches!(self, FaultKind::Io | FaultKind::Protocol)
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::Io => "I/O",
            FaultKind::Protocol => "protocol",
            FaultKind::Unreachable => "unreachable",
            FaultKind::ProcessExited => "process-exited",
        };
        f.write_str(name)
    }
}

/// Raw failure reported by a [`Transport`](crate::transport::Transport).
///
/// `code` is the platform status code (an HRESULT or NTSTATUS on Windows) and
/// is kept opaque; the [`FaultTranslator`](crate::FaultTranslator) decides what
/// it means for the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} fault {code:#010x}: {message}")]
pub struct TransportFault {
    pub kind: FaultKind,
    pub code: u32,
    pub message: String,
}

impl TransportFault {
    pub fn new(kind: FaultKind, code: u32, message: impl Into<String>) -> Self {
        Self { kind, code, message: message.into() }
    }
}

#[cfg(windows)]
impl From<core::Error> for TransportFault {
    fn from(err: core::Error) -> Self {
        TransportFault { kind: FaultKind::Io, code: err.code().0 as u32, message: err.message() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_format_correctly_with_arbitrary_context(
            reason in ".*",
            name in "\\w+",
            details in ".*",
            code in any::<u32>(),
            definition in any::<u32>()
          ) {
            let connection_msg = BridgeError::connection_failed(reason.clone()).to_string();
            prop_assert!(connection_msg.contains(&reason));

            let argument_msg =
                BridgeError::invalid_argument(name.clone(), details.clone()).to_string();
            prop_assert!(argument_msg.contains(&name));
            prop_assert!(argument_msg.contains(&details));

            let handle = DefinitionHandle(definition);
            let mismatch_msg = BridgeError::schema_mismatch(handle, details.clone()).to_string();
            prop_assert!(mismatch_msg.contains(&definition.to_string()));

            let fault = TransportFault::new(FaultKind::Io, code, details.clone());
            let fault_msg = BridgeError::from(fault).to_string();
            let code_hex = format!("{:#010x}", code);
            prop_assert!(fault_msg.contains(&code_hex));
          }
        }
    }

    #[test]
    fn connection_error_chains_transport_fault() {
        let fault = TransportFault::new(FaultKind::Unreachable, 0x8000_4005, "no pipe");
        let error = BridgeError::connection_failed_with_source("open failed", fault.clone());

        let source = std::error::Error::source(&error).expect("fault should be the source");
        assert_eq!(source.to_string(), fault.to_string());
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<BridgeError>();
        assert_send_sync_static::<TransportFault>();
    }

    #[test]
    fn recovery_methods_work() {
        let connection_error = BridgeError::connection_failed("test");
        let closed_error = BridgeError::SessionClosed;
        let transient = BridgeError::from(TransportFault::new(FaultKind::Io, 1, "busy"));
        let fatal = BridgeError::from(TransportFault::new(FaultKind::ProcessExited, 2, "gone"));

        assert!(connection_error.is_retryable());
        assert!(!closed_error.is_retryable());
        assert!(transient.is_retryable());
        assert!(!fatal.is_retryable());

        for suggestion in connection_error.recovery_suggestions() {
            assert!(suggestion.len() > 5);
        }
        assert!(!closed_error.recovery_suggestions().is_empty());
    }
}
