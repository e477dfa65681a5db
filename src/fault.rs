//! Fault classification
//!
//! Decides whether a failure ends the session or is reported and survived.

use std::collections::BTreeSet;

use crate::types::ExceptionCode;
use crate::{FaultKind, TransportFault};

/// Status raised when the simulator crashed to desktop.
pub const STATUS_SIMULATOR_CRASHED: u32 = 0xC000_014B;
/// Status raised when the simulator has exited and the pipe is gone.
pub const STATUS_SIMULATOR_EXITED: u32 = 0xC000_00B0;

/// Default set of fault codes that mean the simulator is gone.
pub const DEFAULT_DISCONNECT_CODES: [u32; 2] =
    [STATUS_SIMULATOR_CRASHED, STATUS_SIMULATOR_EXITED];

/// A failure waiting to be classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawFault<'a> {
    /// The transport failed while a message was being pumped.
    Pump(&'a TransportFault),
    /// The transport failed while a command was being written.
    Write(&'a TransportFault),
    /// The simulator sent an exception notification.
    Exception(ExceptionCode),
}

/// Outcome of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// The simulator is unreachable; the session must close.
    Disconnect,
    /// Report the code and keep the session open.
    Recoverable(ExceptionCode),
}

/// Classifies transport faults and exception notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultTranslator {
    disconnect_codes: BTreeSet<u32>,
}

impl Default for FaultTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_DISCONNECT_CODES)
    }
}

impl FaultTranslator {
    /// Create a translator treating `disconnect_codes` as fatal pump faults.
    pub fn new(disconnect_codes: impl IntoIterator<Item = u32>) -> Self {
        Self { disconnect_codes: disconnect_codes.into_iter().collect() }
    }

    pub fn is_disconnect_code(&self, code: u32) -> bool {
        self.disconnect_codes.contains(&code)
    }

    /// Classify a fault.
    ///
    /// Pump and write faults are fatal when their kind says the other end is
    /// gone or their code is a known disconnect code. Exception notifications
    /// are always recoverable.
    pub fn classify(&self, fault: RawFault<'_>) -> FaultClass {
        match fault {
            RawFault::Pump(fault) | RawFault::Write(fault) => self.classify_transport(fault),
            RawFault::Exception(code) => FaultClass::Recoverable(code),
        }
    }

    fn classify_transport(&self, fault: &TransportFault) -> FaultClass {
        match fault.kind {
            FaultKind::Unreachable | FaultKind::ProcessExited => FaultClass::Disconnect,
            _ if self.is_disconnect_code(fault.code) => FaultClass::Disconnect,
            _ => FaultClass::Recoverable(ExceptionCode(fault.code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_exit_codes_disconnect() {
        let translator = FaultTranslator::default();
        for code in DEFAULT_DISCONNECT_CODES {
            let fault = TransportFault::new(FaultKind::Io, code, "receive failed");
            assert_eq!(translator.classify(RawFault::Pump(&fault)), FaultClass::Disconnect);
        }
    }

    #[test]
    fn unreachable_kinds_disconnect_regardless_of_code() {
        let translator = FaultTranslator::default();
        let unreachable = TransportFault::new(FaultKind::Unreachable, 1, "gone");
        let exited = TransportFault::new(FaultKind::ProcessExited, 2, "gone");

        assert_eq!(translator.classify(RawFault::Pump(&unreachable)), FaultClass::Disconnect);
        assert_eq!(translator.classify(RawFault::Pump(&exited)), FaultClass::Disconnect);
    }

    #[test]
    fn other_pump_faults_are_recoverable() {
        let translator = FaultTranslator::default();
        let fault = TransportFault::new(FaultKind::Protocol, 0x8000_FFFF, "bad packet");

        assert_eq!(
            translator.classify(RawFault::Pump(&fault)),
            FaultClass::Recoverable(ExceptionCode(0x8000_FFFF))
        );
    }

    #[test]
    fn write_faults_follow_pump_rules() {
        let translator = FaultTranslator::default();
        let exited = TransportFault::new(FaultKind::Io, STATUS_SIMULATOR_EXITED, "send failed");
        let busy = TransportFault::new(FaultKind::Io, 0x8000_0001, "send failed");

        assert_eq!(translator.classify(RawFault::Write(&exited)), FaultClass::Disconnect);
        assert_eq!(
            translator.classify(RawFault::Write(&busy)),
            FaultClass::Recoverable(ExceptionCode(0x8000_0001))
        );
    }

    #[test]
    fn exceptions_are_always_recoverable() {
        let translator = FaultTranslator::new([7]);
        assert_eq!(
            translator.classify(RawFault::Exception(ExceptionCode(7))),
            FaultClass::Recoverable(ExceptionCode(7))
        );
    }

    #[test]
    fn custom_codes_replace_defaults() {
        let translator = FaultTranslator::new([0xDEAD]);
        assert!(translator.is_disconnect_code(0xDEAD));
        assert!(!translator.is_disconnect_code(STATUS_SIMULATOR_EXITED));
    }
}
