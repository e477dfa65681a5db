//! In-memory transport fed by a script

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{ConnectParams, Transport, TransportCommand, TransportMessage};
use crate::{FaultKind, TransportFault};

#[derive(Debug, Default)]
struct State {
    inbox: VecDeque<Result<TransportMessage, TransportFault>>,
    sent: Vec<TransportCommand>,
    open: bool,
    opened_with: Option<ConnectParams>,
    open_failure: Option<TransportFault>,
    send_failures: VecDeque<TransportFault>,
    close_count: usize,
}

/// Transport backed by an in-memory queue.
///
/// Clones share the same queue, so a test or replay driver can keep one clone
/// to script incoming messages and inspect written commands while a session
/// owns the other.
///
/// ```rust
/// use simbridge::transport::{MemoryTransport, TransportMessage};
///
/// let transport = MemoryTransport::new();
/// transport.push_message(TransportMessage::Quit);
/// assert_eq!(transport.pending(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Rc<RefCell<State>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the next `receive`.
    pub fn push_message(&self, message: TransportMessage) {
        self.state.borrow_mut().inbox.push_back(Ok(message));
    }

    /// Queue a fault for the next `receive`.
    pub fn push_fault(&self, fault: TransportFault) {
        self.state.borrow_mut().inbox.push_back(Err(fault));
    }

    /// Make the next `open` fail with `fault`.
    pub fn fail_next_open(&self, fault: TransportFault) {
        self.state.borrow_mut().open_failure = Some(fault);
    }

    /// Make the next `send` fail with `fault` without recording the command.
    ///
    /// Calls queue up: each failed send consumes one fault.
    pub fn fail_next_send(&self, fault: TransportFault) {
        self.state.borrow_mut().send_failures.push_back(fault);
    }

    /// Number of queued messages and faults.
    pub fn pending(&self) -> usize {
        self.state.borrow().inbox.len()
    }

    /// Every command written so far, oldest first.
    pub fn sent(&self) -> Vec<TransportCommand> {
        self.state.borrow().sent.clone()
    }

    pub fn last_sent(&self) -> Option<TransportCommand> {
        self.state.borrow().sent.last().cloned()
    }

    pub fn clear_sent(&self) {
        self.state.borrow_mut().sent.clear();
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// Parameters of the last successful `open`.
    pub fn opened_with(&self) -> Option<ConnectParams> {
        self.state.borrow().opened_with.clone()
    }

    /// How many times an open channel was closed.
    pub fn close_count(&self) -> usize {
        self.state.borrow().close_count
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self, params: &ConnectParams) -> Result<(), TransportFault> {
        let mut state = self.state.borrow_mut();
        if let Some(fault) = state.open_failure.take() {
            return Err(fault);
        }
        state.open = true;
        state.opened_with = Some(params.clone());
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<TransportMessage>, TransportFault> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return Ok(None);
        }
        state.inbox.pop_front().transpose()
    }

    fn send(&mut self, command: TransportCommand) -> Result<(), TransportFault> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return Err(TransportFault::new(FaultKind::Unreachable, 0, "channel is not open"));
        }
        if let Some(fault) = state.send_failures.pop_front() {
            return Err(fault);
        }
        state.sent.push(command);
        Ok(())
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.open {
            state.open = false;
            state.close_count += 1;
        }
    }
}
