//! Window message adapter for the connector

use tracing::trace;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::WM_USER;

use crate::event::EventSink;
use crate::transport::Transport;
use crate::types::HostHandle;
use crate::Connector;

/// User message the simulator posts when a transport message is pending.
pub const WM_USER_SIMCONNECT: u32 = WM_USER + 2;

impl From<HWND> for HostHandle {
    fn from(hwnd: HWND) -> Self {
        HostHandle(hwnd.0 as isize)
    }
}

impl<T: Transport, S: EventSink> Connector<T, S> {
    /// Offer a window message to the connector.
    ///
    /// Returns `true` when the message was the transport's wake-up message and
    /// has been handled.
    pub fn handle_window_message(
        &mut self,
        hwnd: HWND,
        message: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> bool {
        trace!(
            hwnd = hwnd.0 as isize,
            message,
            wparam = wparam.0,
            lparam = lparam.0,
            "Window message"
        );
        self.handle_host_message(message)
    }
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HOST_MESSAGE_ID;
    use crate::transport::{MemoryTransport, TransportMessage};
    use crate::{BridgeEvent, SessionState};

    #[test]
    fn wake_up_message_matches_default_config() {
        assert_eq!(WM_USER_SIMCONNECT, 0x0402);
        assert_eq!(WM_USER_SIMCONNECT, DEFAULT_HOST_MESSAGE_ID);
    }

    #[test]
    fn window_messages_route_to_connector() {
        let transport = MemoryTransport::new();
        let mut connector = Connector::new(transport.clone(), Vec::new());
        connector.initialize(HostHandle::from(HWND::default())).unwrap();
        transport.push_message(TransportMessage::Quit);

        let hwnd = HWND::default();
        assert!(!connector.handle_window_message(hwnd, WM_USER, WPARAM(0), LPARAM(0)));
        assert!(connector.handle_window_message(hwnd, WM_USER_SIMCONNECT, WPARAM(0), LPARAM(0)));

        assert_eq!(connector.state(), SessionState::Closed);
        assert_eq!(connector.sink().last(), Some(&BridgeEvent::Closed));
    }
}
