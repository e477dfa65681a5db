//! Session lifecycle and client event vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one transport session.
///
/// `Uninitialized -> Open -> Closed`; there is no way out of `Closed`, a new
/// session has to be constructed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SessionState {
    #[default]
    Uninitialized,
    Open,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Open => "open",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Client-side events mapped onto simulator events at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ClientEvent {
    Pause,
    Unpause,
    LeftBrakeSet,
    RightBrakeSet,
}

impl ClientEvent {
    /// Every client event, in mapping order.
    pub const ALL: [ClientEvent; 4] = [
        ClientEvent::Pause,
        ClientEvent::Unpause,
        ClientEvent::LeftBrakeSet,
        ClientEvent::RightBrakeSet,
    ];

    /// Numeric id the event is mapped under.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Name of the simulator event this client event maps to.
    pub const fn sim_event_name(self) -> &'static str {
        match self {
            ClientEvent::Pause => "PAUSE_ON",
            ClientEvent::Unpause => "PAUSE_OFF",
            ClientEvent::LeftBrakeSet => "AXIS_LEFT_BRAKE_SET",
            ClientEvent::RightBrakeSet => "AXIS_RIGHT_BRAKE_SET",
        }
    }
}
