//! How often the simulator sends data for a request

use serde::{Deserialize, Serialize};

/// Period of a data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum RequestPeriod {
    /// Stop sending data for the request
    Never,
    /// Send once
    Once,
    /// Every rendered frame
    VisualFrame,
    /// Every simulation frame, whether rendered or not
    #[default]
    SimFrame,
    /// Once per second
    Second,
}
