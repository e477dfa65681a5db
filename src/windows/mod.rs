//! Win32 host message loop integration
//!
//! The simulator's client library wakes the host by posting a user message to
//! the window handle passed at initialization. The host's window procedure
//! forwards every message here; the connector claims the wake-up message and
//! pumps one transport message for it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use simbridge::windows::WM_USER_SIMCONNECT;
//!
//! // inside the window procedure
//! if connector.handle_window_message(hwnd, msg, wparam, lparam) {
//!     return LRESULT(0);
//! }
//! ```

mod host;

pub use host::WM_USER_SIMCONNECT;
