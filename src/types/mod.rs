//! Core value types shared by every layer of the bridge.
//!
//! ## Architecture
//!
//! The types map directly onto what travels over the transport channel:
//! - [`TelemetryFieldSpec`] names one simulation variable with its unit and
//!   [`NumericKind`]; an ordered list of them forms a definition
//! - [`TelemetryRecord`] is one decoded sample of a definition, one [`Value`]
//!   per field in registration order
//! - [`DefinitionHandle`], [`RequestHandle`] and [`ObjectId`] are the numeric
//!   identifiers the simulator uses to correlate requests and replies
//! - [`SessionState`] tracks the lifecycle of one connection
//!
//! ## Usage Example
//!
//! ```rust
//! use simbridge::types::{NumericKind, TelemetryFieldSpec, TelemetryRecord, Value};
//!
//! let fields = vec![
//!     TelemetryFieldSpec::float64("PLANE ALTITUDE", "Feet"),
//!     TelemetryFieldSpec::new("SIMULATION RATE", "number", NumericKind::Int32),
//! ];
//! let record = TelemetryRecord::new(vec![Value::Float64(3500.0), Value::Int32(1)]);
//!
//! assert_eq!(record.len(), fields.len());
//! assert_eq!(record.get(0).map(|v| v.as_f64()), Some(3500.0));
//! ```

mod handles;
mod record;
mod request_period;
mod session_state;
mod value;

// Re-export all public types
pub use handles::{DefinitionHandle, ExceptionCode, HostHandle, ObjectId, RequestHandle};
pub use record::{TelemetryFieldSpec, TelemetryRecord};
pub use request_period::RequestPeriod;
pub use session_state::{ClientEvent, SessionState};
pub use value::{NumericKind, Value};
