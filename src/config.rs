//! Bridge configuration
//!
//! Defaults match what the simulator expects from a recording client; a YAML
//! document only needs to name the keys it overrides.
//!
//! ```rust
//! use simbridge::{BridgeConfig, RequestPeriod};
//!
//! let config = BridgeConfig::from_yaml_str("request_period: visual_frame\n").unwrap();
//! assert_eq!(config.request_period, RequestPeriod::VisualFrame);
//! assert_eq!(config.application_name, "Flight Recorder");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::fault::{DEFAULT_DISCONNECT_CODES, FaultTranslator};
use crate::types::RequestPeriod;
use crate::{BridgeError, Result};

/// Window message id the simulator posts when a message is pending
/// (`WM_USER + 2`).
pub const DEFAULT_HOST_MESSAGE_ID: u32 = 0x0402;

/// Configuration of a [`Connector`](crate::Connector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name the client registers with the simulator
    pub application_name: String,
    /// Host window message that signals a pending transport message
    pub host_message_id: u32,
    /// How often position samples are requested
    pub request_period: RequestPeriod,
    /// Pump fault codes that mean the simulator has gone away
    pub disconnect_codes: Vec<u32>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            application_name: "Flight Recorder".to_string(),
            host_message_id: DEFAULT_HOST_MESSAGE_ID,
            request_period: RequestPeriod::SimFrame,
            disconnect_codes: DEFAULT_DISCONNECT_CODES.to_vec(),
            log_filter: "info".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml)
            .map_err(|e| {
                BridgeError::config_error("invalid bridge configuration", Some(Box::new(e)))
            })
    }

    /// Load a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::config_error(format!("cannot read {}", path.display()), Some(Box::new(e)))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Fault translator using this configuration's disconnect codes.
    pub fn fault_translator(&self) -> FaultTranslator {
        FaultTranslator::new(self.disconnect_codes.iter().copied())
    }

    /// Install the global tracing subscriber with this configuration's filter.
    pub fn init_tracing(&self) {
        crate::logging::init_tracing(&self.log_filter);
    }
}
