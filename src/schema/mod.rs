//! Telemetry definition registry and record codec.
//!
//! A definition is an ordered list of [`TelemetryFieldSpec`]s registered
//! against the simulator under a [`DefinitionHandle`]. The simulator packs the
//! values of a definition back to back, little-endian, in registration order;
//! [`Definition::decode`] and [`Definition::encode`] convert between that
//! layout and a [`TelemetryRecord`].
//!
//! Field names cannot be checked locally. An unknown simulation variable is
//! only reported by the simulator, later, as an exception notification.

mod aircraft;

pub use aircraft::{AIRCRAFT_POSITION_DEFINITION, AircraftPosition, aircraft_position_fields};

use std::collections::BTreeMap;

use crate::types::{DefinitionHandle, TelemetryFieldSpec, TelemetryRecord, Value};
use crate::{BridgeError, Result};

/// A registered field list with its precomputed record size.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    handle: DefinitionHandle,
    fields: Vec<TelemetryFieldSpec>,
    record_size: usize,
}

impl Definition {
    fn new(handle: DefinitionHandle, fields: Vec<TelemetryFieldSpec>) -> Self {
        let record_size = fields.iter().map(|f| f.kind.size()).sum();
        Self { handle, fields, record_size }
    }

    pub fn handle(&self) -> DefinitionHandle {
        self.handle
    }

    pub fn fields(&self) -> &[TelemetryFieldSpec] {
        &self.fields
    }

    /// Size in bytes of one encoded record.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Decode a packed payload into a record with one value per field.
    pub fn decode(&self, payload: &[u8]) -> Result<TelemetryRecord> {
        if payload.len() != self.record_size {
            return Err(BridgeError::schema_mismatch(
                self.handle,
                format!("payload is {} bytes, expected {}", payload.len(), self.record_size),
            ));
        }

        let mut offset = 0;
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = Value::read_le(field.kind, &payload[offset..]).ok_or_else(|| {
                let details = format!("field '{}' truncated", field.name);
                BridgeError::schema_mismatch(self.handle, details)
            })?;
            values.push(value);
            offset += field.kind.size();
        }

        Ok(TelemetryRecord::new(values))
    }

    /// Encode a record into the packed layout of this definition.
    ///
    /// The record must have exactly one value per field, each of the field's
    /// numeric kind.
    pub fn encode(&self, record: &TelemetryRecord) -> Result<Vec<u8>> {
        if record.len() != self.fields.len() {
            return Err(BridgeError::schema_mismatch(
                self.handle,
                format!("record has {} values, expected {}", record.len(), self.fields.len()),
            ));
        }

        let mut payload = Vec::with_capacity(self.record_size);
        for (field, value) in self.fields.iter().zip(record.values()) {
            if value.kind() != field.kind {
                return Err(BridgeError::schema_mismatch(
                    self.handle,
                    format!("field '{}' is {:?}, got {:?}", field.name, field.kind, value.kind()),
                ));
            }
            value.write_le(&mut payload);
        }

        Ok(payload)
    }
}

/// All definitions registered in one session.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    definitions: BTreeMap<DefinitionHandle, Definition>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field list under `handle`.
    ///
    /// Each handle may be registered once; the field list must not be empty.
    pub fn register(
        &mut self,
        handle: DefinitionHandle,
        fields: Vec<TelemetryFieldSpec>,
    ) -> Result<&Definition> {
        if fields.is_empty() {
            return Err(BridgeError::invalid_argument("fields", "definition has no fields"));
        }
        if self.definitions.contains_key(&handle) {
            return Err(BridgeError::duplicate_registration(handle.to_string()));
        }

        Ok(self.definitions.entry(handle).or_insert_with(|| Definition::new(handle, fields)))
    }

    /// Get a definition by handle.
    pub fn get(&self, handle: DefinitionHandle) -> Option<&Definition> {
        self.definitions.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
