//! Telemetry field specs and decoded records

use serde::{Deserialize, Serialize};

use super::{NumericKind, Value};

/// One entry of a telemetry definition: which simulation variable, in which
/// unit, encoded as which numeric kind.
///
/// Order matters: a definition's fields are packed on the wire in the order
/// they were registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TelemetryFieldSpec {
    /// Simulation variable name (e.g. "PLANE LATITUDE")
    pub name: String,
    /// Unit the simulator converts the value to (e.g. "Degrees")
    pub unit: String,
    /// Wire encoding of the value
    pub kind: NumericKind,
}

impl TelemetryFieldSpec {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, kind: NumericKind) -> Self {
        Self { name: name.into(), unit: unit.into(), kind }
    }

    /// Shorthand for the common `Float64` field.
    pub fn float64(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(name, unit, NumericKind::Float64)
    }
}

/// Fixed-size ordered sequence of field values, one per registered field.
///
/// Records are immutable once built; the values can only be read or taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TelemetryRecord {
    values: Vec<Value>,
}

impl TelemetryRecord {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Build a record of `Float64` values.
    pub fn from_f64s(values: impl IntoIterator<Item = f64>) -> Self {
        Self { values: values.into_iter().map(Value::Float64).collect() }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl FromIterator<Value> for TelemetryRecord {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
