//! Numeric kinds and their little-endian wire encoding

use serde::{Deserialize, Serialize};

/// Numeric data types a telemetry field can be registered with.
/// Maps to the simulator's data type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum NumericKind {
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
}

impl NumericKind {
    /// Returns the size in bytes of this data type.
    pub const fn size(&self) -> usize {
        match self {
            NumericKind::Int32 | NumericKind::Float32 => 4,
            NumericKind::Int64 | NumericKind::Float64 => 8,
        }
    }
}

/// One numeric field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl Value {
    /// The numeric kind this value encodes as.
    pub fn kind(&self) -> NumericKind {
        match self {
            Value::Int32(_) => NumericKind::Int32,
            Value::Int64(_) => NumericKind::Int64,
            Value::Float32(_) => NumericKind::Float32,
            Value::Float64(_) => NumericKind::Float64,
        }
    }

    /// Widen to `f64`. Large `Int64` values lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int32(v) => v as f64,
            Value::Int64(v) => v as f64,
            Value::Float32(v) => v as f64,
            Value::Float64(v) => v,
        }
    }

    /// Parse a value of `kind` from the start of `bytes`.
    ///
    /// Returns `None` when fewer than `kind.size()` bytes are available.
    pub fn read_le(kind: NumericKind, bytes: &[u8]) -> Option<Self> {
        let value = match kind {
            NumericKind::Int32 => {
                Value::Int32(i32::from_le_bytes(bytes.get(..4)?.try_into().ok()?))
            }
            NumericKind::Int64 => {
                Value::Int64(i64::from_le_bytes(bytes.get(..8)?.try_into().ok()?))
            }
            NumericKind::Float32 => {
                Value::Float32(f32::from_le_bytes(bytes.get(..4)?.try_into().ok()?))
            }
            NumericKind::Float64 => {
                Value::Float64(f64::from_le_bytes(bytes.get(..8)?.try_into().ok()?))
            }
        };
        Some(value)
    }

    /// Append the little-endian encoding of this value.
    pub fn write_le(&self, out: &mut Vec<u8>) {
        match *self {
            Value::Int32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Value::Int64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Value::Float32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Value::Float64(v) => out.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_wire_widths() {
        assert_eq!(NumericKind::Int32.size(), 4);
        assert_eq!(NumericKind::Float32.size(), 4);
        assert_eq!(NumericKind::Int64.size(), 8);
        assert_eq!(NumericKind::Float64.size(), 8);
    }

    #[test]
    fn write_le_emits_kind_size_bytes() {
        let samples =
            [Value::Int32(-7), Value::Int64(1 << 40), Value::Float32(0.5), Value::Float64(-2.25)];
        for value in samples {
            let mut out = Vec::new();
            value.write_le(&mut out);
            assert_eq!(out.len(), value.kind().size());
            assert_eq!(Value::read_le(value.kind(), &out), Some(value));
        }
    }

    #[test]
    fn read_le_rejects_short_input() {
        assert_eq!(Value::read_le(NumericKind::Float64, &[0u8; 7]), None);
        assert_eq!(Value::read_le(NumericKind::Int32, &[]), None);
    }

    #[test]
    fn known_float_bit_pattern() {
        // 4500.0 as little-endian f32
        let bytes = [0x00, 0xA0, 0x8C, 0x45];
        assert_eq!(Value::read_le(NumericKind::Float32, &bytes), Some(Value::Float32(4500.0)));
    }
}
