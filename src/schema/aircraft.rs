//! Aircraft position definition streamed every simulation frame

use serde::{Deserialize, Serialize};

use crate::types::{DefinitionHandle, TelemetryFieldSpec, TelemetryRecord, Value};
use crate::{BridgeError, Result};

/// Handle the aircraft position definition is registered under.
pub const AIRCRAFT_POSITION_DEFINITION: DefinitionHandle = DefinitionHandle(0);

// Declares the struct, the ordered field table and both conversions from a
// single list so the three can never disagree on order.
macro_rules! aircraft_position {
    ($($field:ident => ($name:literal, $unit:literal)),+ $(,)?) => {
        /// Typed view of one aircraft position record.
        ///
        /// Field order is the wire order of [`aircraft_position_fields`].
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[cfg_attr(feature = "tauri", derive(specta::Type))]
        pub struct AircraftPosition {
            $(pub $field: f64,)+
        }

        const FIELDS: &[(&str, &str)] = &[$(($name, $unit)),+];

        impl AircraftPosition {
            /// Number of fields in the definition.
            pub const FIELD_COUNT: usize = FIELDS.len();

            fn to_values(self) -> Vec<Value> {
                vec![$(Value::Float64(self.$field)),+]
            }

            fn from_values(values: &[Value]) -> Result<Self> {
                let mut iter = values.iter();
                Ok(Self {
                    $($field: float_value(iter.next(), $name)?,)+
                })
            }
        }
    };
}

aircraft_position! {
    latitude => ("PLANE LATITUDE", "Degrees"),
    longitude => ("PLANE LONGITUDE", "Degrees"),
    altitude => ("PLANE ALTITUDE", "Feet"),

    pitch => ("PLANE PITCH DEGREES", "Degrees"),
    bank => ("PLANE BANK DEGREES", "Degrees"),
    heading_true => ("PLANE HEADING DEGREES TRUE", "Degrees"),
    heading_magnetic => ("PLANE HEADING DEGREES MAGNETIC", "Degrees"),

    velocity_body_x => ("VELOCITY BODY X", "Feet per second"),
    velocity_body_y => ("VELOCITY BODY Y", "Feet per second"),
    velocity_body_z => ("VELOCITY BODY Z", "Feet per second"),
    rotation_velocity_body_x => ("ROTATION VELOCITY BODY X", "radians per second"),
    rotation_velocity_body_y => ("ROTATION VELOCITY BODY Y", "radians per second"),
    rotation_velocity_body_z => ("ROTATION VELOCITY BODY Z", "radians per second"),

    aileron_position => ("AILERON POSITION", "Position"),
    elevator_position => ("ELEVATOR POSITION", "Position"),
    rudder_position => ("RUDDER POSITION", "Position"),

    elevator_trim_position => ("ELEVATOR TRIM POSITION", "Radians"),

    trailing_edge_flaps_left_percent => ("TRAILING EDGE FLAPS LEFT PERCENT", "Position"),
    trailing_edge_flaps_right_percent => ("TRAILING EDGE FLAPS RIGHT PERCENT", "Position"),
    leading_edge_flaps_left_percent => ("LEADING EDGE FLAPS LEFT PERCENT", "Position"),
    leading_edge_flaps_right_percent => ("LEADING EDGE FLAPS RIGHT PERCENT", "Position"),

    throttle_lever_position1 => ("GENERAL ENG THROTTLE LEVER POSITION:1", "Position"),
    throttle_lever_position2 => ("GENERAL ENG THROTTLE LEVER POSITION:2", "Position"),
    throttle_lever_position3 => ("GENERAL ENG THROTTLE LEVER POSITION:3", "Position"),
    throttle_lever_position4 => ("GENERAL ENG THROTTLE LEVER POSITION:4", "Position"),

    brake_left_position => ("BRAKE LEFT POSITION", "Position"),
    brake_right_position => ("BRAKE RIGHT POSITION", "Position"),
}

/// Ordered field list of the aircraft position definition.
pub fn aircraft_position_fields() -> Vec<TelemetryFieldSpec> {
    FIELDS.iter().map(|(name, unit)| TelemetryFieldSpec::float64(*name, *unit)).collect()
}

fn float_value(value: Option<&Value>, name: &str) -> Result<f64> {
    match value {
        Some(Value::Float64(v)) => Ok(*v),
        Some(other) => Err(BridgeError::schema_mismatch(
            AIRCRAFT_POSITION_DEFINITION,
            format!("field '{}' is {:?}, expected Float64", name, other.kind()),
        )),
        None => Err(BridgeError::schema_mismatch(
            AIRCRAFT_POSITION_DEFINITION,
            format!("field '{}' missing", name),
        )),
    }
}

impl TryFrom<&TelemetryRecord> for AircraftPosition {
    type Error = BridgeError;

    fn try_from(record: &TelemetryRecord) -> Result<Self> {
        if record.len() != Self::FIELD_COUNT {
            return Err(BridgeError::schema_mismatch(
                AIRCRAFT_POSITION_DEFINITION,
                format!("record has {} values, expected {}", record.len(), Self::FIELD_COUNT),
            ));
        }
        Self::from_values(record.values())
    }
}

impl From<AircraftPosition> for TelemetryRecord {
    fn from(position: AircraftPosition) -> Self {
        TelemetryRecord::new(position.to_values())
    }
}
