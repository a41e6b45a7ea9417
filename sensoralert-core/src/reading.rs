//! Sensor reading and its JSON wire format
//!
//! ```json
//! {"value": 51.3, "type": "temperature", "timestamp": "2024-05-01T10:00:00-03:00", "place": "salaX"}
//! ```
//!
//! Decoding is lenient about shape and strict about types:
//!
//! - keys match their field exactly, or failing that case-insensitively
//!   (`"Value"`, `"TYPE"`)
//! - a repeated key overwrites the earlier one; the last occurrence wins
//! - unknown keys are ignored
//! - missing fields keep their zero value and `null` leaves a field untouched
//! - a field of the wrong JSON type (say `"value": "hot"`) fails the payload
//!
//! A bare `null` document decodes to an all-zero reading. The timestamp is an
//! opaque string and is never parsed.

use core::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{TelemetryError, TelemetryResult};
use crate::sensor::SensorType;

/// One decoded sensor sample
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reading {
    /// Measurement magnitude, in the unit of the sensor type
    pub value: f64,

    /// Sensor type identifier, kept verbatim even when unknown
    #[serde(rename = "type")]
    pub sensor_type: String,

    /// Producer-assigned RFC 3339 timestamp
    pub timestamp: String,

    /// Free-text location label
    pub place: String,
}

impl Reading {
    pub fn new(
        value: f64,
        sensor_type: impl Into<String>,
        timestamp: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        Self {
            value,
            sensor_type: sensor_type.into(),
            timestamp: timestamp.into(),
            place: place.into(),
        }
    }

    /// Decode a reading from raw message bytes
    pub fn decode(raw: &[u8]) -> TelemetryResult<Self> {
        serde_json::from_slice(raw).map_err(TelemetryError::Decode)
    }

    /// Encode the reading with the same field set it was decoded from
    pub fn encode(&self) -> TelemetryResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(TelemetryError::Encode)
    }

    /// Known sensor kind, if the type string names one
    pub fn kind(&self) -> Option<SensorType> {
        SensorType::from_name(&self.sensor_type)
    }
}

/// Wire fields, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Value,
    SensorType,
    Timestamp,
    Place,
}

impl Field {
    const WIRE_NAMES: [(Field, &'static str); 4] = [
        (Field::Value, "value"),
        (Field::SensorType, "type"),
        (Field::Timestamp, "timestamp"),
        (Field::Place, "place"),
    ];

    /// Exact match first, then ASCII case-insensitive
    fn resolve(key: &str) -> Option<Field> {
        Self::WIRE_NAMES
            .iter()
            .find(|(_, name)| *name == key)
            .or_else(|| Self::WIRE_NAMES.iter().find(|(_, name)| name.eq_ignore_ascii_case(key)))
            .map(|(field, _)| *field)
    }
}

impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ReadingVisitor)
    }
}

struct ReadingVisitor;

impl<'de> Visitor<'de> for ReadingVisitor {
    type Value = Reading;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sensor reading object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Reading, E> {
        Ok(Reading::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Reading, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut reading = Reading::default();

        while let Some(key) = map.next_key::<String>()? {
            match Field::resolve(&key) {
                Some(Field::Value) => {
                    if let Some(value) = map.next_value::<Option<f64>>()? {
                        reading.value = value;
                    }
                }
                Some(Field::SensorType) => overwrite(&mut reading.sensor_type, map.next_value()?),
                Some(Field::Timestamp) => overwrite(&mut reading.timestamp, map.next_value()?),
                Some(Field::Place) => overwrite(&mut reading.place, map.next_value()?),
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(reading)
    }
}

fn overwrite(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}
