//! Known sensor kinds
//!
//! Readings carry their sensor type as a free string so unknown kinds
//! survive decoding. `SensorType` is the closed set the analyzer has
//! thresholds for and the producer can simulate.

use core::fmt;
use core::str::FromStr;

use crate::constants::sensors::{PRESSURE_UNIT, TEMPERATURE_UNIT, VIBRATION_UNIT};

/// Sensor type enumeration
///
/// Maps to a threshold rule and a synthetic value range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorType {
    Temperature,
    Pressure,
    Vibration,
}

impl SensorType {
    /// Every known sensor type, in declaration order
    pub const fn all() -> [SensorType; 3] {
        [SensorType::Temperature, SensorType::Pressure, SensorType::Vibration]
    }

    /// Identifier used in the `type` field on the wire
    pub const fn name(&self) -> &'static str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Pressure => "pressure",
            SensorType::Vibration => "vibration",
        }
    }

    /// Expected unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorType::Temperature => TEMPERATURE_UNIT,
            SensorType::Pressure => PRESSURE_UNIT,
            SensorType::Vibration => VIBRATION_UNIT,
        }
    }

    /// Exact, case-sensitive lookup by wire identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensorType {
    type Err = crate::TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::TelemetryError::UnknownSensorType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in SensorType::all() {
            assert_eq!(SensorType::from_name(kind.name()), Some(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(SensorType::from_name("Temperature"), None);
        assert!("TEMPERATURE".parse::<SensorType>().is_err());
        assert_eq!("pressure".parse::<SensorType>().ok(), Some(SensorType::Pressure));
    }

    #[test]
    fn units() {
        assert_eq!(SensorType::Temperature.unit(), "°C");
        assert_eq!(SensorType::Pressure.unit(), "hPa");
        assert_eq!(SensorType::Vibration.unit(), "m/s²");
    }
}
