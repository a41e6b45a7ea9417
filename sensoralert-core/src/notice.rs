//! Human-readable alert text
//!
//! ```text
//! ALERT
//! Type: temperature
//! Place: salaX
//! Value: 51.27 °C
//! Time: 2024-05-01T10:00:00-03:00
//! ```
//!
//! Lines for empty fields are left out. The unit is appended only when the
//! sensor type is known.

use core::fmt;

use crate::reading::Reading;
use crate::sensor::SensorType;

/// Title line of every notice
pub const NOTICE_TITLE: &str = "ALERT";

/// Rendered view of an alert reading
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotice {
    sensor_type: String,
    place: String,
    value: String,
    timestamp: String,
}

impl AlertNotice {
    pub fn from_reading(reading: &Reading) -> Self {
        let value = match SensorType::from_name(&reading.sensor_type) {
            Some(kind) => format!("{:.2} {}", reading.value, kind.unit()),
            None => format!("{:.2}", reading.value),
        };

        Self {
            sensor_type: reading.sensor_type.clone(),
            place: reading.place.clone(),
            value,
            timestamp: reading.timestamp.clone(),
        }
    }

    /// Value with two decimals and unit, e.g. `1100.00 hPa`
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Single-line form for log output
    pub fn summary(&self) -> String {
        self.to_string().replace('\n', " | ")
    }
}

impl fmt::Display for AlertNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NOTICE_TITLE)?;
        if !self.sensor_type.is_empty() {
            write!(f, "\nType: {}", self.sensor_type)?;
        }
        if !self.place.is_empty() {
            write!(f, "\nPlace: {}", self.place)?;
        }
        write!(f, "\nValue: {}", self.value)?;
        if !self.timestamp.is_empty() {
            write!(f, "\nTime: {}", self.timestamp)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_notice() {
        let reading = Reading::new(51.271, "temperature", "2024-05-01T10:00:00-03:00", "salaX");
        let notice = AlertNotice::from_reading(&reading);

        assert_eq!(
            notice.to_string(),
            "ALERT\nType: temperature\nPlace: salaX\nValue: 51.27 °C\nTime: 2024-05-01T10:00:00-03:00"
        );
    }

    #[test]
    fn empty_fields_are_omitted() {
        let notice = AlertNotice::from_reading(&Reading::new(1100.0, "pressure", "", ""));
        assert_eq!(notice.to_string(), "ALERT\nType: pressure\nValue: 1100.00 hPa");
        assert_eq!(notice.summary(), "ALERT | Type: pressure | Value: 1100.00 hPa");
    }

    #[test]
    fn unknown_type_has_no_unit() {
        let notice = AlertNotice::from_reading(&Reading::new(7.5, "flow", "", "line 2"));
        assert_eq!(notice.value(), "7.50");
    }
}
