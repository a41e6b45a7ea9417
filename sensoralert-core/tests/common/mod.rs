//! Common fixtures for sensoralert-core integration tests
//!
//! This module provides:
//! - Canonical reading payloads for each sensor type
//! - Malformed payloads the decoder must reject
//! - Loosely written payloads the decoder must still accept
//! - A fixed clock so generated readings are deterministic

#![allow(dead_code)]

use sensoralert_core::time::FixedTime;
use sensoralert_core::Reading;

// ===== FIXTURE CONSTANTS =====

/// Timestamp stamped on every fixture reading.
pub const FIXTURE_TIMESTAMP: &str = "2024-05-01T10:00:00-03:00";

/// Location label used by fixture readings.
pub const FIXTURE_PLACE: &str = "salaX";

/// Logical alert destination.
pub const ALERTS: &str = "alerts";

/// Build a reading with the fixture timestamp and place
pub fn reading(sensor_type: &str, value: f64) -> Reading {
    Reading::new(value, sensor_type, FIXTURE_TIMESTAMP, FIXTURE_PLACE)
}

/// Encode a fixture reading to its wire form
pub fn payload(sensor_type: &str, value: f64) -> Vec<u8> {
    serde_json::to_vec(&reading(sensor_type, value)).expect("fixture readings always encode")
}

/// Payloads that must decode to `DecodeError`
pub fn malformed_payloads() -> Vec<Vec<u8>> {
    vec![
        b"definitely not json".to_vec(),
        b"{\"value\":".to_vec(),
        br#"{"value":"51.0","type":"temperature"}"#.to_vec(),
        br#"{"value":51.0,"type":42}"#.to_vec(),
        br#"[{"value":51.0,"type":"temperature"}]"#.to_vec(),
        vec![0xff, 0xfe, 0x00],
    ]
}

/// Temperature alerts with repeated or differently cased keys
pub fn loose_alert_payloads() -> Vec<Vec<u8>> {
    vec![
        br#"{"value":10,"value":60,"type":"temperature"}"#.to_vec(),
        br#"{"Value":60,"Type":"temperature","Place":"x"}"#.to_vec(),
        br#"{"VALUE":20,"type":"pressure","Value":61,"TYPE":"temperature"}"#.to_vec(),
    ]
}

pub fn fixed_clock() -> FixedTime {
    FixedTime::parse(FIXTURE_TIMESTAMP).expect("fixture timestamp is RFC 3339")
}
