//! Error Types for Reading Evaluation and Alert Delivery
//!
//! ## Error Categories
//!
//! Every failure a message can hit on its way through the analyzer falls into
//! one of three categories:
//!
//! ### Payload Problems
//! - `Decode`: bytes are not a JSON reading (garbage, wrong field types)
//! - `Encode`: a reading could not be turned back into JSON
//!
//! ### Policy Gaps
//! - `UnknownSensorType`: the reading names a sensor type with no threshold
//!
//! ### Transport Failures
//! - `Transport`: the broker rejected or dropped a publish
//!
//! None of them is fatal to the consume loop. Each is logged, counted, and
//! the loop moves on to the next message. There is no retry and no
//! dead-letter destination.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use sensoralert_core::{Reading, TelemetryError};
//!
//! match Reading::decode(b"not json") {
//!     Ok(reading) => {
//!         // evaluate it
//!     }
//!     Err(TelemetryError::Decode(e)) => {
//!         // log and drop the message, it is already consumed
//!         # let _ = e;
//!     }
//!     Err(other) => {
//!         # let _ = other;
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors raised while decoding, evaluating or delivering a reading
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Payload is not a valid JSON reading
    #[error("Malformed reading payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// Reading could not be serialized
    #[error("Failed to encode reading: {0}")]
    Encode(#[source] serde_json::Error),

    /// No threshold rule is registered for this sensor type
    #[error("Unknown sensor type: {0:?}")]
    UnknownSensorType(String),

    /// Broker publish failed
    #[error("Transport error: {0}")]
    Transport(String),
}

impl TelemetryError {
    /// Shorthand for wrapping any displayable transport failure
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sensor_type_display_quotes_the_name() {
        let err = TelemetryError::UnknownSensorType("humidity".into());
        assert_eq!(err.to_string(), "Unknown sensor type: \"humidity\"");
    }

    #[test]
    fn transport_helper_keeps_message() {
        let err = TelemetryError::transport("connection reset");
        assert!(matches!(err, TelemetryError::Transport(ref m) if m == "connection reset"));
    }

    #[test]
    fn decode_error_keeps_source() {
        use std::error::Error;

        let json_err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = TelemetryError::Decode(json_err);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Malformed reading payload"));
    }
}
