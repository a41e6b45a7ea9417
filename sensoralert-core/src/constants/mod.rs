//! Constants for SensorAlert Core
//!
//! Centralized values shared by the analyzer, the producer and the
//! connectors. Anything that used to be a hard-coded literal in process glue
//! (topic names, broker defaults, thresholds) lives here.
//!
//! ## Organization
//!
//! - **Sensors**: alert thresholds, display units and synthetic value ranges
//! - **Transport**: logical destinations and broker defaults

/// Alert thresholds, units and synthetic generation ranges per sensor type.
pub mod sensors;

/// Topic names, broker defaults and channel sizing.
pub mod transport;

pub use sensors::{
    TEMPERATURE_ALERT_THRESHOLD_C, PRESSURE_ALERT_THRESHOLD_HPA,
    VIBRATION_ALERT_THRESHOLD_M_S2,
};

pub use transport::{
    SENSOR_TOPIC, ALERT_TOPIC, DEFAULT_PUBLISH_INTERVAL_SECS,
};
