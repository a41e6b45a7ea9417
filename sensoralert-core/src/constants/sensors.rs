//! Sensor Thresholds and Synthetic Ranges
//!
//! Alert thresholds are compared with strict `>`: a reading exactly at the
//! threshold is normal.

// ===== TEMPERATURE =====

/// Temperature above which a reading is an alert (°C).
pub const TEMPERATURE_ALERT_THRESHOLD_C: f64 = 50.0;

/// Display unit for temperature readings.
pub const TEMPERATURE_UNIT: &str = "°C";

/// Synthetic temperature range, lower bound inclusive (°C).
///
/// The range straddles the alert threshold so roughly half of the
/// generated readings alert.
pub const TEMPERATURE_SYNTHETIC_MIN_C: f64 = 45.0;

/// Synthetic temperature range, upper bound exclusive (°C).
pub const TEMPERATURE_SYNTHETIC_MAX_C: f64 = 55.0;

// ===== PRESSURE =====

/// Pressure above which a reading is an alert (hPa).
pub const PRESSURE_ALERT_THRESHOLD_HPA: f64 = 1050.0;

/// Display unit for pressure readings.
pub const PRESSURE_UNIT: &str = "hPa";

/// Synthetic pressure range, lower bound inclusive (hPa).
pub const PRESSURE_SYNTHETIC_MIN_HPA: f64 = 900.0;

/// Synthetic pressure range, upper bound exclusive (hPa).
pub const PRESSURE_SYNTHETIC_MAX_HPA: f64 = 1100.0;

// ===== VIBRATION =====

/// Vibration above which a reading is an alert (m/s²).
pub const VIBRATION_ALERT_THRESHOLD_M_S2: f64 = 3.0;

/// Display unit for vibration readings.
pub const VIBRATION_UNIT: &str = "m/s²";

/// Synthetic vibration range, lower bound inclusive (m/s²).
pub const VIBRATION_SYNTHETIC_MIN_M_S2: f64 = 0.0;

/// Synthetic vibration range, upper bound exclusive (m/s²).
pub const VIBRATION_SYNTHETIC_MAX_M_S2: f64 = 5.0;
