//! Threshold policy: sensor type → unit, cutoff and comparison
//!
//! The policy is built once at startup and never changes. The standard
//! table is:
//!
//! | type        | unit | threshold | alert when     |
//! |-------------|------|-----------|----------------|
//! | temperature | °C   | 50        | value > 50     |
//! | pressure    | hPa  | 1050      | value > 1050   |
//! | vibration   | m/s² | 3.0       | value > 3.0    |
//!
//! ```rust
//! use sensoralert_core::ThresholdPolicy;
//!
//! let policy = ThresholdPolicy::standard();
//! let rule = policy.lookup("pressure").unwrap();
//! assert_eq!(rule.unit(), "hPa");
//! assert!(rule.breached_by(1100.0));
//! assert!(policy.lookup("humidity").is_none());
//! ```

use std::collections::HashMap;

use crate::constants::sensors::{
    PRESSURE_ALERT_THRESHOLD_HPA, TEMPERATURE_ALERT_THRESHOLD_C, VIBRATION_ALERT_THRESHOLD_M_S2,
};
use crate::sensor::SensorType;

/// How a reading is compared against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `value > threshold`; equality never alerts
    GreaterThan,
}

impl Comparator {
    /// Apply the comparison. NaN never satisfies it.
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparator::GreaterThan => value > threshold,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Comparator::GreaterThan => ">",
        }
    }
}

/// Unit, cutoff and comparison for one sensor type
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    unit: String,
    threshold: f64,
    comparator: Comparator,
}

impl ThresholdRule {
    /// Rule alerting when a value is strictly greater than `threshold`
    pub fn greater_than(unit: impl Into<String>, threshold: f64) -> Self {
        Self {
            unit: unit.into(),
            threshold,
            comparator: Comparator::GreaterThan,
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Whether `value` crosses this rule's threshold
    pub fn breached_by(&self, value: f64) -> bool {
        self.comparator.holds(value, self.threshold)
    }
}

/// Immutable mapping from sensor type identifier to threshold rule
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    rules: HashMap<String, ThresholdRule>,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl ThresholdPolicy {
    /// The fixed temperature / pressure / vibration table
    pub fn standard() -> Self {
        Self::from_rules(SensorType::all().into_iter().map(|kind| {
            let threshold = match kind {
                SensorType::Temperature => TEMPERATURE_ALERT_THRESHOLD_C,
                SensorType::Pressure => PRESSURE_ALERT_THRESHOLD_HPA,
                SensorType::Vibration => VIBRATION_ALERT_THRESHOLD_M_S2,
            };
            (kind.name().to_string(), ThresholdRule::greater_than(kind.unit(), threshold))
        }))
    }

    /// Build a policy from arbitrary `(sensor_type, rule)` pairs.
    ///
    /// A later pair for the same sensor type replaces an earlier one.
    pub fn from_rules<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, ThresholdRule)>,
        K: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(|(k, rule)| (k.into(), rule)).collect(),
        }
    }

    /// Rule for `sensor_type`, or `None` when the type is unknown.
    ///
    /// Matching is exact and case-sensitive.
    pub fn lookup(&self, sensor_type: &str) -> Option<&ThresholdRule> {
        self.rules.get(sensor_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules sorted by sensor type
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThresholdRule)> {
        let mut entries: Vec<_> = self.rules.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table() {
        let policy = ThresholdPolicy::standard();
        assert_eq!(policy.len(), 3);

        let temperature = policy.lookup("temperature").unwrap();
        assert_eq!(temperature.unit(), "°C");
        assert_eq!(temperature.threshold(), 50.0);
        assert_eq!(temperature.comparator(), Comparator::GreaterThan);

        let pressure = policy.lookup("pressure").unwrap();
        assert_eq!(pressure.unit(), "hPa");
        assert_eq!(pressure.threshold(), 1050.0);

        let vibration = policy.lookup("vibration").unwrap();
        assert_eq!(vibration.unit(), "m/s²");
        assert_eq!(vibration.threshold(), 3.0);
    }

    #[test]
    fn unknown_types_are_not_found() {
        let policy = ThresholdPolicy::default();
        assert!(policy.lookup("unknown_sensor").is_none());
        assert!(policy.lookup("").is_none());
        assert!(policy.lookup("Temperature").is_none());
    }

    #[test]
    fn greater_than_is_strict() {
        let rule = ThresholdRule::greater_than("°C", 50.0);
        assert!(!rule.breached_by(50.0));
        assert!(rule.breached_by(50.0001));
        assert!(!rule.breached_by(-10.0));
        assert!(!rule.breached_by(f64::NAN));
        assert!(rule.breached_by(f64::INFINITY));
    }

    #[test]
    fn iter_is_sorted() {
        let names: Vec<_> = ThresholdPolicy::standard().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, ["pressure", "temperature", "vibration"]);
    }

    #[test]
    fn later_rule_wins() {
        let policy = ThresholdPolicy::from_rules([
            ("flow", ThresholdRule::greater_than("L/min", 10.0)),
            ("flow", ThresholdRule::greater_than("L/min", 20.0)),
        ]);
        assert_eq!(policy.len(), 1);
        assert_eq!(policy.lookup("flow").unwrap().threshold(), 20.0);
    }
}
