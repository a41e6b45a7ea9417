//! Producer configuration from the environment

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use sensoralert_connectors::MqttConfig;
use sensoralert_core::constants::{DEFAULT_PUBLISH_INTERVAL_SECS, SENSOR_TOPIC};
use sensoralert_core::SensorType;

#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub broker: MqttConfig,
    /// Topic readings are published to
    pub sensor_topic: String,
    pub sensor_type: SensorType,
    /// Location label stamped on every reading
    pub place: String,
    pub interval: Duration,
}

impl ProducerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Nothing to resume for a publisher
        let broker = MqttConfig::from_lookup(&lookup)?.clean_session(true);

        let sensor_topic = lookup("SENSOR_TOPIC").unwrap_or_else(|| SENSOR_TOPIC.to_string());
        ensure!(!sensor_topic.trim().is_empty(), "SENSOR_TOPIC must not be empty");

        let sensor_type = match lookup("SENSOR_TYPE") {
            Some(name) => name.trim().parse::<SensorType>()?,
            None => SensorType::Temperature,
        };

        let place = lookup("SENSOR_PLACE").unwrap_or_default().trim().to_string();

        let interval_secs = match lookup("PUBLISH_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("PUBLISH_INTERVAL_SECS is not a number: {:?}", raw))?,
            None => DEFAULT_PUBLISH_INTERVAL_SECS,
        };
        ensure!(interval_secs > 0, "PUBLISH_INTERVAL_SECS must be at least 1");

        Ok(Self {
            broker,
            sensor_topic,
            sensor_type,
            place,
            interval: Duration::from_secs(interval_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ProducerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.sensor_topic, "sensors.analyze");
        assert_eq!(config.sensor_type, SensorType::Temperature);
        assert_eq!(config.place, "");
        assert_eq!(config.interval, Duration::from_secs(2));
        assert!(config.broker.clean_session);
    }

    #[test]
    fn overrides() {
        let config = ProducerConfig::from_lookup(lookup(&[
            ("SENSOR_TYPE", "vibration"),
            ("SENSOR_PLACE", "  pump room  "),
            ("PUBLISH_INTERVAL_SECS", "5"),
            ("SENSOR_TOPIC", "plant/readings"),
        ]))
        .unwrap();

        assert_eq!(config.sensor_type, SensorType::Vibration);
        assert_eq!(config.place, "pump room");
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.sensor_topic, "plant/readings");
    }

    #[test]
    fn unknown_sensor_type_is_rejected() {
        let err = ProducerConfig::from_lookup(lookup(&[("SENSOR_TYPE", "humidity")])).unwrap_err();
        assert!(err.to_string().contains("humidity"));

        assert!(ProducerConfig::from_lookup(lookup(&[("SENSOR_TYPE", "Temperature")])).is_err());
    }

    #[test]
    fn interval_must_be_positive() {
        assert!(ProducerConfig::from_lookup(lookup(&[("PUBLISH_INTERVAL_SECS", "0")])).is_err());
        assert!(ProducerConfig::from_lookup(lookup(&[("PUBLISH_INTERVAL_SECS", "soon")])).is_err());
    }
}
