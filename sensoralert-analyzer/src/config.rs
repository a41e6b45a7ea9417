//! Analyzer configuration from the environment

use anyhow::{ensure, Result};
use sensoralert_connectors::MqttConfig;
use sensoralert_core::constants::{ALERT_TOPIC, SENSOR_TOPIC};

/// Client id used when `MQTT_CLIENT_ID` is unset. Stable so the broker can
/// keep the session (and queued readings) across restarts.
const DEFAULT_CLIENT_ID: &str = "sensoralert-analyzer";

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub broker: MqttConfig,
    /// Topic readings are consumed from
    pub sensor_topic: String,
    /// Topic alerts are published to
    pub alert_topic: String,
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut broker = MqttConfig::from_lookup(&lookup)?;
        if lookup("MQTT_CLIENT_ID").is_none() {
            broker = broker.client_id(DEFAULT_CLIENT_ID);
        }

        let sensor_topic = lookup("SENSOR_TOPIC").unwrap_or_else(|| SENSOR_TOPIC.to_string());
        let alert_topic = lookup("ALERT_TOPIC").unwrap_or_else(|| ALERT_TOPIC.to_string());

        ensure!(!sensor_topic.trim().is_empty(), "SENSOR_TOPIC must not be empty");
        ensure!(!alert_topic.trim().is_empty(), "ALERT_TOPIC must not be empty");
        ensure!(
            sensor_topic != alert_topic,
            "SENSOR_TOPIC and ALERT_TOPIC must differ, both are {:?}",
            sensor_topic
        );

        Ok(Self {
            broker,
            sensor_topic,
            alert_topic,
        })
    }
}
