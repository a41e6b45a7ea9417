//! Notifier configuration from the environment

use anyhow::{ensure, Result};
use sensoralert_connectors::MqttConfig;
use sensoralert_core::constants::ALERT_TOPIC;

/// Client id used when `MQTT_CLIENT_ID` is unset. Run further notifiers with
/// their own id; each one receives every alert.
const DEFAULT_CLIENT_ID: &str = "sensoralert-notifier";

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub broker: MqttConfig,
    /// Topic alerts are consumed from
    pub alert_topic: String,
}

impl NotifierConfig {
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

        let alert_topic = lookup("ALERT_TOPIC").unwrap_or_else(|| ALERT_TOPIC.to_string());
        ensure!(!alert_topic.trim().is_empty(), "ALERT_TOPIC must not be empty");

        Ok(Self { broker, alert_topic })
    }
}
