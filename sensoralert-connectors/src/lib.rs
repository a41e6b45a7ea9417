//! Broker Connectors for the SensorAlert Pipeline
//!
//! ## Overview
//!
//! Connectors implement the two transport seams of `sensoralert-core`:
//!
//! - [`ReadingSource`](sensoralert_core::ReadingSource): a subscription that
//!   hands raw reading payloads to the consume loop
//! - [`AlertSink`](sensoralert_core::AlertSink): fire-and-forget publishing
//!   of alert payloads
//!
//! The evaluator never sees a connector directly, so everything here can be
//! swapped for the in-memory collaborators in tests.
//!
//! ## MQTT
//!
//! The only connector today. Logical destinations map one to one onto MQTT
//! topics:
//!
//! | destination       | direction                     |
//! |-------------------|-------------------------------|
//! | `sensors.analyze` | producer → analyzer           |
//! | `alerts`          | analyzer → every subscriber   |
//!
//! Every client subscribed to `alerts` receives every alert, which is the
//! fanout behaviour downstream workers rely on. Works against any MQTT 3.1.1
//! broker, including RabbitMQ with its MQTT plugin.
//!
//! ### Delivery Thread
//!
//! ```text
//! ┌───────────────┐  publish()   ┌──────────────┐   TCP   ┌────────┐
//! │ MqttConnector │─────────────▶│  event loop  │◀───────▶│ broker │
//! └───────────────┘   requests   │ (tokio task) │         └────────┘
//! ┌───────────────┐  bounded     │              │
//! │MqttSubscription│◀────────────│              │
//! └───────────────┘  mpsc        └──────────────┘
//! ```
//!
//! The client event loop runs on its own task. Incoming payloads cross a
//! bounded channel to the subscription; when the consumer falls behind, the
//! event loop waits instead of dropping messages.
//!
//! ## Example Usage
//!
//! ```no_run
//! use sensoralert_connectors::{AsyncConnector, MqttConfig, MqttConnector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MqttConfig::new("broker.local", 1883)
//!     .client_id("sensor_001")
//!     .keep_alive_secs(60);
//!
//! let mut mqtt = MqttConnector::start(config)?;
//! mqtt.send("sensors.analyze", br#"{"value":21.5,"type":"temperature"}"#).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "mqtt")]
pub mod mqtt;

// Re-export common types
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConnector, MqttConfig, MqttError, MqttSubscription, QoS};

/// Async connector interface
#[async_trait::async_trait]
pub trait AsyncConnector: Send {
    type Error;

    /// Send raw bytes to a topic
    async fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Total messages handed to the transport successfully
    pub messages_sent: u64,
    /// Total messages the transport refused
    pub messages_failed: u64,
    /// Total payload bytes sent
    pub bytes_sent: u64,
    /// Total messages received from subscriptions
    pub messages_received: u64,
    /// Total payload bytes received
    pub bytes_received: u64,
    /// Number of times an established connection was lost
    pub reconnections: u32,
    /// Topics subscribed again after the broker lost the session
    pub resubscriptions: u64,
    /// Last error message
    pub last_error: Option<String>,
}
