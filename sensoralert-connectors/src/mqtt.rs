//! MQTT connector for SensorAlert
//!
//! Thin wrapper around the `rumqttc` async client. The connector owns the
//! client handle; the event loop runs on a spawned tokio task that keeps the
//! connection alive, reconnects after failures and forwards incoming
//! payloads to the (single) subscription.
//!
//! ## Configuration
//!
//! [`MqttConfig::from_env`] reads:
//!
//! | variable               | default     |
//! |------------------------|-------------|
//! | `MQTT_HOST`            | `localhost` |
//! | `MQTT_PORT`            | `1883`      |
//! | `MQTT_USERNAME`        | `admin`     |
//! | `MQTT_PASSWORD`        | `admin`     |
//! | `MQTT_CLIENT_ID`       | `sensoralert-<pid>` |
//! | `MQTT_KEEP_ALIVE_SECS` | `60`        |
//! | `MQTT_QOS`             | `1`         |
//!
//! ## Sessions
//!
//! Sessions are persistent by default (`clean_session = false`) so the
//! broker keeps queueing readings for the analyzer across short
//! disconnects. When the broker comes back without the session, the
//! connector subscribes again on its own.
//!
//! ## Shutdown
//!
//! Dropping the connector aborts the event loop at once. Call
//! [`MqttConnector::shutdown`] instead to let queued publishes and the
//! DISCONNECT packet reach the broker first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use rumqttc::{
    AsyncClient, ClientError, ConnectionError, Event, EventLoop, Incoming, MqttOptions, Outgoing,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sensoralert_core::constants::transport::{
    DEFAULT_BROKER_HOST, DEFAULT_BROKER_PASSWORD, DEFAULT_BROKER_PORT, DEFAULT_BROKER_USERNAME,
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_KEEP_ALIVE_SECS, RECONNECT_DELAY_MS, SHUTDOWN_GRACE_MS,
};
use sensoralert_core::{AlertSink, ReadingSource, TelemetryError, TelemetryResult};

use crate::{AsyncConnector, ConnectionStats};

/// MQTT-specific errors
#[derive(Debug, Error)]
pub enum MqttError {
    /// Request could not be queued to the event loop
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Connection to the broker failed
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event loop task has stopped
    #[error("Not connected")]
    NotConnected,

    /// Incoming messages were already handed to another subscription
    #[error("Subscription already taken")]
    SubscriptionTaken,
}

/// MQTT delivery guarantee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoS {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

impl QoS {
    /// Parse the numeric MQTT level (`0`, `1`, `2`)
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(QoS::AtMostOnce),
            1 => Some(QoS::AtLeastOnce),
            2 => Some(QoS::ExactlyOnce),
            _ => None,
        }
    }
}

impl From<QoS> for rumqttc::QoS {
    fn from(qos: QoS) -> Self {
        match qos {
            QoS::AtMostOnce => rumqttc::QoS::AtMostOnce,
            QoS::AtLeastOnce => rumqttc::QoS::AtLeastOnce,
            QoS::ExactlyOnce => rumqttc::QoS::ExactlyOnce,
        }
    }
}

/// MQTT configuration
#[derive(Debug, Clone)]
pub struct MqttConfig {
    /// Broker host name or address
    pub host: String,
    /// Broker TCP port
    pub port: u16,
    /// Client identifier, unique per connected process
    pub client_id: String,
    /// Username / password pair
    pub credentials: Option<(String, String)>,
    /// Keep-alive ping interval
    pub keep_alive: Duration,
    /// Capacity of the request and incoming channels
    pub channel_capacity: usize,
    /// QoS used for publishes and subscriptions
    pub qos: QoS,
    /// Start a fresh session on every connect
    pub clean_session: bool,
}

impl MqttConfig {
    /// Create new configuration for a broker
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: format!("sensoralert-{}", std::process::id()),
            credentials: None,
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            qos: QoS::AtLeastOnce,
            clean_session: false,
        }
    }

    /// Set client identifier
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }

    /// Set username / password authentication
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set keep-alive interval in seconds
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive = Duration::from_secs(secs);
        self
    }

    /// Set channel capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set QoS for publishes and subscriptions
    pub fn qos(mut self, qos: QoS) -> Self {
        self.qos = qos;
        self
    }

    /// Choose between a persistent and a clean session
    pub fn clean_session(mut self, clean: bool) -> Self {
        self.clean_session = clean;
        self
    }

    /// Build configuration from `MQTT_*` environment variables
    pub fn from_env() -> Result<Self, MqttError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key → value lookup.
    ///
    /// Unset keys fall back to defaults; unparsable numbers are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MqttError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("MQTT_HOST").unwrap_or_else(|| DEFAULT_BROKER_HOST.to_string());
        let port = match lookup("MQTT_PORT") {
            Some(raw) => parse_number::<u16>("MQTT_PORT", &raw)?,
            None => DEFAULT_BROKER_PORT,
        };

        let username = lookup("MQTT_USERNAME").unwrap_or_else(|| DEFAULT_BROKER_USERNAME.to_string());
        let password = lookup("MQTT_PASSWORD").unwrap_or_else(|| DEFAULT_BROKER_PASSWORD.to_string());

        let mut config = Self::new(host, port).credentials(username, password);

        if let Some(id) = lookup("MQTT_CLIENT_ID") {
            config = config.client_id(id);
        }
        if let Some(raw) = lookup("MQTT_KEEP_ALIVE_SECS") {
            config = config.keep_alive_secs(parse_number("MQTT_KEEP_ALIVE_SECS", &raw)?);
        }
        if let Some(raw) = lookup("MQTT_QOS") {
            let level = parse_number::<u8>("MQTT_QOS", &raw)?;
            let qos = QoS::from_level(level)
                .ok_or_else(|| MqttError::Config(format!("MQTT_QOS must be 0, 1 or 2, got {}", level)))?;
            config = config.qos(qos);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> Result<(), MqttError> {
        if self.host.trim().is_empty() {
            return Err(MqttError::Config("Broker host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(MqttError::Config("Broker port must not be 0".into()));
        }
        if self.client_id.is_empty() || self.client_id.starts_with(' ') {
            return Err(MqttError::Config("Client id must not be empty or start with a space".into()));
        }
        if self.channel_capacity == 0 {
            return Err(MqttError::Config("Channel capacity must be at least 1".into()));
        }
        Ok(())
    }

    fn to_options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(self.keep_alive);
        options.set_clean_session(self.clean_session);
        if let Some((username, password)) = &self.credentials {
            options.set_credentials(username, password);
        }
        options
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, MqttError> {
    raw.trim()
        .parse()
        .map_err(|_| MqttError::Config(format!("{} is not a valid number: {:?}", key, raw)))
}

/// State shared between the connector and its event loop task
#[derive(Default)]
struct Shared {
    stats: Mutex<ConnectionStats>,
    connected: AtomicBool,
    subscriptions: Mutex<Vec<String>>,
}

impl Shared {
    fn record<F: FnOnce(&mut ConnectionStats)>(&self, update: F) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }
}

/// MQTT connector backed by a `rumqttc` async client
pub struct MqttConnector {
    config: MqttConfig,
    client: AsyncClient,
    shared: Arc<Shared>,
    incoming: Option<mpsc::Receiver<Vec<u8>>>,
    driver: JoinHandle<()>,
}

impl MqttConnector {
    /// Create the client and spawn its event loop.
    ///
    /// Must be called from within a tokio runtime. Connecting happens in the
    /// background; failures are logged and retried by the event loop.
    pub fn start(config: MqttConfig) -> Result<Self, MqttError> {
        config.validate()?;

        let (client, eventloop) = AsyncClient::new(config.to_options(), config.channel_capacity);
        let (incoming_tx, incoming_rx) = mpsc::channel(config.channel_capacity);
        let shared = Arc::new(Shared::default());

        info!(
            "Connecting to MQTT broker {}:{} as {}",
            config.host, config.port, config.client_id
        );

        let router = EventRouter::new(client.clone(), config.qos, incoming_tx, Arc::clone(&shared));
        let driver = tokio::spawn(drive_event_loop(eventloop, router));

        Ok(Self {
            config,
            client,
            shared,
            incoming: Some(incoming_rx),
            driver,
        })
    }

    /// Subscribe to `topic` and take ownership of the incoming payloads.
    ///
    /// Only one subscription per connector.
    pub async fn subscribe(&mut self, topic: &str) -> Result<MqttSubscription, MqttError> {
        if self.driver.is_finished() {
            return Err(MqttError::NotConnected);
        }
        let incoming = self.incoming.take().ok_or(MqttError::SubscriptionTaken)?;

        self.client.subscribe(topic, self.config.qos.into()).await?;
        if let Ok(mut topics) = self.shared.subscriptions.lock() {
            topics.push(topic.to_string());
        }

        info!("Subscribed to {}", topic);
        Ok(MqttSubscription {
            topic: topic.to_string(),
            incoming,
        })
    }

    /// Send DISCONNECT and wait for the event loop to write it out.
    ///
    /// Requests queued earlier, pending publishes included, leave first.
    /// Waits at most `SHUTDOWN_GRACE_MS`; a broker that never answered keeps
    /// whatever is still queued.
    pub async fn shutdown(self) -> Result<(), MqttError> {
        self.shutdown_within(Duration::from_millis(SHUTDOWN_GRACE_MS)).await
    }

    async fn shutdown_within(mut self, grace: Duration) -> Result<(), MqttError> {
        if !self.driver.is_finished() {
            self.client.disconnect().await?;
        }

        match tokio::time::timeout(grace, &mut self.driver).await {
            Ok(_) => debug!("MQTT event loop stopped"),
            Err(_) => warn!(
                "MQTT event loop still running after {} ms; dropping queued requests",
                grace.as_millis()
            ),
        }
        Ok(())
    }
}

impl Drop for MqttConnector {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[async_trait]
impl AsyncConnector for MqttConnector {
    type Error = MqttError;

    async fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        if self.driver.is_finished() {
            return Err(MqttError::NotConnected);
        }

        match self.client.publish(topic, self.config.qos.into(), false, data.to_vec()).await {
            Ok(()) => {
                self.shared.record(|stats| {
                    stats.messages_sent += 1;
                    stats.bytes_sent += data.len() as u64;
                });
                Ok(())
            }
            Err(err) => {
                self.shared.record(|stats| {
                    stats.messages_failed += 1;
                    stats.last_error = Some(err.to_string());
                });
                Err(err.into())
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    fn stats(&self) -> ConnectionStats {
        self.shared
            .stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AlertSink for MqttConnector {
    async fn publish(&mut self, topic: &str, payload: &[u8]) -> TelemetryResult<()> {
        self.send(topic, payload).await.map_err(TelemetryError::transport)
    }
}

/// Incoming payloads of a subscribed topic
pub struct MqttSubscription {
    topic: String,
    incoming: mpsc::Receiver<Vec<u8>>,
}

impl MqttSubscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl ReadingSource for MqttSubscription {
    async fn next_message(&mut self) -> Option<Vec<u8>> {
        self.incoming.recv().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Applies event loop events to the shared state and the subscription
struct EventRouter {
    client: AsyncClient,
    qos: QoS,
    incoming: mpsc::Sender<Vec<u8>>,
    shared: Arc<Shared>,
    ever_connected: bool,
}

impl EventRouter {
    fn new(client: AsyncClient, qos: QoS, incoming: mpsc::Sender<Vec<u8>>, shared: Arc<Shared>) -> Self {
        Self {
            client,
            qos,
            incoming,
            shared,
            ever_connected: false,
        }
    }

    async fn route(&mut self, event: Event) -> Flow {
        match event {
            Event::Incoming(Incoming::ConnAck(ack)) => {
                self.shared.connected.store(true, Ordering::SeqCst);
                info!("Connected to MQTT broker (session present: {})", ack.session_present);

                if self.ever_connected && !ack.session_present {
                    let restored = self.resubscribe() as u64;
                    self.shared.record(|stats| stats.resubscriptions += restored);
                }
                self.ever_connected = true;
            }
            Event::Incoming(Incoming::Publish(publish)) => {
                self.shared.record(|stats| {
                    stats.messages_received += 1;
                    stats.bytes_received += publish.payload.len() as u64;
                });
                debug!("Received {} bytes on {}", publish.payload.len(), publish.topic);

                if self.incoming.send(publish.payload.to_vec()).await.is_err() {
                    debug!("Subscription dropped; discarding message from {}", publish.topic);
                }
            }
            Event::Incoming(Incoming::Disconnect) => {
                self.shared.connected.store(false, Ordering::SeqCst);
                info!("Broker closed the connection");
            }
            Event::Outgoing(Outgoing::Disconnect) => {
                self.shared.connected.store(false, Ordering::SeqCst);
                info!("Disconnected from MQTT broker");
                return Flow::Stop;
            }
            _ => {}
        }
        Flow::Continue
    }

    fn connection_lost(&self, err: &ConnectionError) {
        let was_connected = self.shared.connected.swap(false, Ordering::SeqCst);
        self.shared.record(|stats| {
            if was_connected {
                stats.reconnections += 1;
            }
            stats.last_error = Some(err.to_string());
        });
        warn!("MQTT connection error: {}; retrying in {} ms", err, RECONNECT_DELAY_MS);
    }

    /// Queue a subscribe for every known topic; returns how many were queued
    fn resubscribe(&self) -> usize {
        let topics = match self.shared.subscriptions.lock() {
            Ok(topics) => topics.clone(),
            Err(_) => return 0,
        };

        let mut restored = 0;
        for topic in topics {
            // try_subscribe: awaiting here would block the loop that drains the request channel
            match self.client.try_subscribe(topic.as_str(), self.qos.into()) {
                Ok(()) => {
                    info!("Re-subscribed to {}", topic);
                    restored += 1;
                }
                Err(err) => warn!("Failed to re-subscribe to {}: {}", topic, err),
            }
        }
        restored
    }
}

/// Poll the event loop until DISCONNECT has been sent
async fn drive_event_loop(mut eventloop: EventLoop, mut router: EventRouter) {
    loop {
        match eventloop.poll().await {
            Ok(event) => {
                if router.route(event).await == Flow::Stop {
                    break;
                }
            }
            Err(err) => {
                router.connection_lost(&err);
                tokio::time::sleep(Duration::from_millis(RECONNECT_DELAY_MS)).await;
            }
        }
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
    fn test_config_builder() {
        let config = MqttConfig::new("broker.local", 8883)
            .client_id("analyzer-1")
            .credentials("user", "secret")
            .keep_alive_secs(30)
            .channel_capacity(8)
            .qos(QoS::ExactlyOnce)
            .clean_session(true);

        assert_eq!(config.host, "broker.local");
        assert_eq!(config.port, 8883);
        assert_eq!(config.client_id, "analyzer-1");
        assert_eq!(config.credentials, Some(("user".into(), "secret".into())));
        assert_eq!(config.keep_alive, Duration::from_secs(30));
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.qos, QoS::ExactlyOnce);
        assert!(config.clean_session);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_from_empty_environment() {
        let config = MqttConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 1883);
        assert_eq!(config.credentials, Some(("admin".into(), "admin".into())));
        assert_eq!(config.qos, QoS::AtLeastOnce);
        assert!(!config.clean_session);
        assert!(config.client_id.starts_with("sensoralert-"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = MqttConfig::from_lookup(lookup(&[
            ("MQTT_HOST", "rabbit.internal"),
            ("MQTT_PORT", " 1884 "),
            ("MQTT_USERNAME", "guest"),
            ("MQTT_PASSWORD", "guest"),
            ("MQTT_CLIENT_ID", "producer-7"),
            ("MQTT_KEEP_ALIVE_SECS", "15"),
            ("MQTT_QOS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.host, "rabbit.internal");
        assert_eq!(config.port, 1884);
        assert_eq!(config.client_id, "producer-7");
        assert_eq!(config.keep_alive, Duration::from_secs(15));
        assert_eq!(config.qos, QoS::AtMostOnce);
    }

    #[test]
    fn test_invalid_environment() {
        for pairs in [
            [("MQTT_PORT", "eighty")],
            [("MQTT_PORT", "0")],
            [("MQTT_QOS", "3")],
            [("MQTT_HOST", "  ")],
            [("MQTT_KEEP_ALIVE_SECS", "-1")],
        ] {
            let result = MqttConfig::from_lookup(lookup(&pairs));
            assert!(matches!(result, Err(MqttError::Config(_))), "{:?}", pairs);
        }
    }

    #[test]
    fn test_validation() {
        assert!(MqttConfig::new("", 1883).validate().is_err());
        assert!(MqttConfig::new("localhost", 0).validate().is_err());
        assert!(MqttConfig::new("localhost", 1883).channel_capacity(0).validate().is_err());
        assert!(MqttConfig::new("localhost", 1883).client_id("").validate().is_err());
    }

    #[test]
    fn test_qos_levels() {
        assert_eq!(QoS::from_level(1), Some(QoS::AtLeastOnce));
        assert_eq!(QoS::from_level(9), None);
        assert_eq!(rumqttc::QoS::from(QoS::ExactlyOnce), rumqttc::QoS::ExactlyOnce);
    }

    #[tokio::test]
    async fn test_single_subscription() {
        // Nothing listens on port 1; the event loop keeps failing in the background
        let config = MqttConfig::new("127.0.0.1", 1).client_id("test-single-subscription");
        let mut connector = MqttConnector::start(config).unwrap();

        assert!(!connector.is_connected());
        let subscription = connector.subscribe("sensors.analyze").await.unwrap();
        assert_eq!(subscription.topic(), "sensors.analyze");
        assert!(matches!(
            connector.subscribe("sensors.analyze").await,
            Err(MqttError::SubscriptionTaken)
        ));
    }

    #[tokio::test]
    async fn test_publish_is_queued_while_offline() {
        let config = MqttConfig::new("127.0.0.1", 1).client_id("test-offline-publish");
        let mut connector = MqttConnector::start(config).unwrap();

        connector.publish("alerts", b"{\"value\":60}").await.unwrap();

        let stats = connector.stats();
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.bytes_sent, 12);
    }

    fn router(capacity: usize) -> (EventRouter, mpsc::Receiver<Vec<u8>>, EventLoop, Arc<Shared>) {
        let options = MqttConfig::new("127.0.0.1", 1).client_id("test-router").to_options();
        let (client, eventloop) = AsyncClient::new(options, capacity);
        let (tx, rx) = mpsc::channel(capacity);
        let shared = Arc::new(Shared::default());
        let router = EventRouter::new(client, QoS::AtLeastOnce, tx, Arc::clone(&shared));
        (router, rx, eventloop, shared)
    }

    fn connack(session_present: bool) -> Event {
        Event::Incoming(Incoming::ConnAck(rumqttc::ConnAck {
            session_present,
            code: rumqttc::ConnectReturnCode::Success,
        }))
    }

    fn reset() -> ConnectionError {
        ConnectionError::Io(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer"))
    }

    #[tokio::test]
    async fn test_publish_reaches_subscription() {
        let (mut router, mut rx, _eventloop, shared) = router(4);
        let publish = rumqttc::Publish::new(
            "sensors.analyze",
            rumqttc::QoS::AtLeastOnce,
            br#"{"value":61}"#.to_vec(),
        );

        let flow = router.route(Event::Incoming(Incoming::Publish(publish))).await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(rx.recv().await, Some(br#"{"value":61}"#.to_vec()));
        let stats = shared.stats.lock().unwrap().clone();
        assert_eq!(stats.messages_received, 1);
        assert_eq!(stats.bytes_received, 12);
    }

    #[tokio::test]
    async fn test_publish_without_subscription_is_discarded() {
        let (mut router, rx, _eventloop, shared) = router(4);
        drop(rx);

        let publish = rumqttc::Publish::new("alerts", rumqttc::QoS::AtMostOnce, b"{}".to_vec());
        assert_eq!(router.route(Event::Incoming(Incoming::Publish(publish))).await, Flow::Continue);
        assert_eq!(shared.stats.lock().unwrap().messages_received, 1);
    }

    #[tokio::test]
    async fn test_lost_session_is_resubscribed() {
        let (mut router, _rx, _eventloop, shared) = router(8);
        shared.subscriptions.lock().unwrap().push("sensors.analyze".into());

        // First connect: the original subscribe is still queued
        router.route(connack(false)).await;
        assert!(shared.connected.load(Ordering::SeqCst));
        assert_eq!(shared.stats.lock().unwrap().resubscriptions, 0);

        router.connection_lost(&reset());
        assert!(!shared.connected.load(Ordering::SeqCst));
        router.route(connack(false)).await;

        let stats = shared.stats.lock().unwrap().clone();
        assert_eq!(stats.reconnections, 1);
        assert_eq!(stats.resubscriptions, 1);
        assert!(stats.last_error.is_some());
    }

    #[tokio::test]
    async fn test_kept_session_is_not_resubscribed() {
        let (mut router, _rx, _eventloop, shared) = router(8);
        shared.subscriptions.lock().unwrap().push("sensors.analyze".into());

        router.route(connack(false)).await;
        router.connection_lost(&reset());
        router.route(connack(true)).await;

        assert_eq!(shared.stats.lock().unwrap().resubscriptions, 0);
        assert_eq!(shared.stats.lock().unwrap().reconnections, 1);
    }

    #[tokio::test]
    async fn test_outgoing_disconnect_stops_the_loop() {
        let (mut router, _rx, _eventloop, shared) = router(4);
        router.route(connack(true)).await;

        assert_eq!(router.route(Event::Incoming(Incoming::Disconnect)).await, Flow::Continue);
        assert_eq!(router.route(Event::Outgoing(Outgoing::Disconnect)).await, Flow::Stop);
        assert!(!shared.connected.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_shutdown_without_broker_returns() {
        let config = MqttConfig::new("127.0.0.1", 1).client_id("test-shutdown");
        let mut connector = MqttConnector::start(config).unwrap();
        connector.publish("alerts", b"{}").await.unwrap();

        connector.shutdown_within(Duration::from_millis(50)).await.unwrap();
    }
}
