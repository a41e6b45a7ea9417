//! Transport Defaults
//!
//! Logical destinations are shared by every process in the pipeline. Broker
//! defaults apply when the environment does not override them.

/// Destination the producer publishes raw readings to.
pub const SENSOR_TOPIC: &str = "sensors.analyze";

/// Fanout destination for readings that crossed their threshold.
pub const ALERT_TOPIC: &str = "alerts";

/// Seconds between two synthetic readings.
pub const DEFAULT_PUBLISH_INTERVAL_SECS: u64 = 2;

/// Broker host used when `MQTT_HOST` is unset.
pub const DEFAULT_BROKER_HOST: &str = "localhost";

/// Broker port used when `MQTT_PORT` is unset.
pub const DEFAULT_BROKER_PORT: u16 = 1883;

/// Credentials used when `MQTT_USERNAME` / `MQTT_PASSWORD` are unset.
pub const DEFAULT_BROKER_USERNAME: &str = "admin";
pub const DEFAULT_BROKER_PASSWORD: &str = "admin";

/// MQTT keep-alive interval (seconds).
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

/// Capacity of the bounded channels between the client event loop and its
/// callers (outgoing requests and incoming payloads).
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Pause before polling the event loop again after a connection error
/// (milliseconds).
pub const RECONNECT_DELAY_MS: u64 = 1000;

/// Upper bound on waiting for DISCONNECT to be flushed at shutdown
/// (milliseconds).
pub const SHUTDOWN_GRACE_MS: u64 = 2000;
