//! Transport Seams
//!
//! The evaluator never talks to a broker. It sits between two narrow traits
//! that a connector (or a test fake) implements:
//!
//! ```text
//! ┌──────────────┐   raw bytes   ┌───────────┐   payload   ┌───────────┐
//! │ ReadingSource│──────────────▶│ Analyzer  │────────────▶│ AlertSink │
//! └──────────────┘               │ Evaluator │             └───────────┘
//!                                └───────────┘
//! ```
//!
//! Implementations live in `sensoralert-connectors` (MQTT) and in
//! [`crate::memory`] (in-memory, for tests and replay).

use async_trait::async_trait;

use crate::errors::TelemetryResult;

/// Pull-based source of raw reading payloads
///
/// The sequence is lazy, unbounded and cannot be restarted. Delivery
/// guarantees belong to the underlying transport.
#[async_trait]
pub trait ReadingSource: Send {
    /// Wait for the next raw payload.
    ///
    /// Returns `None` once the transport has shut down; the consume loop
    /// ends there.
    async fn next_message(&mut self) -> Option<Vec<u8>>;
}

/// Destination for alert payloads
#[async_trait]
pub trait AlertSink: Send {
    /// Fire-and-forget publish of `payload` to `topic`.
    ///
    /// Failures are reported as `TelemetryError::Transport`; callers log
    /// them and keep going.
    async fn publish(&mut self, topic: &str, payload: &[u8]) -> TelemetryResult<()>;
}
