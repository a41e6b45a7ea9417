//! In-memory collaborators for testing and replay
//!
//! This module provides broker-free implementations of the transport seams:
//! - Unit and integration testing of the consume loop
//! - Replaying captured payloads through the evaluator
//! - Checking what would have been published without a broker

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::errors::{TelemetryError, TelemetryResult};
use crate::traits::{AlertSink, ReadingSource};

/// Memory-based reading source
///
/// ## Example
///
/// ```rust
/// use sensoralert_core::memory::MemorySource;
/// use sensoralert_core::traits::ReadingSource;
///
/// # tokio_test_block(async {
/// let mut source = MemorySource::new(vec![b"{\"value\":1}".to_vec()]);
/// assert!(source.next_message().await.is_some());
/// assert!(source.next_message().await.is_none());
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    messages: Vec<Vec<u8>>,
    position: usize,
}

impl MemorySource {
    pub fn new(messages: Vec<Vec<u8>>) -> Self {
        Self { messages, position: 0 }
    }

    /// Build a source from anything byte-like (`&str`, `&[u8]`, `Vec<u8>`)
    pub fn from_payloads<I, P>(payloads: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Self::new(payloads.into_iter().map(|p| p.as_ref().to_vec()).collect())
    }

    /// Number of messages already handed out
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.messages.len()
    }
}

#[async_trait]
impl ReadingSource for MemorySource {
    async fn next_message(&mut self) -> Option<Vec<u8>> {
        let message = self.messages.get(self.position)?.clone();
        self.position += 1;
        Some(message)
    }
}

/// A publish call captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Alert sink that records every publish call
///
/// Failures can be scripted with [`RecordingSink::fail_next`]; a failed
/// publish is still recorded as attempted but not as published.
#[derive(Debug, Default)]
pub struct RecordingSink {
    published: Vec<Published>,
    attempts: usize,
    scripted_failures: VecDeque<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next publish call fail with a transport error
    pub fn fail_next(&mut self, message: impl Into<String>) -> &mut Self {
        self.scripted_failures.push_back(message.into());
        self
    }

    /// Successful publishes, in call order
    pub fn published(&self) -> &[Published] {
        &self.published
    }

    /// Number of publish calls, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn publish(&mut self, topic: &str, payload: &[u8]) -> TelemetryResult<()> {
        self.attempts += 1;

        if let Some(message) = self.scripted_failures.pop_front() {
            return Err(TelemetryError::Transport(message));
        }

        self.published.push(Published {
            topic: topic.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_source_drains_in_order() {
        let mut source = MemorySource::from_payloads(["first", "second"]);
        assert_eq!(source.position(), 0);

        assert_eq!(source.next_message().await.as_deref(), Some(&b"first"[..]));
        assert_eq!(source.next_message().await.as_deref(), Some(&b"second"[..]));
        assert!(source.is_exhausted());
        assert_eq!(source.next_message().await, None);
        assert_eq!(source.position(), 2);
    }

    #[tokio::test]
    async fn recording_sink_scripts_failures() {
        let mut sink = RecordingSink::new();
        sink.fail_next("broker down");

        let err = sink.publish("alerts", b"{}").await.unwrap_err();
        assert!(matches!(err, TelemetryError::Transport(ref m) if m == "broker down"));

        sink.publish("alerts", b"{}").await.unwrap();
        assert_eq!(sink.attempts(), 2);
        assert_eq!(
            sink.published(),
            &[Published { topic: "alerts".into(), payload: b"{}".to_vec() }]
        );
    }
}
