//! Consume Loop
//!
//! One sequential worker: pull a message, evaluate it, publish if it is an
//! alert, repeat. Nothing is shared, buffered or retried. Every failure is
//! logged and counted, and the loop continues with the next message.
//!
//! | outcome             | log level | side effect        |
//! |---------------------|-----------|--------------------|
//! | normal              | debug     | none               |
//! | alert               | info      | publish to alerts  |
//! | decode error        | warn      | none (dropped)     |
//! | unknown sensor type | warn      | none (dropped)     |
//! | publish failed      | error     | none (dropped)     |
//!
//! ```rust
//! use sensoralert_core::{Analyzer, Evaluator};
//! use sensoralert_core::memory::{MemorySource, RecordingSink};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut analyzer = Analyzer::new(Evaluator::default(), "alerts");
//! let mut source = MemorySource::from_payloads([r#"{"value":60,"type":"temperature"}"#]);
//! let mut sink = RecordingSink::new();
//!
//! let stats = analyzer.run(&mut source, &mut sink).await;
//! assert_eq!(stats.alerts_published, 1);
//! # });
//! ```

use log::{debug, error, info, warn};

use crate::evaluator::{EvaluationOutcome, Evaluator};
use crate::notice::AlertNotice;
use crate::traits::{AlertSink, ReadingSource};

/// Counters for one analyzer run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalyzerStats {
    /// Messages pulled from the source
    pub received: u64,
    /// Readings within their threshold
    pub normal: u64,
    /// Alerts handed to the sink successfully
    pub alerts_published: u64,
    /// Payloads that could not be decoded
    pub decode_errors: u64,
    /// Readings whose sensor type has no rule
    pub unknown_sensor_types: u64,
    /// Alerts the sink failed to publish
    pub transport_errors: u64,
}

impl AnalyzerStats {
    /// Alerts detected, whether or not the publish went through
    pub fn alerts_detected(&self) -> u64 {
        self.alerts_published + self.transport_errors
    }
}

/// Drives the evaluator from a source into a sink
#[derive(Debug)]
pub struct Analyzer {
    evaluator: Evaluator,
    alert_topic: String,
    stats: AnalyzerStats,
}

impl Analyzer {
    pub fn new(evaluator: Evaluator, alert_topic: impl Into<String>) -> Self {
        Self {
            evaluator,
            alert_topic: alert_topic.into(),
            stats: AnalyzerStats::default(),
        }
    }

    pub fn alert_topic(&self) -> &str {
        &self.alert_topic
    }

    pub fn stats(&self) -> &AnalyzerStats {
        &self.stats
    }

    /// Process a single raw message.
    ///
    /// The returned outcome is the evaluation result; whether the alert
    /// publish succeeded shows up in [`Analyzer::stats`].
    pub async fn handle<K>(&mut self, raw: &[u8], sink: &mut K) -> EvaluationOutcome
    where
        K: AlertSink + ?Sized,
    {
        self.stats.received += 1;
        let outcome = self.evaluator.evaluate(raw);

        match &outcome {
            EvaluationOutcome::Normal { reading, rule } => {
                self.stats.normal += 1;
                debug!(
                    "Reading within threshold: {} {:.2} {} (limit {} {})",
                    reading.sensor_type,
                    reading.value,
                    rule.unit(),
                    rule.comparator().symbol(),
                    rule.threshold()
                );
            }
            EvaluationOutcome::Alert(alert) => {
                match sink.publish(&self.alert_topic, alert.payload()).await {
                    Ok(()) => {
                        self.stats.alerts_published += 1;
                        info!(
                            "Alert published to {}: {}",
                            self.alert_topic,
                            AlertNotice::from_reading(alert.reading()).summary()
                        );
                    }
                    Err(err) => {
                        self.stats.transport_errors += 1;
                        error!("Failed to publish alert to {}: {}", self.alert_topic, err);
                    }
                }
            }
            EvaluationOutcome::DecodeError(err) => {
                self.stats.decode_errors += 1;
                warn!("Discarding message: {}", err);
            }
            EvaluationOutcome::UnknownSensorType(sensor_type) => {
                self.stats.unknown_sensor_types += 1;
                warn!("Skipping reading with unknown sensor type {:?}", sensor_type);
            }
        }

        outcome
    }

    /// Consume until the source ends and return the final counters
    pub async fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> AnalyzerStats
    where
        S: ReadingSource + ?Sized,
        K: AlertSink + ?Sized,
    {
        info!("Waiting for readings; alerts go to {}", self.alert_topic);

        while let Some(raw) = source.next_message().await {
            self.handle(&raw, sink).await;
        }

        info!("Reading source closed after {} messages", self.stats.received);
        self.stats.clone()
    }
}
