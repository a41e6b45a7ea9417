//! Threshold Evaluation of Raw Sensor Messages
//!
//! ## Overview
//!
//! The evaluator is the only piece of decision logic in the pipeline. It
//! takes the raw bytes of one message and returns a tagged outcome:
//!
//! ```text
//! raw bytes ──decode──▶ Reading ──lookup──▶ ThresholdRule ──compare──▶ outcome
//!     │                    │                                  │
//!     ▼                    ▼                                  ▼
//! DecodeError     UnknownSensorType                   Normal | Alert
//! ```
//!
//! Evaluation has no side effects. Publishing the alert, logging and
//! counting are left to the caller (see [`crate::analyzer::Analyzer`]).
//!
//! ## Alert Payload
//!
//! An alert re-encodes the reading exactly as received: same four fields,
//! same values. Nothing is added (no severity, no sensor id, no dedup key).
//!
//! ## Usage Example
//!
//! ```rust
//! use sensoralert_core::{Evaluator, EvaluationOutcome};
//!
//! let evaluator = Evaluator::default();
//! let raw = br#"{"value":51.2,"type":"temperature","timestamp":"2024-05-01T10:00:00Z","place":"salaX"}"#;
//!
//! match evaluator.evaluate(raw) {
//!     EvaluationOutcome::Alert(alert) => assert_eq!(alert.unit(), "°C"),
//!     other => panic!("expected an alert, got {:?}", other),
//! }
//! ```

use crate::errors::TelemetryError;
use crate::policy::{ThresholdPolicy, ThresholdRule};
use crate::reading::Reading;

/// A reading that crossed its threshold, ready to publish
#[derive(Debug, Clone)]
pub struct Alert {
    reading: Reading,
    rule: ThresholdRule,
    payload: Vec<u8>,
}

impl Alert {
    /// The reading as decoded
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// Rule that was breached
    pub fn rule(&self) -> &ThresholdRule {
        &self.rule
    }

    /// Display unit of the breached rule
    pub fn unit(&self) -> &str {
        self.rule.unit()
    }

    /// JSON-encoded reading to publish on the alert destination
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Tagged result of processing one raw message
#[derive(Debug)]
pub enum EvaluationOutcome {
    /// Reading is within its threshold
    Normal {
        reading: Reading,
        rule: ThresholdRule,
    },
    /// Reading crossed its threshold
    Alert(Alert),
    /// Payload could not be decoded (or the alert could not be re-encoded)
    DecodeError(TelemetryError),
    /// No rule exists for the reading's sensor type
    UnknownSensorType(String),
}

impl EvaluationOutcome {
    pub fn is_alert(&self) -> bool {
        matches!(self, EvaluationOutcome::Alert(_))
    }

    /// Short label for logs and counters
    pub fn label(&self) -> &'static str {
        match self {
            EvaluationOutcome::Normal { .. } => "normal",
            EvaluationOutcome::Alert(_) => "alert",
            EvaluationOutcome::DecodeError(_) => "decode_error",
            EvaluationOutcome::UnknownSensorType(_) => "unknown_sensor_type",
        }
    }
}

/// Decides, per message, whether a reading is an alert
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    policy: ThresholdPolicy,
}

impl Evaluator {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    /// Decode `raw` and evaluate the resulting reading
    pub fn evaluate(&self, raw: &[u8]) -> EvaluationOutcome {
        match Reading::decode(raw) {
            Ok(reading) => self.evaluate_reading(reading),
            Err(err) => EvaluationOutcome::DecodeError(err),
        }
    }

    /// Evaluate an already decoded reading
    pub fn evaluate_reading(&self, reading: Reading) -> EvaluationOutcome {
        let rule = match self.policy.lookup(&reading.sensor_type) {
            Some(rule) => rule.clone(),
            None => return EvaluationOutcome::UnknownSensorType(reading.sensor_type),
        };

        if !rule.breached_by(reading.value) {
            return EvaluationOutcome::Normal { reading, rule };
        }

        match reading.encode() {
            Ok(payload) => EvaluationOutcome::Alert(Alert { reading, rule, payload }),
            Err(err) => EvaluationOutcome::DecodeError(err),
        }
    }
}
