//! Core alert engine for SensorAlert
//!
//! Decides, one message at a time, whether a sensor reading crossed the
//! threshold for its sensor type and should be republished as an alert.
//! Transport is kept behind two narrow traits so the engine runs the same
//! against a broker or against in-memory fakes.
//!
//! Key properties:
//! - Stateless per message (no windows, no dedup, no retries)
//! - Strict `>` comparison: a value equal to its threshold never alerts
//! - Alert payload is the reading re-encoded, unchanged
//!
//! ```rust
//! use sensoralert_core::{Evaluator, EvaluationOutcome};
//!
//! let evaluator = Evaluator::default();
//!
//! match evaluator.evaluate(br#"{"value":50.0,"type":"temperature"}"#) {
//!     EvaluationOutcome::Normal { .. } => {}, // at the threshold, not above it
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

#![deny(unsafe_code)]

pub mod analyzer;
pub mod constants;
pub mod errors;
pub mod evaluator;
pub mod generator;
pub mod memory;
pub mod notice;
pub mod policy;
pub mod reading;
pub mod sensor;
pub mod time;
pub mod traits;

// Public API
pub use analyzer::{Analyzer, AnalyzerStats};
pub use errors::{TelemetryError, TelemetryResult};
pub use evaluator::{Alert, EvaluationOutcome, Evaluator};
pub use generator::ReadingGenerator;
pub use notice::AlertNotice;
pub use policy::{Comparator, ThresholdPolicy, ThresholdRule};
pub use reading::Reading;
pub use sensor::SensorType;
pub use traits::{AlertSink, ReadingSource};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
