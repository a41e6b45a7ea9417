//! Synthetic reading generator used by the producer
//!
//! Values are drawn uniformly from a per-kind range that straddles the alert
//! threshold, so a running producer exercises both the normal and the alert
//! path of the analyzer.
//!
//! | type        | range           | threshold |
//! |-------------|-----------------|-----------|
//! | temperature | [45, 55) °C     | 50        |
//! | pressure    | [900, 1100) hPa | 1050      |
//! | vibration   | [0, 5) m/s²     | 3.0       |

use core::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::sensors::*;
use crate::reading::Reading;
use crate::sensor::SensorType;
use crate::time::{SystemTime, TimeSource};

/// Value range sampled for a sensor kind
pub fn synthetic_range(kind: SensorType) -> Range<f64> {
    match kind {
        SensorType::Temperature => TEMPERATURE_SYNTHETIC_MIN_C..TEMPERATURE_SYNTHETIC_MAX_C,
        SensorType::Pressure => PRESSURE_SYNTHETIC_MIN_HPA..PRESSURE_SYNTHETIC_MAX_HPA,
        SensorType::Vibration => VIBRATION_SYNTHETIC_MIN_M_S2..VIBRATION_SYNTHETIC_MAX_M_S2,
    }
}

/// Produces readings for one simulated sensor
pub struct ReadingGenerator<T: TimeSource = SystemTime> {
    kind: SensorType,
    place: String,
    rng: StdRng,
    clock: T,
}

impl ReadingGenerator<SystemTime> {
    /// Generator seeded from OS entropy, stamped with the local clock
    pub fn new(kind: SensorType, place: &str) -> Self {
        Self::with_clock(kind, place, SystemTime, StdRng::from_entropy())
    }
}

impl<T: TimeSource> ReadingGenerator<T> {
    pub fn with_clock(kind: SensorType, place: &str, clock: T, rng: StdRng) -> Self {
        Self {
            kind,
            place: place.trim().to_string(),
            rng,
            clock,
        }
    }

    /// Reproducible generator for tests
    pub fn with_seed(kind: SensorType, place: &str, clock: T, seed: u64) -> Self {
        Self::with_clock(kind, place, clock, StdRng::seed_from_u64(seed))
    }

    pub fn kind(&self) -> SensorType {
        self.kind
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }

    /// Draw the next reading
    pub fn next_reading(&mut self) -> Reading {
        let value = self.rng.gen_range(synthetic_range(self.kind));
        Reading::new(value, self.kind.name(), self.clock.now_rfc3339(), self.place.clone())
    }
}

impl<T: TimeSource> Iterator for ReadingGenerator<T> {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        Some(self.next_reading())
    }
}
