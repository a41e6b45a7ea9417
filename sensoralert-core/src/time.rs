//! Timestamp sources for produced readings
//!
//! Readings carry their timestamp as an RFC 3339 string assigned by the
//! producer. The analyzer never parses it.
//!
//! - `SystemTime`: local wall clock, second precision, with UTC offset
//! - `FixedTime`: a fixed instant for tests, advanced by hand

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

/// Source of timestamps for produced readings
pub trait TimeSource: Send {
    /// Current time as an RFC 3339 string
    fn now_rfc3339(&self) -> String;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now_rfc3339(&self) -> String {
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    instant: DateTime<FixedOffset>,
}

impl FixedTime {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }

    /// Parse an RFC 3339 instant, e.g. `2024-05-01T10:00:00-03:00`
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self::new)
    }

    pub fn advance_secs(&mut self, secs: i64) {
        self.instant += chrono::Duration::seconds(secs);
    }
}

impl TimeSource for FixedTime {
    fn now_rfc3339(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
