//! Alert payloads to notices
//!
//! Every payload on the alert topic is a reading that already crossed its
//! threshold, so nothing is evaluated again here. Payloads that do not
//! decode are logged and skipped.

use log::warn;
use sensoralert_core::{AlertNotice, Reading, ReadingSource};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayStats {
    /// Payloads pulled from the alert subscription
    pub received: u64,
    /// Notices handed to the delivery callback
    pub delivered: u64,
    /// Payloads that were not a reading
    pub unreadable: u64,
}

#[derive(Debug, Default)]
pub struct Relay {
    stats: RelayStats,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// Render one raw alert payload
    pub fn handle(&mut self, raw: &[u8]) -> Option<AlertNotice> {
        self.stats.received += 1;

        match Reading::decode(raw) {
            Ok(reading) => {
                self.stats.delivered += 1;
                Some(AlertNotice::from_reading(&reading))
            }
            Err(err) => {
                self.stats.unreadable += 1;
                warn!("Skipping unreadable alert {:?}: {}", String::from_utf8_lossy(raw), err);
                None
            }
        }
    }

    /// Deliver a notice per alert until the source ends
    pub async fn run<S, F>(&mut self, source: &mut S, mut deliver: F) -> RelayStats
    where
        S: ReadingSource + ?Sized,
        F: FnMut(&AlertNotice) + Send,
    {
        while let Some(raw) = source.next_message().await {
            if let Some(notice) = self.handle(&raw) {
                deliver(&notice);
            }
        }
        self.stats.clone()
    }
}
