//! SensorAlert producer
//!
//! Simulates one sensor: every interval it draws a reading for the
//! configured sensor type and publishes it to the sensor topic. Publish
//! failures are logged and the next tick tries again. Stops on Ctrl-C.

mod config;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use sensoralert_connectors::{AsyncConnector, MqttConnector};
use sensoralert_core::{Reading, ReadingGenerator};

use crate::config::ProducerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ProducerConfig::from_env().context("Invalid producer configuration")?;
    info!(
        "sensoralert-producer {} sending {} readings to {} every {}s",
        sensoralert_core::VERSION,
        config.sensor_type,
        config.sensor_topic,
        config.interval.as_secs()
    );

    let mut connector = MqttConnector::start(config.broker.clone())?;
    let mut generator = ReadingGenerator::new(config.sensor_type, &config.place);
    let mut ticker = tokio::time::interval(config.interval);
    let mut published: u64 = 0;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reading = generator.next_reading();
                if publish(&mut connector, &config.sensor_topic, &reading).await {
                    published += 1;
                }
            }
            signal = &mut shutdown => {
                if let Err(err) = signal {
                    warn!("Failed to listen for Ctrl-C: {}", err);
                }
                info!("Shutdown requested");
                break;
            }
        }
    }

    let stats = connector.stats();
    info!(
        "Published {} readings ({} failed, {} bytes)",
        published, stats.messages_failed, stats.bytes_sent
    );

    if let Err(err) = connector.shutdown().await {
        warn!("Disconnect failed: {}", err);
    }

    Ok(())
}

/// Encode and publish one reading; failures are logged, never fatal
async fn publish(connector: &mut MqttConnector, topic: &str, reading: &Reading) -> bool {
    let payload = match reading.encode() {
        Ok(payload) => payload,
        Err(err) => {
            error!("Failed to encode reading: {}", err);
            return false;
        }
    };

    match connector.send(topic, &payload).await {
        Ok(()) => {
            info!(
                "Sent {} {:.2} at {:?} ({})",
                reading.sensor_type, reading.value, reading.place, reading.timestamp
            );
            debug!("Payload: {}", String::from_utf8_lossy(&payload));
            true
        }
        Err(err) => {
            error!("Failed to publish reading to {}: {}", topic, err);
            false
        }
    }
}
