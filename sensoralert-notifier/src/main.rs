//! SensorAlert notifier
//!
//! One of the alert fanout's consumers: subscribes to the alert topic and
//! logs a readable notice for every alert. Stops on Ctrl-C.

mod config;
mod relay;

use anyhow::{Context, Result};
use log::{info, warn};
use sensoralert_connectors::{AsyncConnector, MqttConnector};

use crate::config::NotifierConfig;
use crate::relay::Relay;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = NotifierConfig::from_env().context("Invalid notifier configuration")?;
    info!(
        "sensoralert-notifier {} listening on {} at {}:{}",
        sensoralert_core::VERSION,
        config.alert_topic,
        config.broker.host,
        config.broker.port
    );

    let mut connector = MqttConnector::start(config.broker.clone())?;
    let mut alerts = connector
        .subscribe(&config.alert_topic)
        .await
        .with_context(|| format!("Failed to subscribe to {}", config.alert_topic))?;

    let mut relay = Relay::new();

    tokio::select! {
        _ = relay.run(&mut alerts, |notice| info!("{}", notice.summary())) => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                warn!("Failed to listen for Ctrl-C: {}", err);
            }
            info!("Shutdown requested");
        }
    }

    let stats = relay.stats();
    info!(
        "Relayed {} of {} alerts ({} unreadable, {} reconnections)",
        stats.delivered,
        stats.received,
        stats.unreadable,
        connector.stats().reconnections
    );

    if let Err(err) = connector.shutdown().await {
        warn!("Disconnect failed: {}", err);
    }

    Ok(())
}
