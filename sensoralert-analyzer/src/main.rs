//! SensorAlert analyzer
//!
//! Subscribes to the sensor topic, evaluates every reading against the
//! standard threshold policy and republishes breaches to the alert topic.
//! Runs until the broker subscription ends or Ctrl-C.

mod config;

use anyhow::{Context, Result};
use log::{info, warn};
use sensoralert_connectors::{AsyncConnector, MqttConnector};
use sensoralert_core::{Analyzer, Evaluator};

use crate::config::AnalyzerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalyzerConfig::from_env().context("Invalid analyzer configuration")?;
    info!(
        "sensoralert-analyzer {} consuming {} from {}:{}",
        sensoralert_core::VERSION,
        config.sensor_topic,
        config.broker.host,
        config.broker.port
    );

    let mut connector = MqttConnector::start(config.broker.clone())?;
    let mut readings = connector
        .subscribe(&config.sensor_topic)
        .await
        .with_context(|| format!("Failed to subscribe to {}", config.sensor_topic))?;

    let evaluator = Evaluator::default();
    for (sensor_type, rule) in evaluator.policy().iter() {
        info!(
            "Rule: {} {} {} {}",
            sensor_type,
            rule.comparator().symbol(),
            rule.threshold(),
            rule.unit()
        );
    }

    let mut analyzer = Analyzer::new(evaluator, config.alert_topic.as_str());

    tokio::select! {
        _ = analyzer.run(&mut readings, &mut connector) => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                warn!("Failed to listen for Ctrl-C: {}", err);
            }
            info!("Shutdown requested");
        }
    }

    let stats = analyzer.stats();
    info!(
        "Processed {} readings: {} normal, {} alerts ({} published), {} decode errors, {} unknown types, {} publish failures",
        stats.received,
        stats.normal,
        stats.alerts_detected(),
        stats.alerts_published,
        stats.decode_errors,
        stats.unknown_sensor_types,
        stats.transport_errors
    );

    let transport = connector.stats();
    info!(
        "Broker traffic: {} received, {} sent, {} reconnections",
        transport.messages_received, transport.messages_sent, transport.reconnections
    );

    if let Err(err) = connector.shutdown().await {
        warn!("Disconnect failed: {}", err);
    }

    Ok(())
}
