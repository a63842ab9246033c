// Device simulator binary entry point
//
// Plays the role of the IoT device: posts a synthetic sensor payload to the
// relay on a fixed interval, using the same key aliases the firmware sends.

use std::time::Duration;

use anyhow::Context;
use rand::Rng;
use serde_json::{json, Value};
use tracing::{info, warn};

const DEFAULT_RELAY_URL: &str = "http://localhost:3000";
const DEFAULT_PUSH_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone)]
struct SimulatorConfig {
    relay_url: String,
    push_interval: Duration,
}

impl SimulatorConfig {
    fn from_env() -> anyhow::Result<Self> {
        let relay_url =
            std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());

        let interval_secs = match std::env::var("PUSH_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("PUSH_INTERVAL_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_PUSH_INTERVAL_SECS,
        };

        Ok(Self {
            relay_url,
            push_interval: Duration::from_secs(interval_secs),
        })
    }

    fn sensor_endpoint(&self) -> String {
        format!("{}/api/sensor", self.relay_url.trim_end_matches('/'))
    }
}

/// Plausible garden-bed values with some jitter, keyed the way the ESP
/// firmware posts them.
fn synthetic_payload(rng: &mut impl Rng) -> Value {
    json!({
        "moist": rng.gen_range(35.0..75.0),
        "suhu": rng.gen_range(18.0..28.0),
        "n": rng.gen_range(20.0..90.0),
        "p": rng.gen_range(20.0..90.0),
        "k": rng.gen_range(30.0..95.0),
        "pH": rng.gen_range(5.5..7.5),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = SimulatorConfig::from_env()?;
    let endpoint = config.sensor_endpoint();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("failed to build HTTP client")?;

    info!(
        endpoint = %endpoint,
        interval_secs = config.push_interval.as_secs(),
        "Device simulator starting"
    );

    let mut ticker = tokio::time::interval(config.push_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Device simulator stopping");
                break;
            }
            _ = ticker.tick() => {}
        }

        let payload = synthetic_payload(&mut rand::thread_rng());
        match client.post(&endpoint).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!(status = %response.status(), "Reading pushed");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Relay rejected reading");
            }
            Err(err) => {
                warn!(error = %err, "Failed to reach relay");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_endpoint_normalizes_trailing_slash() {
        let config = SimulatorConfig {
            relay_url: "http://localhost:3000/".to_string(),
            push_interval: Duration::from_secs(5),
        };
        assert_eq!(config.sensor_endpoint(), "http://localhost:3000/api/sensor");
    }

    #[test]
    fn test_synthetic_payload_uses_device_keys() {
        let payload = synthetic_payload(&mut rand::thread_rng());
        for key in ["moist", "suhu", "n", "p", "k", "pH"] {
            assert!(payload.get(key).is_some(), "missing key {}", key);
        }
        assert!(payload["moist"].as_f64().unwrap() >= 35.0);
        assert!(payload["pH"].as_f64().unwrap() < 7.5);
    }
}
