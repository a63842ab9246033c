use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::SoilReading;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/latest";
pub const DEFAULT_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;

/// Configuration for the consumer-side poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Full URL of the relay's latest-reading endpoint
    pub endpoint: String,
    /// Delay between poll cycles
    pub interval: Duration,
    /// Timeout applied to each outbound fetch
    pub request_timeout: Duration,
    /// Attempts per cycle before reporting a connection failure
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles each retry
    pub initial_backoff: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
        }
    }
}

impl PollConfig {
    /// Build a config from `RELAY_URL` and `POLL_INTERVAL_SECS`, keeping
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("RELAY_URL") {
            config.endpoint = format!("{}/api/latest", base.trim_end_matches('/'));
        }
        if let Some(secs) = std::env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            config.interval = Duration::from_secs(secs);
        }
        config
    }
}

/// Poll-side errors
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("fetch failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: reqwest::Error,
    },
}

/// Handle to a running poll loop.
///
/// The loop fetches the latest reading on a fixed interval and publishes it
/// on a watch channel. Fetches are sequential: a new cycle never overlaps an
/// in-flight request. `stop` cancels the loop and waits for the task, so no
/// timer or request is left dangling after teardown.
pub struct Poller {
    task: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
    latest: watch::Receiver<Option<SoilReading>>,
}

impl Poller {
    /// Spawn the poll loop on the current tokio runtime.
    pub fn spawn(config: PollConfig) -> Result<Self, PollError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(PollError::Client)?;

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (latest_tx, latest_rx) = watch::channel(None);

        let task = tokio::spawn(async move {
            info!(endpoint = %config.endpoint, interval_ms = config.interval.as_millis() as u64, "Poll loop starting");
            let mut ticker = tokio::time::interval(config.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }

                tokio::select! {
                    result = fetch_with_backoff(&client, &config) => match result {
                        Ok(reading) => {
                            let _ = latest_tx.send(Some(reading));
                        }
                        Err(err) => {
                            warn!(error = %err, "Poll cycle failed");
                        }
                    },
                    _ = shutdown_rx.changed() => break,
                }
            }
            info!("Poll loop stopped");
        });

        Ok(Self {
            task,
            shutdown: shutdown_tx,
            latest: latest_rx,
        })
    }

    /// Subscribe to the most recently fetched reading.
    pub fn latest(&self) -> watch::Receiver<Option<SoilReading>> {
        self.latest.clone()
    }

    /// Cancel the loop and wait for the task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Bounded retry with exponential backoff: a fixed number of attempts,
/// doubling the delay after each failure.
async fn fetch_with_backoff(
    client: &reqwest::Client,
    config: &PollConfig,
) -> Result<SoilReading, PollError> {
    let mut delay = config.initial_backoff;
    let mut attempt = 1;
    loop {
        match fetch_once(client, &config.endpoint).await {
            Ok(reading) => return Ok(reading),
            Err(err) if attempt < config.max_attempts => {
                warn!(attempt, error = %err, "Fetch attempt failed, backing off");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(last) => {
                return Err(PollError::RetriesExhausted {
                    attempts: attempt,
                    last,
                })
            }
        }
    }
}

async fn fetch_once(client: &reqwest::Client, endpoint: &str) -> Result<SoilReading, reqwest::Error> {
    client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .json::<SoilReading>()
        .await
}
