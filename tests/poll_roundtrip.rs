//! Integration Test: Poll Loop
//!
//! Runs the consumer-side poll loop against a live local endpoint and
//! verifies that readings arrive on the watch channel, that the newest
//! reading wins, and that stopping the loop tears the task down cleanly.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use warp::Filter;

use soil_relay::domain::SoilReading;
use soil_relay::poll::{PollConfig, Poller};

fn reading(nitrogen: f64) -> SoilReading {
    SoilReading {
        nitrogen,
        phosphorus: 45.0,
        potassium: 200.0,
        moisture: 65.0,
        ph: 6.5,
        temperature: 23.0,
        timestamp: "2024-01-15T10:30:00+00:00".to_string(),
    }
}

/// Bind a throwaway server on an ephemeral port that serves whatever
/// reading is currently in the watch channel.
async fn serve_latest(
    source: watch::Receiver<SoilReading>,
) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    let source = Arc::new(source);
    let route = warp::get()
        .and(warp::path!("api" / "latest"))
        .map(move || warp::reply::json(&source.borrow().clone()));

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    let handle = tokio::spawn(server);
    (addr, handle)
}

fn fast_config(addr: std::net::SocketAddr) -> PollConfig {
    PollConfig {
        endpoint: format!("http://{}/api/latest", addr),
        interval: Duration::from_millis(20),
        request_timeout: Duration::from_secs(1),
        max_attempts: 2,
        initial_backoff: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn test_poller_receives_latest_reading() {
    let (_tx, rx) = watch::channel(reading(150.0));
    let (addr, server) = serve_latest(rx).await;

    let poller = Poller::spawn(fast_config(addr)).unwrap();
    let mut latest = poller.latest();

    tokio::time::timeout(Duration::from_secs(5), latest.changed())
        .await
        .expect("poll cycle should complete")
        .expect("sender should still be alive");

    let received = latest.borrow().clone().expect("reading should be present");
    assert_eq!(received.nitrogen, 150.0);
    assert_eq!(received.ph, 6.5);

    poller.stop().await;
    server.abort();
}

#[tokio::test]
async fn test_poller_tracks_newest_reading() {
    let (tx, rx) = watch::channel(reading(150.0));
    let (addr, server) = serve_latest(rx).await;

    let poller = Poller::spawn(fast_config(addr)).unwrap();
    let mut latest = poller.latest();

    tokio::time::timeout(Duration::from_secs(5), latest.changed())
        .await
        .expect("first poll cycle should complete")
        .expect("sender should still be alive");
    assert_eq!(latest.borrow().clone().unwrap().nitrogen, 150.0);

    // The device posts again; subsequent cycles must surface the new value.
    tx.send(reading(42.0)).unwrap();
    let updated = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            latest.changed().await.expect("sender should still be alive");
            let current = latest.borrow().clone().unwrap();
            if current.nitrogen == 42.0 {
                return current;
            }
        }
    })
    .await
    .expect("updated reading should arrive");

    assert_eq!(updated.nitrogen, 42.0);

    poller.stop().await;
    server.abort();
}

#[tokio::test]
async fn test_failed_cycles_leave_channel_empty() {
    // No server is listening: cycles fail and nothing is published.
    let config = PollConfig {
        endpoint: "http://127.0.0.1:9/api/latest".to_string(),
        interval: Duration::from_millis(20),
        request_timeout: Duration::from_millis(200),
        max_attempts: 1,
        initial_backoff: Duration::from_millis(1),
    };
    let poller = Poller::spawn(config).unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(poller.latest().borrow().is_none());

    tokio::time::timeout(Duration::from_secs(5), poller.stop())
        .await
        .expect("stop should not hang");
}
