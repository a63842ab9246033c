// Relay binary entry point

mod config;
mod error;
mod routes;

// Handlers module
#[path = "relay/handlers/mod.rs"]
mod handlers;

use std::sync::Arc;

use tracing::info;

use config::Config;
use routes::AppState;
use soil_relay::store::LatestReadingSlot;
use soil_relay::time::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    info!(
        port = config.port,
        cors_allowed_origin = %config.cors_allowed_origin,
        "Soil relay starting"
    );

    let state = AppState {
        slot: Arc::new(LatestReadingSlot::new()),
        clock: Arc::new(SystemClock::new()),
    };

    let filter = routes::routes(state, &config.cors_allowed_origin);
    warp::serve(filter).run(config.listen_addr()).await;

    Ok(())
}
