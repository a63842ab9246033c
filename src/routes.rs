use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use soil_relay::store::LatestReadingSlot;
use soil_relay::time::Clock;

use crate::handlers;

/// Shared state injected into every handler.
///
/// The reading slot is owned here and nowhere else; handlers receive a
/// clone of the handles, never the slot itself.
#[derive(Clone)]
pub struct AppState {
    pub slot: Arc<LatestReadingSlot>,
    pub clock: Arc<dyn Clock>,
}

/// Build the relay's filter tree.
///
/// Routes: POST /api/sensor (device ingest), GET /api/latest,
/// GET /api/recommendations, GET /health. CORS is applied across the board
/// for the configured dashboard origin.
pub fn routes(
    state: AppState,
    cors_allowed_origin: &str,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let ingest = warp::post()
        .and(warp::path!("api" / "sensor"))
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handlers::sensor::handle_ingest);

    let latest = warp::get()
        .and(warp::path!("api" / "latest"))
        .and(with_state(state.clone()))
        .and_then(handlers::query::handle_latest);

    let recommendations = warp::get()
        .and(warp::path!("api" / "recommendations"))
        .and(with_state(state))
        .and_then(handlers::query::handle_recommendations);

    let health = warp::get()
        .and(warp::path!("health"))
        .and_then(handlers::query::handle_health);

    let cors = if cors_allowed_origin == "*" {
        warp::cors().allow_any_origin()
    } else {
        warp::cors().allow_origin(cors_allowed_origin)
    }
    .allow_methods(vec!["GET", "POST", "OPTIONS"])
    .allow_headers(vec!["content-type"]);

    ingest.or(latest).or(recommendations).or(health).with(cors)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}
