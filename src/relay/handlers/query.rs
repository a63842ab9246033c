use std::convert::Infallible;

use tracing::info;
use uuid::Uuid;

use crate::handlers::json_response;
use crate::routes::AppState;
use soil_relay::catalog::catalog;
use soil_relay::domain::SoilReading;
use soil_relay::recommend::recommend;

/// Handle GET /api/latest
///
/// Serves the latest normalized reading, or the all-zero baseline before
/// the first ingest so consumers always have something to render.
pub async fn handle_latest(state: AppState) -> Result<warp::reply::Response, Infallible> {
    let request_id = Uuid::new_v4().to_string();
    let (reading, from_baseline) = latest_or_baseline(&state);

    info!(
        request_id = %request_id,
        from_baseline,
        timestamp = %reading.timestamp,
        "Serving latest reading"
    );

    Ok(json_response(200, &reading).unwrap_or_else(|e| e.to_http_response(&request_id)))
}

/// Handle GET /api/recommendations
///
/// Computes the plant recommendation list from the latest reading and the
/// static catalog, in catalog order.
pub async fn handle_recommendations(state: AppState) -> Result<warp::reply::Response, Infallible> {
    let request_id = Uuid::new_v4().to_string();
    let (reading, from_baseline) = latest_or_baseline(&state);
    let matches = recommend(&reading, catalog());

    info!(
        request_id = %request_id,
        from_baseline,
        match_count = matches.len(),
        "Serving recommendations"
    );

    Ok(json_response(200, &matches).unwrap_or_else(|e| e.to_http_response(&request_id)))
}

/// Handle GET /health
///
/// Returns a simple JSON response indicating the service is healthy.
pub async fn handle_health() -> Result<warp::reply::Response, Infallible> {
    let request_id = Uuid::new_v4().to_string();
    let body = serde_json::json!({
        "status": "healthy",
        "service": "soil-relay",
        "request_id": request_id
    });

    Ok(json_response(200, &body).unwrap_or_else(|e| e.to_http_response(&request_id)))
}

fn latest_or_baseline(state: &AppState) -> (SoilReading, bool) {
    match state.slot.read_latest() {
        Some(reading) => (reading, false),
        None => (SoilReading::baseline(state.clock.now_rfc3339()), true),
    }
}
