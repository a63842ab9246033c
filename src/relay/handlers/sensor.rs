use std::convert::Infallible;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use warp::hyper::body::Bytes;

use crate::error::{ApiError, ValidationError};
use crate::handlers::json_response;
use crate::routes::AppState;
use soil_relay::domain::SoilReading;
use soil_relay::normalize::{normalize, reject_wrong_types, IngestPayload};

/// Response payload for POST /api/sensor
///
/// Acknowledges the push and echoes the reading as stored, so a device can
/// see which of its values survived normalization.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    pub message: &'static str,
    pub reading: SoilReading,
}

/// Handle POST /api/sensor requests for device ingest
///
/// Parses the body, rejects transport-level type errors, normalizes the
/// payload against the last-known-good reading, and replaces the slot
/// wholesale. Out-of-range or missing sensor values never cause a
/// rejection; they are substituted and logged.
pub async fn handle_ingest(body: Bytes, state: AppState) -> Result<warp::reply::Response, Infallible> {
    let request_id = Uuid::new_v4().to_string();
    match ingest(&body, &state, &request_id) {
        Ok(response) => Ok(response),
        Err(api_error) => {
            warn!(
                request_id = %request_id,
                error = %api_error,
                "Ingest rejected"
            );
            Ok(api_error.to_http_response(&request_id))
        }
    }
}

fn ingest(body: &Bytes, state: &AppState, request_id: &str) -> Result<warp::reply::Response, ApiError> {
    // Step 1: parse the body; anything that is not a JSON object fails here
    let payload: IngestPayload = serde_json::from_slice(body).map_err(|e| {
        ValidationError::InvalidBody(format!("Failed to parse JSON: {}", e))
    })?;

    // Step 2: reject structurally wrong field types at the transport layer
    reject_wrong_types(&payload)
        .map_err(|e| ValidationError::InvalidValue(format!("{}: expected a number, got {}", e.field, e.kind)))?;

    // Step 3: normalize against the last-known-good reading
    let previous = state.slot.read_latest();
    let (reading, report) = normalize(&payload, previous.as_ref(), state.clock.as_ref());
    if report.fallback_count() > 0 {
        warn!(
            request_id = %request_id,
            fallbacks = report.fallback_count(),
            detail = %report,
            "Sensor values substituted during normalization"
        );
    }

    // Step 4: replace the slot wholesale (last-write-wins)
    state.slot.write(reading.clone());
    info!(
        request_id = %request_id,
        moisture = reading.moisture,
        temperature = reading.temperature,
        nitrogen = reading.nitrogen,
        phosphorus = reading.phosphorus,
        potassium = reading.potassium,
        ph = reading.ph,
        "Reading stored"
    );

    // Step 5: acknowledge
    json_response(
        200,
        &IngestResponse {
            message: "reading accepted",
            reading,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use soil_relay::store::LatestReadingSlot;
    use soil_relay::time::FixedClock;

    fn test_state() -> AppState {
        AppState {
            slot: Arc::new(LatestReadingSlot::new()),
            clock: Arc::new(FixedClock::from_rfc3339("2024-01-15T10:30:00Z").unwrap()),
        }
    }

    #[tokio::test]
    async fn test_ingest_stores_normalized_reading() {
        let state = test_state();
        let body = Bytes::from(r#"{"moist": 65, "suhu": 23, "n": 150, "p": 45, "k": 200, "pH": 6.5}"#);

        let response = handle_ingest(body, state.clone()).await.unwrap();
        assert_eq!(response.status(), 200);

        let stored = state.slot.read_latest().unwrap();
        assert_eq!(stored.nitrogen, 150.0);
        assert_eq!(stored.timestamp, "2024-01-15T10:30:00+00:00");
    }

    #[tokio::test]
    async fn test_ingest_empty_body_is_rejected() {
        let state = test_state();
        let response = handle_ingest(Bytes::new(), state.clone()).await.unwrap();

        assert_eq!(response.status(), 400);
        assert!(state.slot.read_latest().is_none());
    }

    #[tokio::test]
    async fn test_ingest_array_body_is_rejected() {
        let state = test_state();
        let response = handle_ingest(Bytes::from("[1, 2, 3]"), state.clone()).await.unwrap();

        assert_eq!(response.status(), 400);
        assert!(state.slot.read_latest().is_none());
    }

    #[tokio::test]
    async fn test_ingest_unknown_keys_are_ignored() {
        let state = test_state();
        let body = Bytes::from(r#"{"moist": 65, "firmware": "1.0.16"}"#);

        let response = handle_ingest(body, state.clone()).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(state.slot.read_latest().unwrap().moisture, 65.0);
    }
}
