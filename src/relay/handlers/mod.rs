pub mod query;
pub mod sensor;

use serde::Serialize;
use warp::http::Response;
use warp::hyper::Body;

use crate::error::ApiError;

/// Build a JSON response with the given status code.
pub(crate) fn json_response<T: Serialize>(
    status: u16,
    payload: &T,
) -> Result<warp::reply::Response, ApiError> {
    let body = serde_json::to_string(payload)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {}", e)))?;

    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
