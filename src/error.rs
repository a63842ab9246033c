use thiserror::Error;
use warp::http::Response;
use warp::hyper::Body;

use soil_relay::error::{error_codes, ErrorResponse};

/// Main error type for the relay API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Transport-level validation errors. Everything here results in a 400;
/// out-of-range sensor values never land here (they are substituted by the
/// normalizer instead).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid value for field: {0}")]
    InvalidValue(String),
}

impl ApiError {
    /// Convert error to HTTP response with appropriate status code and error payload
    pub fn to_http_response(&self, request_id: &str) -> warp::reply::Response {
        let (status, error_code, message): (u16, &str, String) = match self {
            ApiError::Validation(ValidationError::InvalidBody(msg)) => {
                (400, error_codes::INVALID_FORMAT, msg.clone())
            }
            ApiError::Validation(ValidationError::InvalidValue(detail)) => (
                400,
                error_codes::INVALID_VALUE,
                format!("Invalid value for field: {}", detail),
            ),
            ApiError::Internal(_) => (
                500,
                error_codes::INTERNAL_ERROR,
                "Internal server error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse::new(error_code, &message, request_id);

        let body = error_response.to_json().unwrap_or_else(|_| {
            r#"{"error":"INTERNAL_ERROR","message":"Failed to serialize error response","request_id":""}"#
                .to_string()
        });

        Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Body::from(
                        r#"{"error":"INTERNAL_ERROR","message":"Failed to build response"}"#,
                    ))
                    .unwrap()
            })
    }
}
