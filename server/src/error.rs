use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use audio_core::AudioError;

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Speech service error: {0}")]
    Upstream(String),

    #[error("Audio conversion error: {0}")]
    Audio(#[from] AudioError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => {
                tracing::error!("Upstream speech service error: {}", msg);
                (StatusCode::BAD_GATEWAY, format!("Speech service error: {}", msg))
            }
            // Decode, format, and empty-data failures all originate in the
            // payload the remote service handed us.
            ApiError::Audio(e) => {
                tracing::error!("Audio conversion error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Speech service returned unusable audio: {}", e),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.clone(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
