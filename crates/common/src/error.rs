use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Could not generate valid Secret Santa assignments after {attempts} attempts")]
    AssignmentExhausted { attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::AssignmentExhausted { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to assign Secret Santa",
                    "details": self.to_string(),
                }),
            ),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            AppError::Timeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                AppError::AssignmentExhausted { attempts: 100 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Timeout("x".into()), StatusCode::GATEWAY_TIMEOUT),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_invalid_input_message_is_verbatim() {
        let err = AppError::InvalidInput("At least 3 participants are required".into());
        assert_eq!(err.to_string(), "At least 3 participants are required");
    }
}
