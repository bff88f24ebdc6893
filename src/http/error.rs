//! Maps crate errors to HTTP status codes and a JSON error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::CalChatError;

impl IntoResponse for CalChatError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            CalChatError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            CalChatError::UnknownFunction(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_FUNCTION"),
            CalChatError::InvalidArguments(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS"),
            CalChatError::Provider { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            CalChatError::NetworkError(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            CalChatError::Model { .. } => (StatusCode::BAD_GATEWAY, "MODEL_ERROR"),
            CalChatError::RoundLimitExceeded(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ROUND_LIMIT_EXCEEDED")
            }
            CalChatError::ConfigError(_)
            | CalChatError::JsonError(_)
            | CalChatError::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
