//! API error types and JSON response formatting.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::StoreError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details in the response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Required request field missing or malformed.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
    }

    /// Ident token already bound to a different player.
    pub fn ident_conflict(ident: &str, bound_to: &str) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            "IDENT_CONFLICT",
            format!("Ident '{}' is already bound to a different player", ident),
        )
        .with_details(serde_json::json!({ "ident": ident, "boundTo": bound_to }))
    }

    /// No saves stored for the requested player.
    pub fn player_not_found(player_id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "PLAYER_NOT_FOUND",
            format!("No saves found for player '{}'", player_id),
        )
        .with_details(serde_json::json!({ "playerId": player_id }))
    }

    /// Ident token not bound to any player.
    pub fn ident_not_found(ident: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "IDENT_NOT_FOUND",
            format!("Ident '{}' is not bound to any player", ident),
        )
        .with_details(serde_json::json!({ "ident": ident }))
    }

    /// Durable read or write failure.
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILURE", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::MissingField(field) => {
                Self::invalid_input(format!("Missing required field: {}", field))
                    .with_details(serde_json::json!({ "field": field }))
            }
            StoreError::InvalidTimestamp(msg) => {
                Self::invalid_input(format!("Invalid timestamp: {}", msg))
            }
            StoreError::IdentConflict { ident, bound_to } => {
                Self::ident_conflict(ident, bound_to)
            }
            StoreError::PlayerNotFound(player_id) => Self::player_not_found(player_id),
            StoreError::IdentNotFound(ident) => Self::ident_not_found(ident),
            _ => Self::storage_failure(err.to_string()),
        }
    }
}
