//! Service error types with HTTP status code mapping.
//!
//! [`ArenaError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Admission precondition violations are all-or-nothing: a returned error
//! guarantees no state was mutated.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "insufficient payment: required 1000000000000000, got 42",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category               | HTTP Status                 |
/// |-----------|------------------------|-----------------------------|
/// | 1000–1999 | Validation             | 400 Bad Request             |
/// | 2000–2999 | State / Not Found      | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server                 | 500 Internal Server Error   |
/// | 4000–4999 | Admission precondition | 403 Forbidden / 422 Unprocessable Entity |
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Shape with the given ID was not found in the registry.
    #[error("shape not found: {0}")]
    ShapeNotFound(uuid::Uuid),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Caller is not the owner of the shape it tried to act on.
    #[error("caller is not the owner of shape {0}")]
    NotShapeOwner(uuid::Uuid),

    /// Payment attached to the call is below the required minimum.
    #[error("insufficient payment: required {required}, got {provided}")]
    InsufficientPayment {
        /// Minimum amount the operation requires.
        required: u128,
        /// Amount the caller attached.
        provided: u128,
    },

    /// Shape is already in the fight pool and cannot enter again.
    #[error("shape {0} is already awaiting a random fight")]
    AlreadyAwaitingFight(uuid::Uuid),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ArenaError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ShapeNotFound(_) => 2001,
            Self::AlreadyAwaitingFight(_) => 2002,
            Self::NotShapeOwner(_) => 4001,
            Self::InsufficientPayment { .. } => 4002,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ShapeNotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyAwaitingFight(_) => StatusCode::CONFLICT,
            Self::NotShapeOwner(_) => StatusCode::FORBIDDEN,
            Self::InsufficientPayment { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ArenaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn precondition_violations_map_to_client_errors() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(
            ArenaError::ShapeNotFound(id).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ArenaError::NotShapeOwner(id).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ArenaError::AlreadyAwaitingFight(id).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ArenaError::InsufficientPayment {
                required: 100,
                provided: 1
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn server_failures_map_to_500() {
        assert_eq!(
            ArenaError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ArenaError::PersistenceError("db down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_codes_are_stable() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(ArenaError::InvalidRequest(String::new()).error_code(), 1001);
        assert_eq!(ArenaError::ShapeNotFound(id).error_code(), 2001);
        assert_eq!(ArenaError::AlreadyAwaitingFight(id).error_code(), 2002);
        assert_eq!(ArenaError::NotShapeOwner(id).error_code(), 4001);
        assert_eq!(
            ArenaError::InsufficientPayment {
                required: 0,
                provided: 0
            }
            .error_code(),
            4002
        );
    }

    #[test]
    fn error_response_exposes_a_schema() {
        let schema = <ErrorResponse as utoipa::PartialSchema>::schema();
        let json = serde_json::to_value(&schema).unwrap_or_default();
        assert!(json.to_string().contains("error"));

        let body_schema = <ErrorBody as utoipa::PartialSchema>::schema();
        let body_json = serde_json::to_value(&body_schema).unwrap_or_default();
        assert!(body_json.to_string().contains("code"));
    }

    #[test]
    fn insufficient_payment_message_names_amounts() {
        let err = ArenaError::InsufficientPayment {
            required: 1_000,
            provided: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("1000"));
        assert!(msg.contains("42"));
    }
}
