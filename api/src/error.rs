//! Unified error types for the microblog API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)
//! - `ConfigError`: Startup configuration errors

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid API Key")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Error response body, mirrors the success envelope's `result` flag
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub result: bool,
    pub error_type: &'static str,
    pub error_message: String,
}

const SERVER_ERROR_MESSAGE: &str = "Internal server error";

impl AppError {
    /// HTTP status, `error_type` tag and client-visible message for this error
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Domain(DomainError::NotFound(msg)) | AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "not_found", msg.clone())
            }
            AppError::Domain(DomainError::AlreadyExists(msg))
            | AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "conflict", msg.clone())
            }
            AppError::Domain(DomainError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::Domain(DomainError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Invalid API Key".to_string(),
            ),
            AppError::Domain(DomainError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "forbidden", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg.clone())
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Domain(DomainError::Internal(msg)) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, error_message) = self.parts();

        let body = Json(ErrorResponse {
            result: false,
            error_type,
            error_message,
        });

        (status, body).into_response()
    }
}

impl AppError {
    /// A request an extractor refused. Only an oversized body keeps its own status.
    fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        Self::rejected(e.status(), e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::Domain(DomainError::NotFound("Tweet not found".to_string()));
        let (status, error_type, message) = err.parts();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_type, "not_found");
        assert_eq!(message, "Tweet not found");
    }

    #[test]
    fn conflict_and_already_exists_share_409() {
        let conflict = AppError::Domain(DomainError::Conflict("Tweet already liked".to_string()));
        let exists = AppError::Domain(DomainError::AlreadyExists("name taken".to_string()));

        assert_eq!(conflict.parts().0, StatusCode::CONFLICT);
        assert_eq!(exists.parts().0, StatusCode::CONFLICT);
        assert_eq!(exists.parts().1, "conflict");
    }

    #[test]
    fn forbidden_keeps_message() {
        let err = AppError::Domain(DomainError::Forbidden(
            "You are not authorized to delete this tweet".to_string(),
        ));
        let (status, error_type, message) = err.parts();

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_type, "forbidden");
        assert!(message.contains("not authorized"));
    }

    #[test]
    fn database_error_hides_details() {
        let err = AppError::Domain(DomainError::Database(
            "relation \"tweets\" does not exist".to_string(),
        ));
        let (status, error_type, message) = err.parts();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_type, "server_error");
        assert!(!message.contains("tweets"));
    }

    #[test]
    fn unauthorized_message() {
        let (status, error_type, message) = AppError::Unauthorized.parts();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_type, "unauthorized");
        assert_eq!(message, "Invalid API Key");
    }

    #[test]
    fn oversized_body_keeps_413() {
        let err = AppError::rejected(StatusCode::PAYLOAD_TOO_LARGE, "limit".to_string());
        let (status, error_type, _) = err.parts();
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error_type, "payload_too_large");

        let err = AppError::rejected(StatusCode::UNPROCESSABLE_ENTITY, "missing field".to_string());
        let (status, error_type, message) = err.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_type, "bad_request");
        assert_eq!(message, "missing field");
    }

    #[test]
    fn serialize_error_response() {
        let body = ErrorResponse {
            result: false,
            error_type: "not_found",
            error_message: "Media not found".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["result"], false);
        assert_eq!(json["error_type"], "not_found");
        assert_eq!(json["error_message"], "Media not found");
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::Missing("DATABASE_URL").to_string(),
            "DATABASE_URL must be set"
        );

        let invalid = ConfigError::Invalid {
            name: "PORT",
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert!(invalid.to_string().starts_with("PORT has an invalid value 'abc'"));
    }
}
