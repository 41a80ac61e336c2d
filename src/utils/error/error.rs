//! Error handling for scanhub
//!
//! This module defines all error types used throughout the service.

#![allow(missing_docs)]

use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for scanhub
pub type Result<T> = std::result::Result<T, HubError>;

/// Machine-readable reason attached to an authorization denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DenialCode {
    /// The caller's roles grant none of the rules declared for the operation
    #[serde(rename = "missingPrivileges")]
    MissingPrivileges,
    /// The caller may see the resource but not perform this action on it
    #[serde(rename = "forbiddenAction")]
    ForbiddenAction,
}

impl DenialCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialCode::MissingPrivileges => "missingPrivileges",
            DenialCode::ForbiddenAction => "forbiddenAction",
        }
    }
}

impl std::fmt::Display for DenialCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for scanhub
#[derive(Error, Debug)]
pub enum HubError {
    /// Configuration errors, including malformed grant tables
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors (missing, invalid or expired credential)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Authorization errors (valid credential, no rule satisfied)
    #[error("Authorization error: {message}")]
    Authorization { code: DenialCode, message: String },

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for HubError {
    fn error_response(&self) -> HttpResponse {
        self.response_with_request_id(None)
    }
}

impl HubError {
    /// Render the error body, tagged with the request id when known
    pub fn response_with_request_id(&self, request_id: Option<String>) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            HubError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Service is misconfigured".to_string(),
            ),
            HubError::Database(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            HubError::Auth(_) | HubError::Jwt(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "AUTH_ERROR",
                "Authentication required: missing, invalid or expired credential".to_string(),
            ),
            HubError::Authorization { code, message } => (
                actix_web::http::StatusCode::FORBIDDEN,
                code.as_str(),
                message.clone(),
            ),
            HubError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            HubError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            HubError::Conflict(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "CONFLICT",
                self.to_string(),
            ),
            HubError::BadRequest(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                self.to_string(),
            ),
            HubError::Timeout(_) => (
                actix_web::http::StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

/// Helper functions for creating specific errors
impl HubError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn missing_privileges<S: Into<String>>(message: S) -> Self {
        Self::Authorization {
            code: DenialCode::MissingPrivileges,
            message: message.into(),
        }
    }

    pub fn forbidden_action<S: Into<String>>(message: S) -> Self {
        Self::Authorization {
            code: DenialCode::ForbiddenAction,
            message: message.into(),
        }
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Denial code, if this is an authorization failure
    pub fn denial_code(&self) -> Option<DenialCode> {
        match self {
            HubError::Authorization { code, .. } => Some(*code),
            _ => None,
        }
    }
}
