//! HTTP boundary error type.
//!
//! Every service error is converted into [`AppError`] through an exhaustive
//! `From` impl, and [`AppError`] renders the failure envelope
//! `{"error": "<code>", "message": "..."}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::services::{AccountError, CredentialError, ListingError};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    Unauthorized { message: String },
    Forbidden { message: String },
    NotFound { message: String },
    Conflict { message: String },
    /// `details` is logged and never sent to the client.
    Internal { message: String, details: String },
    Unavailable { details: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details: details.into(),
        }
    }
    pub fn unavailable(details: impl Into<String>) -> Self {
        Self::Unavailable {
            details: details.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message) = match self {
            AppError::Validation { message } => ("bad_request", message),
            AppError::Unauthorized { message } => ("unauthorized", message),
            AppError::Forbidden { message } => ("forbidden", message),
            AppError::NotFound { message } => ("not_found", message),
            AppError::Conflict { message } => ("conflict", message),
            AppError::Internal { message, details } => {
                tracing::error!(details = %details, "{message}");
                ("internal_error", message)
            }
            AppError::Unavailable { details } => {
                tracing::error!(details = %details, "Store unavailable");
                (
                    "service_unavailable",
                    "Service temporarily unavailable".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::InvalidLogin | AccountError::WeakPassword => {
                AppError::bad_request(e.to_string())
            }
            AccountError::AlreadyExists => AppError::conflict(e.to_string()),
            AccountError::InvalidCredentials => AppError::unauthorized(e.to_string()),
            AccountError::NotFound => AppError::not_found(e.to_string()),
            AccountError::Unavailable => AppError::unavailable("account store timed out"),
            AccountError::Internal(details) => AppError::internal("Internal server error", details),
        }
    }
}

impl From<ListingError> for AppError {
    fn from(e: ListingError) -> Self {
        match e {
            ListingError::Validation(_) | ListingError::InvalidId | ListingError::NoFields => {
                AppError::bad_request(e.to_string())
            }
            ListingError::NotFound => AppError::not_found(e.to_string()),
            ListingError::Forbidden(_) => AppError::forbidden(e.to_string()),
            ListingError::Unavailable => AppError::unavailable("listing store timed out"),
            ListingError::Internal(details) => AppError::internal("Internal server error", details),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::InvalidToken => AppError::unauthorized("Invalid token"),
            CredentialError::Hashing(details) | CredentialError::Signing(details) => {
                AppError::internal("Internal server error", details)
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(format!("Invalid request format: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!(
            "Invalid query parameters: {}",
            rejection.body_text()
        ))
    }
}
