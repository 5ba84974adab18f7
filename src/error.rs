// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::error::Error as _;

/// Placeholder sent instead of the error chain outside development.
pub const REDACTED_STACK: &str = "redacted";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Identity provider error: {0}")]
    AuthProvider(String),

    #[error("Verified request carries no identity claims")]
    MissingClaim,

    #[error("Not Found")]
    NotFound,

    #[error("Not Found - {0}")]
    RouteNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub stack: String,
}

/// Unredacted error details, attached to error responses as an extension so
/// the error rendering middleware can expose them in development.
#[derive(Debug, Clone)]
pub struct ErrorReport(pub ErrorBody);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AuthProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound | AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::MissingClaim | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The error followed by its source chain, one cause per line.
    pub fn stack(&self) -> String {
        let mut stack = format!("{self}");
        let mut source = match self {
            AppError::Internal(err) => err.source(),
            _ => self.source(),
        };
        while let Some(cause) = source {
            stack.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        stack
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::MissingClaim => {
                tracing::error!("Identity missing downstream of token verification");
            }
            AppError::AuthProvider(msg) => {
                tracing::error!(error = %msg, "Identity provider error");
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
            }
            _ => {}
        }

        if matches!(self, AppError::NotFound) {
            return (status, "Not Found").into_response();
        }

        let report = ErrorBody {
            message: self.to_string(),
            stack: self.stack(),
        };
        let body = ErrorBody {
            message: report.message.clone(),
            stack: REDACTED_STACK.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport(report));
        response
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
