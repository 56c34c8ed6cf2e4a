//! API error types with IntoResponse
//!
//! Every error becomes `{ "ok": false, "error": "..." }` with a matching status.
//! Server-side causes are logged here and never echoed to the client.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::uploads::UploadError;

/// Methods served by `/api/schools`
pub const ALLOWED_METHODS: &str = "GET, POST";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed field (422)
    Validation(ValidationError),

    /// Unparseable request (400)
    BadRequest { detail: String },

    /// Unparseable query string (400)
    InvalidQuery { detail: String },

    /// Body exceeds the upload limit (413)
    PayloadTooLarge,

    /// Submission while in read-only mode (403)
    ReadOnly,

    /// Method other than GET/POST (405)
    MethodNotAllowed { method: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { .. } | Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ReadOnly => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::BadRequest { .. } => "Invalid form data".to_string(),
            Self::InvalidQuery { .. } => "Invalid query string".to_string(),
            Self::PayloadTooLarge => "Upload too large".to_string(),
            Self::ReadOnly => "Read-only mode: Cannot add schools".to_string(),
            Self::MethodNotAllowed { .. } => "Method Not Allowed".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Internal { .. } => "Server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            Self::Validation(e) => tracing::warn!(field = e.field(), "Rejected submission: {}", e),
            Self::BadRequest { detail } => tracing::warn!("Form parse error: {}", detail),
            Self::InvalidQuery { detail } => tracing::warn!("Query parse error: {}", detail),
            Self::PayloadTooLarge => tracing::warn!("Rejected oversized upload"),
            Self::ReadOnly => tracing::warn!("Rejected submission in read-only mode"),
            Self::MethodNotAllowed { method } => tracing::warn!(%method, "Method not allowed"),
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let body = json!({
            "ok": false,
            "error": self.public_message(),
        });

        let mut response = (status, Json(body)).into_response();
        if matches!(self, Self::MethodNotAllowed { .. }) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        Self::Internal {
            message: format!("failed to store image: {}", e),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        Self::BadRequest {
            detail: e.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::InvalidQuery {
            detail: e.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::BadRequest {
                detail: e.body_text(),
            }
        }
    }
}
