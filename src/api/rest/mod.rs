//! REST API module for HTTP endpoints
//!
//! - `GET /api/entities` - Top-level entities, or filtered by `name`/`shortname`
//! - `GET /api/entities/:id` - Entity with its addresses
//! - `GET /api/entities/:id/pricefactor` - Stored price factor
//! - `GET|PUT|DELETE /api/relations/:component/:area/:instanceid` - One host's relation
//! - `GET /api/relations/:component/:area/:parentid/divergent` - Outlier check
//! - `DELETE /api/bookings/:bookingid/relations` - Booking cleanup

pub mod bookings;
pub mod entities;
pub mod relations;

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::RelationError;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Total count (for list responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, total: None }
    }

    pub fn with_total(data: T, total: usize) -> Self {
        Self {
            data,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    /// Per-row validation messages, keyed by row index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<usize, String>>,
}

impl ApiError {
    fn with_code(message: impl Into<String>, code: &str) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
            fields: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(message, "NOT_FOUND")
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_code(message, "INVALID_ARGUMENT")
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::with_code(message, "PRECONDITION_FAILED")
    }

    pub fn validation(fields: BTreeMap<usize, String>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::with_code("Selected entity is not available", "VALIDATION_FAILED")
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(message, "INTERNAL_ERROR")
    }
}

impl From<RelationError> for (StatusCode, ApiError) {
    fn from(err: RelationError) -> Self {
        let message = err.to_string();
        match err {
            RelationError::Precondition(_) => (StatusCode::BAD_REQUEST, ApiError::precondition(message)),
            RelationError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, ApiError::invalid_argument(message))
            }
            RelationError::NotFound(_) => (StatusCode::NOT_FOUND, ApiError::not_found(message)),
            RelationError::Storage(_) | RelationError::Io(_) | RelationError::Json(_) => {
                error!(error = %message, "Storage failure while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal(message))
            }
        }
    }
}

/// Render an engine error as an HTTP response
pub fn error_response(err: RelationError) -> Response {
    let (status, body): (StatusCode, ApiError) = err.into();
    (status, Json(body)).into_response()
}
