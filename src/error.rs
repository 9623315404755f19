//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Every store, hashing, or token failure is translated into one
//! of its variants before it reaches the transport layer, so no raw
//! persistence or cryptographic error ever leaks to a client.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with JSON bodies. `From`
//! implementations for `StoreError`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` allow conversion
//! with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input; always client-fixable (HTTP 400).
    Validation(String),
    /// A uniqueness violation, e.g. registering an email twice (HTTP 409).
    Conflict(String),
    /// Missing, invalid, or expired credential or token (HTTP 401).
    /// Messages are kept generic to avoid enumeration attacks.
    Unauthorized(String),
    /// Resource absent, or present but not owned by the caller; the two
    /// cases are indistinguishable on the wire (HTTP 404).
    NotFound(String),
    /// An unexpected server-side failure (HTTP 500). The message is logged
    /// but never sent to the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Actix Web uses this to translate `AppError` results from handlers into
/// the correct status codes and JSON error bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => {
                // Log the detail; the client only sees a generic body.
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "internal server error"
                }))
            }
        }
    }
}

/// Converts `StoreError` into `AppError`.
///
/// `Conflict` and `NotFound` keep their meaning; any backend failure becomes
/// a generic `Internal` error.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Conflict => AppError::Conflict("email already registered".into()),
            StoreError::NotFound => AppError::NotFound("task not found".into()),
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the field-level messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts JWT processing failures into a generic `Unauthorized` error.
/// The underlying cause (expired, bad signature, malformed) is logged at
/// debug level only.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("token verification failed: {}", error);
        AppError::Unauthorized("invalid or expired token".into())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}
