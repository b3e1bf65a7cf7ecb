use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

use crate::models::{ApiError, FieldErrors};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot delete category. It is used in {0} products.")]
    ReferencedByProducts(u64),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReferencedByProducts(_) => StatusCode::CONFLICT,
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the response envelope.
    ///
    /// Store and internal failures are logged with full detail and answered
    /// with `fallback` only; validation, not-found and referential errors keep
    /// their own message.
    pub fn respond(&self, fallback: &str) -> HttpResponse {
        let status = self.status();
        match self {
            AppError::ValidationError(errors) => {
                log::warn!("{fallback}: {errors}");
                HttpResponse::build(status).json(json!({
                    "success": false,
                    "fieldErrors": errors,
                    "message": fallback,
                }))
            }
            AppError::NotFound(msg) => envelope(status, "NOT_FOUND", msg),
            AppError::BadRequest(msg) => {
                log::warn!("{fallback}: {msg}");
                envelope(status, "BAD_REQUEST", msg)
            }
            AppError::ReferencedByProducts(_) => {
                log::warn!("{fallback}: {self}");
                envelope(status, "REFERENCED", &self.to_string())
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                envelope(status, "AUTH_ERROR", msg)
            }
            AppError::JwtError(err) => {
                log::warn!("Token rejected: {err}");
                envelope(status, "AUTH_ERROR", "Invalid access token")
            }
            AppError::Forbidden => {
                log::warn!("Forbidden access");
                envelope(status, "FORBIDDEN", "Forbidden")
            }
            AppError::DatabaseError(err) => {
                log::error!("{fallback}: database error: {err}");
                envelope(status, "DATABASE_ERROR", fallback)
            }
            _ => {
                log::error!("{fallback}: {self}");
                envelope(status, "INTERNAL_ERROR", fallback)
            }
        }
    }
}

fn envelope(status: StatusCode, code: &str, message: &str) -> HttpResponse {
    let error = ApiError {
        code: code.to_string(),
        message: message.to_string(),
    };
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": error
    }))
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.respond("Internal server error")
    }
}
