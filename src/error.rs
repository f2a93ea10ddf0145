//! Error types for the triage platform.
//!
//! Domain errors (`TriageError`) and storage errors (`StoreError`) are kept
//! separate from the HTTP-facing `AppError`, which maps every failure onto a
//! status code and a `{"detail": ...}` body.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the pure triage core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TriageError {
    #[error("invalid national identifier: {0}")]
    InvalidIdentifier(String),
    #[error("invalid triage level {0} (expected 1-5)")]
    InvalidTriageLevel(i64),
}

/// Failures while reading or writing a flat JSON collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt collection {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Triage(#[from] TriageError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Triage(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

pub type AppResult<T> = Result<T, AppError>;
