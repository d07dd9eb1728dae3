//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Message shown to the client when the submitted CSRF token does not match.
pub const CSRF_MISMATCH_MESSAGE: &str = "Invalid CSRF Token.";

/// Message shown to the client when the row could not be written.
pub const WRITE_FAILURE_MESSAGE: &str = "An error has occurred while submitting the form.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid request method: {0}")]
    InvalidMethod(String),
    #[error("invalid swap mode: {0}")]
    InvalidSwapMode(String),
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The table schema could not be read; the form cannot be built.
    #[error("form builder failed for table '{table}': {reason}")]
    SchemaIngestion { table: String, reason: String },
    #[error("unknown column(s): {}", names.join(", "))]
    UnknownColumn { names: Vec<String> },
    #[error("column selection must not be empty")]
    EmptySelection,
    #[error("malformed enum spec for column '{column}': {raw_type}")]
    MalformedEnumSpec { column: String, raw_type: String },
    #[error("{}", CSRF_MISMATCH_MESSAGE)]
    CsrfMismatch,
    /// The underlying storage error is logged, never carried to the caller.
    #[error("{}", WRITE_FAILURE_MESSAGE)]
    WriteFailure,
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let status = match &self {
            FormError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FormError::SchemaIngestion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            FormError::UnknownColumn { .. } | FormError::EmptySelection => StatusCode::BAD_REQUEST,
            FormError::MalformedEnumSpec { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            FormError::CsrfMismatch => StatusCode::FORBIDDEN,
            FormError::WriteFailure => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self {
            // Schema details stay server side.
            FormError::SchemaIngestion { .. } | FormError::MalformedEnumSpec { .. } => {
                "Form Builder Failed".to_string()
            }
            other => other.to_string(),
        };
        (status, Html(crate::render::markup::escape(&message))).into_response()
    }
}
