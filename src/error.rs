//! Errors surfaced at the HTTP boundary.
//!
//! `MalformedRequest` covers bodies and paths that could not be decoded at
//! all; every other failure comes from the payment pipeline unchanged.

use crate::payments::error::PaymentError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{message}")]
    MalformedRequest { message: String },

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl AppError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AppError::MalformedRequest {
            message: message.into(),
        }
    }

    /// Map error to HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::MalformedRequest { .. } => 400,
            AppError::Payment(err) => err.http_status_code(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::MalformedRequest { message } => message.clone(),
            AppError::Payment(err) => err.user_message(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::MalformedRequest { .. } => false,
            AppError::Payment(err) => err.is_retryable(),
        }
    }
}

/// Result type for handlers that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;
