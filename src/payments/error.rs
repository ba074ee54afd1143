use thiserror::Error;
use uuid::Uuid;

pub type PaymentResult<T> = Result<T, PaymentError>;

pub const DOWNSTREAM_UNAVAILABLE_MESSAGE: &str =
    "Downstream bank server is unavailable, please retry later.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const REQUEST_ERROR_MESSAGE: &str = "Request error when calling downstream bank.";

/// Every way the payment pipeline can fail. Downstream failures are
/// classified once, in the bank client, and never remapped afterwards.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Payment with id {payment_id} not found")]
    NotFound { payment_id: Uuid },

    #[error("{message}")]
    Internal { message: String },

    #[error("{}", DOWNSTREAM_UNAVAILABLE_MESSAGE)]
    DownstreamUnavailable,
}

impl PaymentError {
    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PaymentError::Internal {
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::Validation { .. } => false,
            PaymentError::NotFound { .. } => false,
            PaymentError::Internal { .. } => false,
            PaymentError::DownstreamUnavailable => true,
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            PaymentError::Validation { .. } => 400,
            PaymentError::NotFound { .. } => 404,
            PaymentError::Internal { .. } => 500,
            PaymentError::DownstreamUnavailable => 503,
        }
    }

    /// Text safe to hand back to the caller. Internal messages are fixed
    /// strings chosen by the bank client, never raw downstream detail.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
