use thiserror::Error;

use crate::models::payment::PaymentStatus;
use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("An account already exists with this email or mobile number")]
    DuplicateIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired OTP")]
    InvalidOrExpiredOtp,

    #[error("Administrator accounts cannot use applicant sections")]
    AdminNotAllowed,

    #[error("Payment status cannot move from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Document upload failed: {0}")]
    UploadFailed(String),

    #[error("Notification could not be queued: {0}")]
    Notification(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    /// Single-field validation failure, for callers outside the rule engine.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        PortalError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}
