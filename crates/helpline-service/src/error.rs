use thiserror::Error;

use helpline_core::error::CoreError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] helpline_db::error::DbError),

    #[error(transparent)]
    CoreError(CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("Validation error on `{field}`: {message}")]
    ValidationError {
        field: &'static str,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Attachment storage error: {0}")]
    AttachmentError(#[from] std::io::Error),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

impl ServiceError {
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            message: message.into(),
        }
    }

    /// Field a validation failure refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::ValidationError { field, .. }
            | Self::CoreError(CoreError::ValidationError { field, .. }) => Some(*field),
            _ => None,
        }
    }
}

impl From<CoreError> for ServiceError {
    /// Validation failures keep their category so the transport layer can
    /// name the offending field.
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError { field, message } => Self::ValidationError { field, message },
            other => Self::CoreError(other),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
