use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A connection type outside the enumerated set reached the domain.
    /// Validation runs first, so seeing this in production is a defect.
    #[error("Invalid connection type: {0}")]
    InvalidConnectionType(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Already exists: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
