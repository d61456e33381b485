//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::constants::VIOLATION_SEPARATOR;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more field rules were violated, in rule order
    #[error("{}", .0.join(VIOLATION_SEPARATOR))]
    Validation(Vec<String>),

    /// A raw date string could not be parsed as a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    /// Create a validation error from a single message
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(vec![msg.into()])
    }

    /// Create an invalid date error
    pub fn invalid_date(raw: impl Into<String>) -> Self {
        DomainError::InvalidDate(raw.into())
    }

    /// Violation messages carried by this error (empty for non-validation errors)
    pub fn violations(&self) -> &[String] {
        match self {
            DomainError::Validation(messages) => messages,
            DomainError::InvalidDate(_) => &[],
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
