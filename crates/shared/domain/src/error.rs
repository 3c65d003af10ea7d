//! Domain-level errors.
//!
//! These errors represent violations of the data model's own rules.
//! They are independent of infrastructure concerns (database, configuration).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::DecimalSpec;

/// Domain-specific errors for data model rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A decimal does not fit its column's precision or scale
    #[error("{field} value {value} does not fit {spec}")]
    Precision {
        field: String,
        spec: DecimalSpec,
        value: Decimal,
    },
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a precision error for a named field
    pub fn precision(field: impl Into<String>, spec: DecimalSpec, value: Decimal) -> Self {
        DomainError::Precision {
            field: field.into(),
            spec,
            value,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
