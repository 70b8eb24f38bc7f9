//! # Cost Error Types
//!
//! Typed error handling for the order cost pipeline.
//! All pipeline operations return `Result<T, CostError>`.
//!
//! Callers branch on [`CostError::kind`] (or the variant itself). The
//! `Display` text is advisory and meant for humans only.

use thiserror::Error;

/// Message returned to callers for any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Coarse classification of a [`CostError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied malformed, missing, or out-of-range input
    Validation,
    /// Unexpected failure not attributable to caller input
    Internal,
}

/// Core error type for all cost computations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    /// A request field failed validation
    #[error("{}", describe_validation(.field, .sku, .reason))]
    Validation {
        /// Offending field (e.g. `items`, `quantity`, `shipping.rate`)
        field: String,
        /// Sku of the offending line item, when known
        sku: Option<String>,
        /// Human-readable reason
        reason: String,
    },

    /// A literal could not be parsed as a base-10 number
    #[error("Invalid numeric value: '{value}'")]
    InvalidNumber { value: String },

    /// Decimal arithmetic exceeded the representable range
    #[error("Arithmetic overflow during {operation}")]
    Overflow { operation: &'static str },

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_validation(field: &str, sku: &Option<String>, reason: &str) -> String {
    match sku {
        Some(sku) => format!("Item '{}': '{}' {}", sku, field, reason),
        None => reason.to_string(),
    }
}

impl CostError {
    /// Validation failure not tied to a line item.
    ///
    /// The reason is reported verbatim, so it should name the field itself.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::Validation {
            field: field.into(),
            sku: None,
            reason: reason.into(),
        }
    }

    /// Validation failure on a specific line item field.
    ///
    /// Rendered as `Item '<sku>': '<field>' <reason>`.
    pub fn item(
        sku: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CostError::Validation {
            field: field.into(),
            sku: Some(sku.into()),
            reason: reason.into(),
        }
    }

    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CostError::Validation { .. } | CostError::InvalidNumber { .. } => {
                ErrorKind::Validation
            }
            CostError::Overflow { .. } | CostError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns true if the caller can fix this error by changing its input
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Internal => 500,
        }
    }

    /// Message safe to hand back to a caller.
    ///
    /// Internal failures collapse to [`INTERNAL_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation => self.to_string(),
            ErrorKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Field named by a validation error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CostError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for cost operations
pub type CostResult<T> = Result<T, CostError>;
