//! Unified error types for the domain layer
//!
//! The aggregator and eligibility gate are total and never return errors.
//! `DomainError` covers the fallible edges: building validated values from
//! untrusted input (poll creation, ids, timestamps).

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    ///
    /// # Example
    /// ```ignore
    /// if title.is_empty() {
    ///     return Err(DomainError::validation("Title is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("Title is required");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: Title is required");
    }

    #[test]
    fn test_invalid_id_error() {
        let err = DomainError::invalid_id("PollId: 'abc'");
        assert_eq!(err.to_string(), "Invalid ID format: PollId: 'abc'");
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("bad timestamp");
        assert!(matches!(err, DomainError::Parse(_)));
    }
}
