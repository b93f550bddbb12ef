//! Error types for AVR analysis.
//!
//! Two failure classes exist:
//! - **Specification errors**: a malformed task set or configuration.
//!   Surfaced at load time; callers abort startup.
//! - **Domain errors**: a WCET query outside `(min_omega, max_omega]`.
//!   Upstream range computation rules this out, so seeing one is a
//!   contract violation.
//!
//! An infeasible candidate is *not* an error; it is reported through
//! [`EventSequence::feasible`](crate::models::EventSequence) and the
//! infeasible objective sentinel.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using [`AvrError`].
pub type Result<T> = std::result::Result<T, AvrError>;

/// Unified error type for loading and evaluating AVR problems.
#[derive(Debug, Error)]
pub enum AvrError {
    /// Task-set or config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Task-set or config file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Task set violates structural rules (lengths, ordering, monotonicity).
    #[error("specification error: {}", join_messages(.0))]
    Specification(Vec<ValidationError>),

    /// Configuration values are out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// WCET function queried outside its domain.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A rotation speed outside the open-closed domain of a WCET function.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("omega {omega} out of range ({min_omega}, {max_omega}]")]
pub struct DomainError {
    /// The offending rotation speed.
    pub omega: f64,
    /// Exclusive lower end of the domain.
    pub min_omega: f64,
    /// Inclusive upper end of the domain.
    pub max_omega: f64,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_specification_message_joins_all() {
        let err = AvrError::Specification(vec![
            ValidationError::new(ValidationErrorKind::EmptyTaskSet, "no tasks"),
            ValidationError::new(ValidationErrorKind::DuplicateId, "dup t1"),
        ]);
        assert_eq!(err.to_string(), "specification error: no tasks; dup t1");
    }

    #[test]
    fn test_domain_error_display() {
        let err = DomainError {
            omega: 525.0,
            min_omega: 104.0,
            max_omega: 523.0,
        };
        assert_eq!(err.to_string(), "omega 525 out of range (104, 523]");
        let wrapped: AvrError = err.into();
        assert!(matches!(wrapped, AvrError::Domain(_)));
    }
}
