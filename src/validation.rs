//! Input validation for AVR task sets.
//!
//! Checks structural integrity of WCET step functions and task sets
//! before analysis. Detects:
//! - Empty task sets
//! - Duplicate task IDs
//! - Non-finite numbers
//! - Boundary/value length mismatches
//! - Non-monotonic speed boundaries
//! - Tasks not ordered by strictly increasing release angle
//!
//! All checks collect every defect instead of stopping at the first, so a
//! malformed task-set file is reported in one pass.

use std::collections::HashSet;

use crate::models::AvrTask;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The task set contains no tasks.
    EmptyTaskSet,
    /// Two tasks share the same ID.
    DuplicateId,
    /// A number could not be parsed or is not finite.
    InvalidNumber,
    /// A step function has fewer than two boundaries.
    TooFewBoundaries,
    /// `len(boundaries) != len(values) + 1`.
    LengthMismatch,
    /// Boundaries are not strictly increasing.
    NonMonotonicBoundaries,
    /// Tasks are not listed in strictly increasing release-angle order.
    UnorderedPhi,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the arrays of a WCET step function.
///
/// Checks:
/// 1. At least two boundaries
/// 2. `len(boundaries) == len(values) + 1`
/// 3. All values and boundaries are finite
/// 4. Boundaries strictly increasing
pub fn validate_step_function(values: &[f64], boundaries: &[f64]) -> ValidationResult {
    let mut errors = Vec::new();

    if boundaries.len() < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewBoundaries,
            format!("expected at least 2 boundaries, got {}", boundaries.len()),
        ));
    }

    if boundaries.len() != values.len() + 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "{} WCET values require {} boundaries, got {}",
                values.len(),
                values.len() + 1,
                boundaries.len()
            ),
        ));
    }

    if let Some(x) = values.iter().chain(boundaries).find(|x| !x.is_finite()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidNumber,
            format!("non-finite entry {x} in step function"),
        ));
    }

    for pair in boundaries.windows(2) {
        if pair[0] >= pair[1] {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonMonotonicBoundaries,
                format!("boundaries not strictly increasing at {} >= {}", pair[0], pair[1]),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates an ordered task set.
///
/// Checks:
/// 1. At least one task
/// 2. No duplicate task IDs
/// 3. Release angles strictly increasing in listing order
pub fn validate_task_set(tasks: &[AvrTask]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTaskSet,
            "task set contains no tasks",
        ));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        if !ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
    }

    for pair in tasks.windows(2) {
        if pair[0].phi >= pair[1].phi {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnorderedPhi,
                format!(
                    "tasks not ordered by release angle: '{}' ({}) before '{}' ({})",
                    pair[0].id, pair[0].phi, pair[1].id, pair[1].phi
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
