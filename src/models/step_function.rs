//! Stepwise WCET function over rotation speed.
//!
//! Each execution mode of an AVR task covers a right-closed speed interval
//! `(boundaries[i], boundaries[i + 1]]` with a constant worst-case
//! execution time `values[i]`.
//!
//! # Reference
//! Buttazzo et al. (2014), "Rate-adaptive tasks: Model, analysis, and design issues"

use serde::Serialize;

use crate::error::DomainError;
use crate::validation::{validate_step_function, ValidationError};

/// Piecewise-constant WCET function `C(omega)`.
///
/// Invariants (checked in [`StepFunction::new`]):
/// - `boundaries.len() == values.len() + 1`, at least two boundaries
/// - `boundaries` strictly increasing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFunction {
    values: Vec<f64>,
    boundaries: Vec<f64>,
}

impl StepFunction {
    /// Creates a step function from WCET values and speed boundaries.
    pub fn new(values: Vec<f64>, boundaries: Vec<f64>) -> Result<Self, Vec<ValidationError>> {
        validate_step_function(&values, &boundaries)?;
        Ok(Self { values, boundaries })
    }

    /// WCET for a rotation speed.
    ///
    /// `omega <= boundaries[i]` selects interval `i - 1`. Speeds at or below
    /// the lowest boundary, or above the highest, are outside the domain.
    pub fn value(&self, omega: f64) -> Result<f64, DomainError> {
        if !(omega > self.min_omega() && omega <= self.max_omega()) {
            return Err(DomainError {
                omega,
                min_omega: self.min_omega(),
                max_omega: self.max_omega(),
            });
        }
        // First boundary >= omega, searched among boundaries[1..].
        let index = self.boundaries[1..].partition_point(|&b| b < omega);
        Ok(self.values[index])
    }

    /// Worst-case execution times of all modes.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Speed boundaries of all modes.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Exclusive lower end of the domain.
    pub fn min_omega(&self) -> f64 {
        self.boundaries[0]
    }

    /// Inclusive upper end of the domain.
    pub fn max_omega(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Number of execution modes.
    pub fn mode_count(&self) -> usize {
        self.values.len()
    }
}
