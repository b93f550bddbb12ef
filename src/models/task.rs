//! AVR task template and its released instances (events).
//!
//! An adaptive variable-rate (AVR) task is released each time a rotating
//! mechanism passes the task's release angle. Its WCET depends on the
//! rotation speed at release.
//!
//! Templates live in the [`TaskCatalog`](super::TaskCatalog) and are never
//! mutated. Every decode produces fresh [`Event`] values that carry their
//! own decoded speed; the WCET function is shared read-only.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::StepFunction;
use crate::error::DomainError;

/// An AVR task template.
#[derive(Debug, Clone, Serialize)]
pub struct AvrTask {
    /// Unique task identifier.
    pub id: String,
    /// Release angle in radians, within one rotation.
    pub phi: f64,
    /// Execution modes over rotation speed.
    pub c: Arc<StepFunction>,
}

impl AvrTask {
    /// Creates a task from its release angle (radians) and WCET function.
    pub fn new(id: impl Into<String>, phi: f64, c: StepFunction) -> Self {
        Self {
            id: id.into(),
            phi,
            c: Arc::new(c),
        }
    }

    /// Exclusive lower speed bound of the task.
    pub fn min_omega(&self) -> f64 {
        self.c.min_omega()
    }

    /// Inclusive upper speed bound of the task.
    pub fn max_omega(&self) -> f64 {
        self.c.max_omega()
    }

    /// Worst-case speeds at which a first instance may start: every mode
    /// boundary except the lowest.
    pub fn feasible_starting_speeds(&self) -> &[f64] {
        &self.c.boundaries()[1..]
    }

    /// Starting speed at `index` into [`feasible_starting_speeds`](Self::feasible_starting_speeds).
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn initial_speed(&self, index: usize) -> f64 {
        let speeds = self.feasible_starting_speeds();
        assert!(index < speeds.len(), "initial speed index {index} out of bounds");
        speeds[index]
    }

    /// Releases an instance of this task at rotation speed `omega`.
    pub fn event(&self, omega: f64) -> Event {
        Event {
            id: self.id.clone(),
            phi: self.phi,
            c: Arc::clone(&self.c),
            omega,
        }
    }
}

/// A released task instance with its decoded rotation speed.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// ID of the releasing task.
    pub id: String,
    /// Release angle in radians.
    pub phi: f64,
    /// Execution modes of the releasing task.
    pub c: Arc<StepFunction>,
    /// Rotation speed at release.
    pub omega: f64,
}

impl Event {
    /// Exclusive lower speed bound of the releasing task.
    pub fn min_omega(&self) -> f64 {
        self.c.min_omega()
    }

    /// Inclusive upper speed bound of the releasing task.
    pub fn max_omega(&self) -> f64 {
        self.c.max_omega()
    }

    /// WCET of this instance at its decoded speed.
    pub fn wcet(&self) -> Result<f64, DomainError> {
        self.c.value(self.omega)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.omega)
    }
}
