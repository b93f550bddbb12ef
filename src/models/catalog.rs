//! Read-only catalog of AVR task templates.

use serde::Serialize;

use super::AvrTask;
use crate::validation::{validate_task_set, ValidationError};

/// Ordered, immutable collection of task templates.
///
/// Tasks are ordered by strictly increasing release angle. The catalog is
/// built once and shared read-only by all decode calls.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCatalog {
    tasks: Vec<AvrTask>,
    min_omega: f64,
    max_omega: f64,
}

impl TaskCatalog {
    /// Creates a catalog after validating ordering and IDs.
    pub fn new(tasks: Vec<AvrTask>) -> Result<Self, Vec<ValidationError>> {
        validate_task_set(&tasks)?;

        let min_omega = tasks
            .iter()
            .map(AvrTask::min_omega)
            .fold(f64::INFINITY, f64::min);
        let max_omega = tasks
            .iter()
            .map(AvrTask::max_omega)
            .fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            tasks,
            min_omega,
            max_omega,
        })
    }

    /// Task template at `index`.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    pub fn task(&self, index: usize) -> &AvrTask {
        &self.tasks[index]
    }

    /// Task template at position `index` taken cyclically.
    pub fn task_cyclic(&self, index: usize) -> &AvrTask {
        &self.tasks[index % self.tasks.len()]
    }

    /// All task templates in release-angle order.
    pub fn tasks(&self) -> &[AvrTask] {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Lowest speed bound over all tasks.
    pub fn min_omega(&self) -> f64 {
        self.min_omega
    }

    /// Highest speed bound over all tasks.
    pub fn max_omega(&self) -> f64 {
        self.max_omega
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StepFunction;

    fn task(id: &str, phi: f64, lo: f64, hi: f64) -> AvrTask {
        AvrTask::new(id, phi, StepFunction::new(vec![1.0], vec![lo, hi]).unwrap())
    }

    #[test]
    fn test_overall_bounds() {
        let catalog =
            TaskCatalog::new(vec![task("a", 0.0, 10.0, 50.0), task("b", 1.0, 5.0, 40.0)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.min_omega(), 5.0);
        assert_eq!(catalog.max_omega(), 50.0);
        assert_eq!(catalog.task(1).id, "b");
        assert_eq!(catalog.task_cyclic(3).id, "b");
        assert_eq!(catalog.task_cyclic(4).id, "a");
    }

    #[test]
    fn test_rejects_unordered() {
        assert!(TaskCatalog::new(vec![task("a", 1.0, 1.0, 2.0), task("b", 0.0, 1.0, 2.0)]).is_err());
        assert!(TaskCatalog::new(Vec::new()).is_err());
    }
}
