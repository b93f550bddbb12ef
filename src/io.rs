//! Task-set loading.
//!
//! # Format
//!
//! ```json
//! { "tasks": [
//!     { "id": "task1", "phi": 0.0, "c": "15|13|12|6", "boundaries": "104|209|314|419|523" },
//!     { "id": "task2", "phi": 1.0, "c": "9|7",        "boundaries": "104|300|523" }
//! ] }
//! ```
//!
//! `phi` is given in units of π; `c` and `boundaries` are pipe-separated
//! lists. Tasks must be listed in strictly increasing `phi` order.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AvrError, Result};
use crate::models::{AvrTask, StepFunction, TaskCatalog};
use crate::validation::{ValidationError, ValidationErrorKind};

/// One task record as written in a task-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: String,
    /// Release angle in units of π.
    pub phi: f64,
    /// Pipe-separated WCET values.
    pub c: String,
    /// Pipe-separated speed boundaries.
    pub boundaries: String,
}

/// Top-level task-set document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSetFile {
    /// Task records in release-angle order.
    pub tasks: Vec<TaskRecord>,
}

/// Reads and validates a task set from a JSON file.
pub fn load_task_set(path: impl AsRef<Path>) -> Result<TaskCatalog> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let catalog = parse_task_set(&text)?;
    info!(
        path = %path.display(),
        tasks = catalog.len(),
        min_omega = catalog.min_omega(),
        max_omega = catalog.max_omega(),
        "task set loaded"
    );
    Ok(catalog)
}

/// Parses and validates a task set from JSON text.
pub fn parse_task_set(json: &str) -> Result<TaskCatalog> {
    let file: TaskSetFile = serde_json::from_str(json)?;
    build_catalog(&file.tasks)
}

/// Converts records into a validated catalog, reporting every defect.
pub fn build_catalog(records: &[TaskRecord]) -> Result<TaskCatalog> {
    let mut errors = Vec::new();
    let mut tasks = Vec::with_capacity(records.len());

    for record in records {
        match record_to_task(record) {
            Ok(task) => tasks.push(task),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    if !errors.is_empty() {
        return Err(AvrError::Specification(errors));
    }

    TaskCatalog::new(tasks).map_err(AvrError::Specification)
}

fn record_to_task(record: &TaskRecord) -> std::result::Result<AvrTask, Vec<ValidationError>> {
    let values = parse_list(&record.id, "c", &record.c);
    let boundaries = parse_list(&record.id, "boundaries", &record.boundaries);

    let mut errors = Vec::new();
    if !record.phi.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidNumber,
            format!("task '{}': phi is not finite", record.id),
        ));
    }

    let (values, boundaries) = match (values, boundaries) {
        (Ok(v), Ok(b)) => (v, b),
        (v, b) => {
            errors.extend(v.err());
            errors.extend(b.err());
            return Err(errors);
        }
    };

    let c = StepFunction::new(values, boundaries).map_err(|errs| {
        errs.into_iter()
            .map(|e| ValidationError::new(e.kind, format!("task '{}': {}", record.id, e.message)))
            .collect::<Vec<_>>()
    });

    match c {
        Ok(c) if errors.is_empty() => Ok(AvrTask::new(record.id.clone(), record.phi * PI, c)),
        Ok(_) => Err(errors),
        Err(mut errs) => {
            errors.append(&mut errs);
            Err(errors)
        }
    }
}

fn parse_list(id: &str, field: &str, text: &str) -> std::result::Result<Vec<f64>, ValidationError> {
    text.split('|')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|_| {
                ValidationError::new(
                    ValidationErrorKind::InvalidNumber,
                    format!("task '{id}': invalid number '{part}' in {field}"),
                )
            })
        })
        .collect()
}
