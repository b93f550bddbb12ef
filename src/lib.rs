//! Worst-case response-time analysis for adaptive variable-rate (AVR) tasks.
//!
//! AVR tasks are released at fixed angular positions of a rotating
//! mechanism (e.g. an engine crankshaft), and their WCET depends on the
//! rotation speed at release. This crate searches for speed profiles that
//! are physically realizable under bounded angular acceleration while
//! minimizing elapsed time and maximizing accumulated WCET.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `StepFunction`, `AvrTask`, `Event`,
//!   `EventSequence`, `TaskCatalog`
//! - **`feasibility`**: Kinematic reachability between consecutive releases
//! - **`ga`**: Genotype encodings, decoders (with repair), and the
//!   two-objective evaluator behind the `MultiObjectiveProblem` trait
//! - **`io`**: Task-set loading
//! - **`config`**: Run configuration
//! - **`validation`**: Input integrity checks (lengths, monotonicity, ordering)
//!
//! # Architecture
//!
//! The evolutionary engine itself is external: this crate supplies
//! `create`, `decode`, and `evaluate` and holds no shared mutable state,
//! so candidates can be evaluated concurrently.
//!
//! # References
//!
//! - Buttazzo et al. (2014), "Rate-adaptive tasks: Model, analysis, and design issues"
//! - Deb et al. (2002), "A fast and elitist multiobjective genetic algorithm: NSGA-II"

pub mod config;
pub mod error;
pub mod feasibility;
pub mod ga;
pub mod io;
pub mod models;
pub mod validation;

pub use error::{AvrError, DomainError, Result};
