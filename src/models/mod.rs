//! AVR domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `StepFunction` | WCET over rotation speed |
//! | `AvrTask` | Immutable task template |
//! | `Event` | Released instance with a decoded speed |
//! | `EventSequence` | Phenotype: decoded events + feasibility |
//! | `TaskCatalog` | Ordered, read-only task set |

mod catalog;
mod event_sequence;
mod step_function;
mod task;

pub use catalog::TaskCatalog;
pub use event_sequence::EventSequence;
pub use step_function::StepFunction;
pub use task::{AvrTask, Event};
