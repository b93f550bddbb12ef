//! GA-based worst-case response-time search.
//!
//! Provides the encodings, decoders, and fitness evaluation consumed by an
//! external multi-objective evolutionary engine (population management,
//! selection, crossover, and mutation are the engine's business).
//!
//! # Encoding
//!
//! - **Absolute**: one gene per event holds a rotation speed drawn from the
//!   catalog's overall speed range. Decoding may yield kinematically
//!   impossible sequences, which are either flagged or repaired.
//! - **Relative**: one gene per event holds a selector in `[0, 1]` that is
//!   mapped into the window of speeds reachable from the previous event.
//!   Every genotype decodes to a feasible sequence.
//!
//! # Submodules
//!
//! - [`decoder`]: the decoding policies
//! - [`encoding`]: runtime-selectable encoding and repair strategies

pub mod decoder;
pub mod encoding;
mod evaluator;
mod genotype;
mod problem;

use rand::Rng;

use crate::error::DomainError;

pub use encoding::{Encoding, RepairStrategy};
pub use evaluator::{Evaluator, Fitness, Objectives};
pub use genotype::{Genotype, GenotypeBounds};
pub use problem::AvrWcrtProblem;

/// Contract between a problem and an external multi-objective engine.
///
/// Each call owns its genotype and phenotype; implementations must not
/// mutate shared state, so an engine may evaluate candidates concurrently.
pub trait MultiObjectiveProblem: Send + Sync {
    /// Search-space representation.
    type Genotype: Clone + Send;
    /// Decoded representation consumed by [`evaluate`](Self::evaluate).
    type Phenotype;

    /// Samples a fresh genotype.
    fn create<R: Rng>(&self, rng: &mut R) -> Self::Genotype;

    /// Decodes a genotype. Repairing decoders may correct it in place.
    fn decode<R: Rng>(&self, genotype: &mut Self::Genotype, rng: &mut R) -> Self::Phenotype;

    /// Computes the objective pair of a phenotype.
    fn evaluate(&self, phenotype: &Self::Phenotype) -> Result<Objectives, DomainError>;

    /// Decodes and evaluates in one step.
    fn assess<R: Rng>(
        &self,
        genotype: &mut Self::Genotype,
        rng: &mut R,
    ) -> Result<Objectives, DomainError> {
        let phenotype = self.decode(genotype, rng);
        self.evaluate(&phenotype)
    }
}
