//! AVR worst-case response-time problem definition.
//!
//! Implements [`MultiObjectiveProblem`] for the adversarial WCRT search:
//! find physically realizable speed profiles that minimize elapsed time
//! while maximizing accumulated WCET.

use rand::Rng;
use tracing::info;

use super::decoder::{decode_absolute, decode_relative, decode_repairing};
use super::{Encoding, Evaluator, Genotype, GenotypeBounds, MultiObjectiveProblem, Objectives};
use crate::config::AvrConfig;
use crate::error::{DomainError, Result};
use crate::feasibility::AccelerationBounds;
use crate::io::load_task_set;
use crate::models::{EventSequence, TaskCatalog};

/// GA problem definition for AVR worst-case response-time analysis.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_avr::feasibility::AccelerationBounds;
/// use u_avr::ga::{AvrWcrtProblem, Encoding, MultiObjectiveProblem};
/// use u_avr::io::parse_task_set;
///
/// let catalog = parse_task_set(r#"{"tasks": [
///     {"id": "t1", "phi": 0.0, "c": "15|13|12|6", "boundaries": "104|209|314|419|523"},
///     {"id": "t2", "phi": 1.0, "c": "9|7", "boundaries": "104|300|523"}
/// ]}"#).unwrap();
/// let acc = AccelerationBounds::new(-100.0 * std::f64::consts::PI, 100.0 * std::f64::consts::PI);
/// let problem = AvrWcrtProblem::new(catalog, acc, 5, Encoding::Relative);
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let mut genotype = problem.create(&mut rng);
/// let sequence = problem.decode(&mut genotype, &mut rng);
/// assert!(sequence.feasible);
/// assert!(problem.evaluate(&sequence).unwrap().is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct AvrWcrtProblem {
    catalog: TaskCatalog,
    acc: AccelerationBounds,
    n: usize,
    encoding: Encoding,
    evaluator: Evaluator,
}

impl AvrWcrtProblem {
    /// Creates a problem over `catalog` for sequences of `n` events.
    ///
    /// # Panics
    /// If `n < 2`.
    pub fn new(catalog: TaskCatalog, acc: AccelerationBounds, n: usize, encoding: Encoding) -> Self {
        assert!(n >= 2, "sequence length must be at least 2, got {n}");
        Self {
            catalog,
            acc,
            n,
            encoding,
            evaluator: Evaluator::new(acc),
        }
    }

    /// Loads the task set named in `config` and builds the problem.
    pub fn from_config(config: &AvrConfig) -> Result<Self> {
        config.validate()?;
        let catalog = load_task_set(&config.task_set)?;
        info!(
            tasks = catalog.len(),
            n = config.n,
            encoding = %config.encoding,
            "AVR problem configured"
        );
        Ok(Self::new(
            catalog,
            config.acceleration(),
            config.n,
            config.encoding,
        ))
    }

    /// Task catalog.
    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// Acceleration bounds.
    pub fn acceleration(&self) -> AccelerationBounds {
        self.acc
    }

    /// Sequence length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Selected encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Gene bounds for the selected encoding.
    ///
    /// Absolute encodings range over the overall speed bounds of the
    /// catalog; the relative encoding over `[0, 1]`.
    pub fn bounds(&self) -> GenotypeBounds {
        let (value_min, value_max) = if self.encoding.is_absolute() {
            (self.catalog.min_omega(), self.catalog.max_omega())
        } else {
            (0.0, 1.0)
        };
        GenotypeBounds {
            max_start_index: self.catalog.len() - 1,
            value_min,
            value_max,
            value_count: self.n - 1,
        }
    }
}

impl MultiObjectiveProblem for AvrWcrtProblem {
    type Genotype = Genotype;
    type Phenotype = EventSequence;

    fn create<R: Rng>(&self, rng: &mut R) -> Genotype {
        self.bounds().sample(rng)
    }

    fn decode<R: Rng>(&self, genotype: &mut Genotype, rng: &mut R) -> EventSequence {
        match (self.encoding, self.encoding.repair_strategy()) {
            (_, Some(strategy)) => {
                decode_repairing(&self.catalog, self.acc, genotype, strategy, rng)
            }
            (Encoding::Relative, None) => decode_relative(&self.catalog, self.acc, genotype),
            (_, None) => decode_absolute(&self.catalog, self.acc, genotype),
        }
    }

    fn evaluate(&self, phenotype: &EventSequence) -> std::result::Result<Objectives, DomainError> {
        self.evaluator.evaluate(phenotype)
    }
}
