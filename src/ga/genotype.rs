//! Genotype for the AVR worst-case response-time search.
//!
//! # Encoding
//!
//! - **start_index**: task that releases the first event.
//! - **start_selector**: value in `[0, 1]` choosing among the first task's
//!   discrete feasible starting speeds.
//! - **values**: `n - 1` genes, one per subsequent event. Absolute speeds
//!   for the absolute encodings, normalized selectors in `[0, 1]` for the
//!   relative encoding.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Search-space point for one event sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    /// Index of the first task in the catalog.
    pub start_index: usize,
    /// Selector for the first event's starting speed.
    pub start_selector: f64,
    /// Speed genes for events `1..n`.
    pub values: Vec<f64>,
}

/// Per-gene bounds advertised to the search engine's operators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenotypeBounds {
    /// Highest valid `start_index`.
    pub max_start_index: usize,
    /// Lower bound of every value gene.
    pub value_min: f64,
    /// Upper bound of every value gene.
    pub value_max: f64,
    /// Number of value genes (`n - 1`).
    pub value_count: usize,
}

impl GenotypeBounds {
    /// Samples a genotype uniformly within the bounds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Genotype {
        let start_index = rng.random_range(0..=self.max_start_index);
        let start_selector: f64 = rng.random();
        let values = (0..self.value_count)
            .map(|_| rng.random_range(self.value_min..=self.value_max))
            .collect();
        Genotype {
            start_index,
            start_selector,
            values,
        }
    }

    /// Whether every gene of `genotype` lies within the bounds.
    pub fn contains(&self, genotype: &Genotype) -> bool {
        genotype.start_index <= self.max_start_index
            && (0.0..=1.0).contains(&genotype.start_selector)
            && genotype.values.len() == self.value_count
            && genotype
                .values
                .iter()
                .all(|v| (self.value_min..=self.value_max).contains(v))
    }
}

impl Genotype {
    /// Projects every gene into `bounds`.
    ///
    /// Missing value genes are filled with `bounds.value_min`; surplus
    /// genes are dropped.
    pub fn clamp_to(&mut self, bounds: &GenotypeBounds) {
        self.start_index = self.start_index.min(bounds.max_start_index);
        self.start_selector = self.start_selector.clamp(0.0, 1.0);
        self.values.resize(bounds.value_count, bounds.value_min);
        for v in &mut self.values {
            *v = v.clamp(bounds.value_min, bounds.value_max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bounds() -> GenotypeBounds {
        GenotypeBounds {
            max_start_index: 2,
            value_min: 100.0,
            value_max: 500.0,
            value_count: 4,
        }
    }

    #[test]
    fn test_sample_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        let b = bounds();
        for _ in 0..100 {
            let g = b.sample(&mut rng);
            assert!(b.contains(&g));
        }
    }

    #[test]
    fn test_sample_deterministic() {
        let b = bounds();
        let g1 = b.sample(&mut SmallRng::seed_from_u64(1));
        let g2 = b.sample(&mut SmallRng::seed_from_u64(1));
        assert_eq!(g1, g2);
    }

    #[test]
    fn test_clamp_to() {
        let b = bounds();
        let mut g = Genotype {
            start_index: 9,
            start_selector: 1.5,
            values: vec![50.0, 600.0, 300.0],
        };
        assert!(!b.contains(&g));
        g.clamp_to(&b);
        assert_eq!(g.start_index, 2);
        assert_eq!(g.start_selector, 1.0);
        assert_eq!(g.values, vec![100.0, 500.0, 300.0, 100.0]);
        assert!(b.contains(&g));
    }
}
