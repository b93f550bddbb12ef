//! Two-objective fitness of a decoded event sequence.
//!
//! # Objectives
//!
//! | Objective | Definition | Sense |
//! |-----------|-----------|-------|
//! | `mu` | Sum of minimal transit times between consecutive events (ms) | minimize |
//! | `sum_c` | Sum of WCETs at the decoded speeds | maximize |
//!
//! Minimal transit time between speeds `w1` and `w2` over angle `dphi`
//! follows from a two-phase accelerate/decelerate profile bounded by
//! `a_min < 0 < a_max`:
//!
//! ```text
//! mu = 1000 * ( sqrt((2 a_max a_min dphi - a_max w2^2 + a_min w1^2) / (a_min - a_max))
//!                 * (a_min - a_max) + a_max w2 - a_min w1 ) / (a_min a_max)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::feasibility::{event_delta_phi, AccelerationBounds};
use crate::models::{Event, EventSequence};

/// Value of one objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fitness {
    /// Objective of a feasible candidate.
    Value(f64),
    /// Sentinel of an infeasible candidate; dominated by every value.
    Infeasible,
}

impl Fitness {
    /// The numeric value, if feasible.
    pub fn value(&self) -> Option<f64> {
        match self {
            Fitness::Value(v) => Some(*v),
            Fitness::Infeasible => None,
        }
    }

    /// Whether this is the infeasible sentinel.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Fitness::Infeasible)
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fitness::Value(v) => write!(f, "{v}"),
            Fitness::Infeasible => f.write_str("INFEASIBLE"),
        }
    }
}

/// Objective pair of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objectives {
    /// Total minimal transit time (minimized).
    pub mu: Fitness,
    /// Total worst-case execution time (maximized).
    pub sum_c: Fitness,
}

impl Objectives {
    /// Objectives of an infeasible candidate.
    pub const INFEASIBLE: Objectives = Objectives {
        mu: Fitness::Infeasible,
        sum_c: Fitness::Infeasible,
    };

    /// Objectives of a feasible candidate.
    pub fn feasible(mu: f64, sum_c: f64) -> Self {
        Self {
            mu: Fitness::Value(mu),
            sum_c: Fitness::Value(sum_c),
        }
    }

    /// Whether both objectives carry values.
    pub fn is_feasible(&self) -> bool {
        !self.mu.is_infeasible() && !self.sum_c.is_infeasible()
    }

    /// Pareto dominance for (min `mu`, max `sum_c`).
    ///
    /// A feasible candidate dominates every infeasible one; an infeasible
    /// candidate dominates nothing.
    pub fn dominates(&self, other: &Objectives) -> bool {
        match (
            self.mu.value().zip(self.sum_c.value()),
            other.mu.value().zip(other.sum_c.value()),
        ) {
            (Some(_), None) => true,
            (None, _) => false,
            (Some((mu_a, c_a)), Some((mu_b, c_b))) => {
                mu_a <= mu_b && c_a >= c_b && (mu_a < mu_b || c_a > c_b)
            }
        }
    }
}

/// Computes `mu` and `sum_c` for decoded sequences.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    acc: AccelerationBounds,
}

impl Evaluator {
    /// Creates an evaluator for the given acceleration bounds.
    pub fn new(acc: AccelerationBounds) -> Self {
        Self { acc }
    }

    /// Evaluates a sequence.
    ///
    /// Infeasible sequences get [`Objectives::INFEASIBLE`] without any
    /// numeric work. A [`DomainError`] means a decoder produced a speed
    /// outside a task's WCET domain.
    pub fn evaluate(&self, sequence: &EventSequence) -> Result<Objectives, DomainError> {
        if !sequence.feasible {
            return Ok(Objectives::INFEASIBLE);
        }
        let mu = self.mu(&sequence.events);
        let sum_c = self.sum_c(&sequence.events)?;
        Ok(Objectives::feasible(mu, sum_c))
    }

    /// Total minimal transit time over consecutive pairs.
    pub fn mu(&self, events: &[Event]) -> f64 {
        events
            .windows(2)
            .map(|pair| self.mu_pair(event_delta_phi(&pair[0], &pair[1]), &pair[0], &pair[1]))
            .sum()
    }

    /// Minimal transit time in ms from `e1` to `e2` over `delta_phi`.
    pub fn mu_pair(&self, delta_phi: f64, e1: &Event, e2: &Event) -> f64 {
        let (acc_min, acc_max) = (self.acc.min, self.acc.max);
        let (w1, w2) = (e1.omega, e2.omega);

        let nom = 2.0 * acc_max * acc_min * delta_phi - acc_max * w2 * w2 + acc_min * w1 * w1;
        let denom = acc_min - acc_max;

        let root = (nom / denom).sqrt() * denom;
        1000.0 * (root + acc_max * w2 - acc_min * w1) / (acc_min * acc_max)
    }

    /// Total WCET at the decoded speeds.
    pub fn sum_c(&self, events: &[Event]) -> Result<f64, DomainError> {
        events.iter().map(Event::wcet).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvrTask, StepFunction};
    use std::f64::consts::PI;

    fn evaluator() -> Evaluator {
        Evaluator::new(AccelerationBounds::new(-100.0, 100.0))
    }

    fn events() -> Vec<Event> {
        let c = StepFunction::new(vec![1.0], vec![0.0, 10.0]).unwrap();
        let t1 = AvrTask::new("id1", 0.0, c.clone());
        let t2 = AvrTask::new("id2", PI, c);
        vec![t1.event(1.0), t2.event(2.0)]
    }

    fn expected_mu() -> f64 {
        -30.0 + 20.0 * (100.0 * PI + 2.5).sqrt()
    }

    #[test]
    fn test_mu_pair() {
        let e = events();
        assert!((evaluator().mu_pair(PI, &e[0], &e[1]) - expected_mu()).abs() < 1e-4);
    }

    #[test]
    fn test_mu_sequence() {
        assert!((evaluator().mu(&events()) - expected_mu()).abs() < 1e-4);
        assert_eq!(evaluator().mu(&events()[..1]), 0.0);
    }

    #[test]
    fn test_sum_c() {
        assert_eq!(evaluator().sum_c(&events()).unwrap(), 2.0);
    }

    #[test]
    fn test_evaluate_feasible() {
        let obj = evaluator().evaluate(&EventSequence::new(events(), true)).unwrap();
        assert!(obj.is_feasible());
        assert!((obj.mu.value().unwrap() - expected_mu()).abs() < 1e-4);
        assert_eq!(obj.sum_c, Fitness::Value(2.0));
    }

    #[test]
    fn test_evaluate_infeasible_skips_numerics() {
        // Speeds outside the WCET domain would fail sum_c.
        let c = StepFunction::new(vec![1.0], vec![0.0, 1.0]).unwrap();
        let t = AvrTask::new("t", 0.0, c);
        let seq = EventSequence::infeasible(vec![t.event(f64::NAN), t.event(99.0)]);
        let obj = evaluator().evaluate(&seq).unwrap();
        assert_eq!(obj, Objectives::INFEASIBLE);
        assert_eq!(obj.mu.to_string(), "INFEASIBLE");
    }

    #[test]
    fn test_evaluate_domain_error() {
        let c = StepFunction::new(vec![1.0], vec![0.0, 1.0]).unwrap();
        let t = AvrTask::new("t", 0.0, c);
        let seq = EventSequence::new(vec![t.event(5.0)], true);
        assert!(evaluator().evaluate(&seq).is_err());
    }

    #[test]
    fn test_dominance() {
        let a = Objectives::feasible(10.0, 50.0);
        let b = Objectives::feasible(12.0, 40.0);
        let c = Objectives::feasible(8.0, 30.0);

        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
        assert!(!a.dominates(&a));
        assert!(a.dominates(&Objectives::INFEASIBLE));
        assert!(!Objectives::INFEASIBLE.dominates(&a));
        assert!(!Objectives::INFEASIBLE.dominates(&Objectives::INFEASIBLE));
    }
}
