//! Decoded event sequence (phenotype).

use std::fmt;

use serde::Serialize;

use super::Event;

/// An ordered sequence of released events with a feasibility flag.
///
/// Produced by a decoder and consumed read-only by the evaluator. A
/// sequence that could not be repaired may hold fewer events than the
/// configured length; it is then always flagged infeasible.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventSequence {
    /// Events in release order.
    pub events: Vec<Event>,
    /// Whether every pair of consecutive speeds is kinematically reachable.
    pub feasible: bool,
}

impl EventSequence {
    /// Creates a sequence with an explicit feasibility flag.
    pub fn new(events: Vec<Event>, feasible: bool) -> Self {
        Self { events, feasible }
    }

    /// Creates a sequence flagged infeasible.
    pub fn infeasible(events: Vec<Event>) -> Self {
        Self::new(events, false)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the sequence has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Decoded rotation speeds in release order.
    pub fn speeds(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.omega).collect()
    }
}

impl fmt::Display for EventSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.feasible {
            return write!(f, "infeasible");
        }
        if self.events.is_empty() {
            return write!(f, "empty");
        }
        let parts: Vec<String> = self.events.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}
