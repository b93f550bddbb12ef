//! Kinematic feasibility of consecutive releases.
//!
//! Between two releases the mechanism rotates by `delta_phi` under an
//! angular acceleration bounded by `[acc_min, acc_max]`. Starting at speed
//! `omega`, the speed reachable at the next release under constant
//! acceleration `a` is
//!
//! ```text
//! omega' = sqrt(omega^2 + 2 * a * delta_phi)
//! ```
//!
//! so the reachable window is the pair of bounds obtained with `acc_min`
//! and `acc_max`, further intersected with the next task's own speed
//! domain `(min_omega, max_omega]`.
//!
//! All functions are pure and allocation-free.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::models::{AvrTask, Event};

/// Angular acceleration limits of the mechanism (rad/s^2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccelerationBounds {
    /// Strongest deceleration (usually negative).
    pub min: f64,
    /// Strongest acceleration.
    pub max: f64,
}

impl AccelerationBounds {
    /// Creates acceleration bounds.
    ///
    /// # Panics
    /// If `min >= max`.
    pub fn new(min: f64, max: f64) -> Self {
        assert!(min < max, "acc_min ({min}) must be smaller than acc_max ({max})");
        Self { min, max }
    }
}

/// Closed speed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedRange {
    lower: f64,
    upper: f64,
}

impl SpeedRange {
    /// Creates a range.
    ///
    /// # Panics
    /// If `lower > upper` (or either is NaN).
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(
            lower <= upper,
            "range lower bound {lower} must not exceed upper bound {upper}"
        );
        Self { lower, upper }
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Width of the range.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Intersects the range with a task's domain `(task_min, task_max]`.
    ///
    /// Returns false and leaves the range untouched when the intersection
    /// is empty (`lower > task_max` or `upper <= task_min`). Otherwise
    /// clamps both ends and returns true.
    pub fn check_and_adapt(&mut self, task_min: f64, task_max: f64) -> bool {
        assert!(self.lower <= self.upper, "range inverted before adaptation");

        if self.lower > task_max || self.upper <= task_min {
            return false;
        }

        self.lower = self.lower.max(task_min);
        self.upper = self.upper.min(task_max);
        true
    }

    /// `lower <= omega <= upper`.
    pub fn contains(&self, omega: f64) -> bool {
        omega >= self.lower && omega <= self.upper
    }

    /// `lower < omega <= upper`, the acceptance test used while decoding.
    pub fn contains_open_lower(&self, omega: f64) -> bool {
        omega > self.lower && omega <= self.upper
    }

    /// Point at `fraction` of the way from `lower` to `upper`, nudged off
    /// the lower bound so it lies in `(lower, upper]` whenever the range
    /// is non-degenerate.
    ///
    /// `fraction` is clamped to `[0, 1]`. A single-point range yields
    /// `upper`.
    pub fn interpolate(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        let omega = (self.lower + self.width() * fraction).min(self.upper);
        if omega <= self.lower {
            self.just_above_lower()
        } else {
            omega
        }
    }

    /// Smallest value in `(lower, upper]`, or `upper` when the range is a
    /// single point.
    pub(crate) fn just_above_lower(&self) -> f64 {
        if self.lower < self.upper {
            smallest_above(self.lower)
        } else {
            self.upper
        }
    }
}

/// Next representable value above `x`.
fn smallest_above(x: f64) -> f64 {
    x.next_up()
}

/// Rotation angle from `curr_phi` forward to `next_phi`, in `(0, 2π]`.
///
/// A release at the same or a smaller angle belongs to the next rotation.
pub fn delta_phi(curr_phi: f64, next_phi: f64) -> f64 {
    let delta = next_phi - curr_phi;
    delta - TAU * ((delta / TAU).ceil() - 1.0)
}

/// Angle between two consecutive events.
pub fn event_delta_phi(curr: &Event, next: &Event) -> f64 {
    delta_phi(curr.phi, next.phi)
}

/// Speed reached after rotating `delta_phi` at constant `acceleration`
/// starting from `omega`.
///
/// When deceleration would stop the mechanism before covering the angle
/// the radicand goes negative; the reachable bound is then standstill.
pub fn kinematic_bound(omega: f64, acceleration: f64, delta_phi: f64) -> f64 {
    (omega * omega + 2.0 * acceleration * delta_phi).max(0.0).sqrt()
}

/// Speeds reachable at a release angle `next_phi` after `curr`.
pub fn find_next_range(curr: &Event, next_phi: f64, acc: AccelerationBounds) -> SpeedRange {
    let delta = delta_phi(curr.phi, next_phi);
    let lower = kinematic_bound(curr.omega, acc.min, delta);
    let upper = kinematic_bound(curr.omega, acc.max, delta);
    SpeedRange::new(lower, upper)
}

/// Reachable speeds for `next` after `curr`, restricted to `next`'s domain.
///
/// `None` when no speed in the task's domain is reachable.
pub fn next_feasible_range(
    curr: &Event,
    next: &AvrTask,
    acc: AccelerationBounds,
) -> Option<SpeedRange> {
    let mut range = find_next_range(curr, next.phi, acc);
    range
        .check_and_adapt(next.min_omega(), next.max_omega())
        .then_some(range)
}

/// Whether every consecutive pair of speeds in `events` is reachable.
///
/// Sequences with at most one event are trivially valid.
pub fn is_valid(events: &[Event], acc: AccelerationBounds) -> bool {
    events.windows(2).all(|pair| {
        let (curr, next) = (&pair[0], &pair[1]);
        let mut range = find_next_range(curr, next.phi, acc);
        range.check_and_adapt(next.min_omega(), next.max_omega()) && range.contains(next.omega)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use crate::models::StepFunction;

    fn task(id: &str, phi: f64, lo: f64, hi: f64) -> AvrTask {
        AvrTask::new(id, phi, StepFunction::new(vec![1.0], vec![lo, hi]).unwrap())
    }

    #[test]
    fn test_delta_phi_forward() {
        assert_eq!(delta_phi(0.0, 1.0), 1.0);
        assert!((delta_phi(0.5 * PI, 1.5 * PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_delta_phi_wraparound() {
        let d = delta_phi(1.5 * PI, 0.5 * PI);
        assert!((d - PI).abs() < 1e-12);
        assert!((delta_phi(1.0, 1.0) - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_delta_phi_in_half_open_rotation() {
        let angles = [0.0, 0.1, 1.0, PI, 4.0, 1.9 * PI];
        for &a in &angles {
            for &b in &angles {
                let d = delta_phi(a, b);
                assert!(d > 0.0 && d <= TAU + 1e-12, "delta_phi({a}, {b}) = {d}");
            }
        }
    }

    #[test]
    fn test_kinematic_bound() {
        assert_eq!(kinematic_bound(2.0, 2.0, 3.0), 4.0);
        assert_eq!(kinematic_bound(2.0, 0.0, 3.0), 2.0);
        assert_eq!(kinematic_bound(1.0, -10.0, 1.0), 0.0);
    }

    #[test]
    fn test_find_next_range() {
        let curr = task("a", 0.0, 0.0, 10.0).event(2.0);
        let range = find_next_range(&curr, 3.0, AccelerationBounds::new(0.0, 2.0));
        assert_eq!(range.lower(), 2.0);
        assert_eq!(range.upper(), 4.0);
    }

    #[test]
    fn test_check_and_adapt() {
        let mut range = SpeedRange::new(0.0, 1.0);
        assert!(range.check_and_adapt(0.5, 0.75));
        assert_eq!(range.lower(), 0.5);
        assert_eq!(range.upper(), 0.75);

        let mut range = SpeedRange::new(0.0, 1.0);
        assert!(range.check_and_adapt(0.0, 1.0));

        let mut range = SpeedRange::new(0.0, 1.0);
        assert!(!range.check_and_adapt(2.0, -1.0));
        assert!(!range.check_and_adapt(1.0, 2.0));
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        SpeedRange::new(1.0, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_inverted_acceleration_panics() {
        AccelerationBounds::new(1.0, -1.0);
    }

    #[test]
    fn test_contains() {
        let range = SpeedRange::new(0.0, 1.0);
        assert!(range.contains(0.5));
        assert!(range.contains(0.0));
        assert!(!range.contains(-0.5));
        assert!(!range.contains(1.5));
        assert!(!range.contains_open_lower(0.0));
        assert!(range.contains_open_lower(1.0));
    }

    #[test]
    fn test_interpolate_stays_open_at_lower() {
        let range = SpeedRange::new(2.0, 4.0);
        assert_eq!(range.interpolate(0.5), 3.0);
        assert_eq!(range.interpolate(1.0), 4.0);
        let low = range.interpolate(0.0);
        assert!(low > 2.0 && range.contains_open_lower(low));
    }

    #[test]
    fn test_interpolate_clamps_fraction() {
        let range = SpeedRange::new(2.0, 4.0);
        assert_eq!(range.interpolate(1.5), 4.0);
        assert_eq!(range.interpolate(-0.5), range.interpolate(0.0));
        assert!(range.contains_open_lower(range.interpolate(-0.5)));
    }

    #[test]
    fn test_interpolate_single_point_range() {
        let range = SpeedRange::new(300.0, 300.0);
        assert_eq!(range.interpolate(0.0), 300.0);
        assert_eq!(range.interpolate(0.3), 300.0);
        assert_eq!(range.interpolate(1.0), 300.0);
        assert_eq!(range.just_above_lower(), 300.0);
    }

    #[test]
    fn test_is_valid() {
        let acc = AccelerationBounds::new(0.0, 2.0);
        let a = task("a", 0.0, 0.0, 10.0);
        let b = task("b", 3.0, 2.0, 4.0);

        assert!(is_valid(&[], acc));
        assert!(is_valid(&[a.event(2.0)], acc));
        assert!(is_valid(&[a.event(2.0), b.event(2.0)], acc));
        assert!(is_valid(&[a.event(2.0), b.event(4.0)], acc));
        assert!(!is_valid(&[a.event(2.0), b.event(4.5)], acc));
        assert!(!is_valid(&[a.event(9.0), b.event(4.0)], acc));
    }

    #[test]
    fn test_next_feasible_range() {
        let acc = AccelerationBounds::new(0.0, 2.0);
        let curr = task("a", 0.0, 0.0, 10.0).event(2.0);
        let range = next_feasible_range(&curr, &task("b", 3.0, 3.0, 3.5), acc).unwrap();
        assert_eq!(range.lower(), 3.0);
        assert_eq!(range.upper(), 3.5);
        assert!(next_feasible_range(&curr, &task("c", 3.0, 5.0, 6.0), acc).is_none());
    }
}
