//! Runtime-selectable encoding and repair strategies.
//!
//! # Usage
//!
//! ```
//! use u_avr::ga::Encoding;
//!
//! let enc: Encoding = "absolute-repair-bound".parse().unwrap();
//! assert_eq!(enc, Encoding::AbsoluteRepairBound);
//! assert!(enc.is_absolute());
//! assert_eq!(Encoding::default(), Encoding::Relative);
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::feasibility::SpeedRange;

/// Genotype encoding and decoding policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Normalized selectors mapped into each reachable range; feasible by
    /// construction.
    #[default]
    Relative,
    /// Absolute speeds decoded as-is; feasibility checked afterwards.
    AbsoluteNoRepair,
    /// Absolute speeds, out-of-range values moved to the nearest bound.
    AbsoluteRepairBound,
    /// Absolute speeds, out-of-range values moved to the range midpoint.
    AbsoluteRepairMidpoint,
    /// Absolute speeds, out-of-range values redrawn uniformly in range.
    AbsoluteRepairRandom,
}

impl Encoding {
    /// All encodings, in declaration order.
    pub const ALL: [Encoding; 5] = [
        Encoding::Relative,
        Encoding::AbsoluteNoRepair,
        Encoding::AbsoluteRepairBound,
        Encoding::AbsoluteRepairMidpoint,
        Encoding::AbsoluteRepairRandom,
    ];

    /// Configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Relative => "relative",
            Encoding::AbsoluteNoRepair => "absolute-no-repair",
            Encoding::AbsoluteRepairBound => "absolute-repair-bound",
            Encoding::AbsoluteRepairMidpoint => "absolute-repair-midpoint",
            Encoding::AbsoluteRepairRandom => "absolute-repair-random",
        }
    }

    /// Whether genotype values are absolute speeds.
    pub fn is_absolute(&self) -> bool {
        !matches!(self, Encoding::Relative)
    }

    /// Repair policy of a repairing encoding.
    pub fn repair_strategy(&self) -> Option<RepairStrategy> {
        match self {
            Encoding::AbsoluteRepairBound => Some(RepairStrategy::Bound),
            Encoding::AbsoluteRepairMidpoint => Some(RepairStrategy::Midpoint),
            Encoding::AbsoluteRepairRandom => Some(RepairStrategy::Random),
            Encoding::Relative | Encoding::AbsoluteNoRepair => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| format!("unknown encoding '{s}'"))
    }
}

/// How an out-of-range absolute speed is replaced during repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairStrategy {
    /// Nearest bound: just above `lower`, or `upper`.
    Bound,
    /// Midpoint of the range.
    Midpoint,
    /// Uniform draw from the range.
    Random,
}

impl RepairStrategy {
    /// Replacement for `raw`, which lies outside `(lower, upper]`.
    pub fn repair<R: Rng>(&self, range: &SpeedRange, raw: f64, rng: &mut R) -> f64 {
        match self {
            RepairStrategy::Bound => {
                if raw <= range.lower() {
                    range.just_above_lower()
                } else if raw > range.upper() {
                    range.upper()
                } else {
                    raw
                }
            }
            RepairStrategy::Midpoint => range.lower() + range.width() * 0.5,
            RepairStrategy::Random => {
                let factor: f64 = rng.random();
                let omega = range.lower() + range.width() * factor;
                // Only an exact zero draw lands on the excluded lower bound.
                if factor == 0.0 {
                    range.just_above_lower()
                } else {
                    omega
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_roundtrip_names() {
        for enc in Encoding::ALL {
            assert_eq!(enc.to_string().parse::<Encoding>().unwrap(), enc);
        }
        assert!("corr-mean".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let enc: Encoding = serde_json::from_str("\"absolute-repair-random\"").unwrap();
        assert_eq!(enc, Encoding::AbsoluteRepairRandom);
        assert_eq!(
            serde_json::to_string(&Encoding::AbsoluteNoRepair).unwrap(),
            "\"absolute-no-repair\""
        );
    }

    #[test]
    fn test_repair_strategy_mapping() {
        assert_eq!(Encoding::Relative.repair_strategy(), None);
        assert_eq!(Encoding::AbsoluteNoRepair.repair_strategy(), None);
        assert_eq!(
            Encoding::AbsoluteRepairMidpoint.repair_strategy(),
            Some(RepairStrategy::Midpoint)
        );
        assert!(!Encoding::Relative.is_absolute());
    }

    #[test]
    fn test_bound_repair() {
        let mut rng = SmallRng::seed_from_u64(42);
        let range = SpeedRange::new(10.0, 20.0);
        let low = RepairStrategy::Bound.repair(&range, 5.0, &mut rng);
        assert!(low > 10.0 && low < 10.0 + 1e-9);
        assert_eq!(RepairStrategy::Bound.repair(&range, 10.0, &mut rng), low);
        assert_eq!(RepairStrategy::Bound.repair(&range, 25.0, &mut rng), 20.0);
    }

    #[test]
    fn test_repair_single_point_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let range = SpeedRange::new(300.0, 300.0);
        for strategy in [
            RepairStrategy::Bound,
            RepairStrategy::Midpoint,
            RepairStrategy::Random,
        ] {
            assert_eq!(strategy.repair(&range, 150.0, &mut rng), 300.0);
            assert_eq!(strategy.repair(&range, 300.0, &mut rng), 300.0);
            assert_eq!(strategy.repair(&range, 450.0, &mut rng), 300.0);
        }
    }

    #[test]
    fn test_midpoint_repair() {
        let mut rng = SmallRng::seed_from_u64(42);
        let range = SpeedRange::new(10.0, 20.0);
        assert_eq!(RepairStrategy::Midpoint.repair(&range, 5.0, &mut rng), 15.0);
        assert_eq!(RepairStrategy::Midpoint.repair(&range, 25.0, &mut rng), 15.0);
    }

    #[test]
    fn test_random_repair_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let range = SpeedRange::new(10.0, 20.0);
        for _ in 0..200 {
            let v = RepairStrategy::Random.repair(&range, 30.0, &mut rng);
            assert!(range.contains_open_lower(v), "{v} not in (10, 20]");
        }
    }
}
