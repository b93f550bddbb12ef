//! Analysis configuration.
//!
//! # Example
//!
//! ```
//! use u_avr::config::AvrConfig;
//! use u_avr::ga::Encoding;
//!
//! let config = AvrConfig::from_json_str(r#"{
//!     "task_set": "specs/engine.json",
//!     "n": 6,
//!     "encoding": "absolute-repair-midpoint",
//!     "seed": 42
//! }"#).unwrap();
//! assert_eq!(config.n, 6);
//! assert_eq!(config.encoding, Encoding::AbsoluteRepairMidpoint);
//! assert_eq!(config.acc_max, 100.0 * std::f64::consts::PI);
//! ```

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{AvrError, Result};
use crate::feasibility::AccelerationBounds;
use crate::ga::Encoding;

/// Configuration of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvrConfig {
    /// Path of the task-set file.
    pub task_set: PathBuf,
    /// Number of events per sequence (>= 2).
    pub n: usize,
    /// Strongest deceleration (rad/s^2).
    pub acc_min: f64,
    /// Strongest acceleration (rad/s^2).
    pub acc_max: f64,
    /// Encoding and decoding policy.
    pub encoding: Encoding,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for AvrConfig {
    fn default() -> Self {
        Self {
            task_set: PathBuf::new(),
            n: 2,
            acc_min: -100.0 * PI,
            acc_max: 100.0 * PI,
            encoding: Encoding::Relative,
            seed: None,
        }
    }
}

impl AvrConfig {
    /// Creates a default configuration for the given task-set file.
    pub fn new(task_set: impl Into<PathBuf>) -> Self {
        Self {
            task_set: task_set.into(),
            ..Default::default()
        }
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the sequence length.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Sets the acceleration bounds.
    pub fn with_acceleration(mut self, acc_min: f64, acc_max: f64) -> Self {
        self.acc_min = acc_min;
        self.acc_max = acc_max;
        self
    }

    /// Sets the encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(AvrError::Config(format!(
                "n must be at least 2, got {}",
                self.n
            )));
        }
        if !self.acc_min.is_finite() || !self.acc_max.is_finite() {
            return Err(AvrError::Config("acceleration bounds must be finite".into()));
        }
        if self.acc_min >= self.acc_max {
            return Err(AvrError::Config(format!(
                "acc_min ({}) must be smaller than acc_max ({})",
                self.acc_min, self.acc_max
            )));
        }
        Ok(())
    }

    /// Acceleration bounds. Call [`validate`](Self::validate) first.
    pub fn acceleration(&self) -> AccelerationBounds {
        AccelerationBounds::new(self.acc_min, self.acc_max)
    }

    /// Random source for creation and random repair.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = AvrConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AvrConfig::default());
        assert_eq!(config.n, 2);
        assert_eq!(config.encoding, Encoding::Relative);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AvrConfig::new("tasks.json")
            .with_n(10)
            .with_acceleration(-5.0, 5.0)
            .with_encoding(Encoding::AbsoluteRepairRandom)
            .with_seed(7);
        assert_eq!(config.task_set, PathBuf::from("tasks.json"));
        assert_eq!(config.acceleration(), AccelerationBounds::new(-5.0, 5.0));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_rejects() {
        assert!(AvrConfig::default().with_n(1).validate().is_err());
        assert!(AvrConfig::default().with_acceleration(1.0, 1.0).validate().is_err());
        assert!(AvrConfig::default()
            .with_acceleration(f64::NEG_INFINITY, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_unknown_encoding() {
        assert!(matches!(
            AvrConfig::from_json_str(r#"{"encoding": "corr-mean"}"#),
            Err(AvrError::Json(_))
        ));
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let config = AvrConfig::default().with_seed(42);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
