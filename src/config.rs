use crate::errors::{Result, SkipListError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Construction-time settings for a [`SkipList`](crate::SkipList). There is
/// no way to change them on a live list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipListConfig {
    /// Chance that an inserted value is promoted into the next layer up.
    pub probability: f64,
    /// Seed for the promotion coin. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig {
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl SkipListConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SkipListConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        check_probability(self.probability)
    }
}

/// Rejects NaN and anything outside `[0, 1]`. Values are never clamped.
pub fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SkipListError::InvalidProbability(p))
    }
}
