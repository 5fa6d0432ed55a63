//! Common Types and Constants
//!
//! Shared data structures used across the model, estimator, selector and
//! session controller.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrtError, Result};

// ==================== Constants ====================

/// Default lower ability bound
pub const THETA_MIN: f64 = -3.0;

/// Default upper ability bound
pub const THETA_MAX: f64 = 3.0;

/// SEM reported when the administered items carry no information
pub const SEM_SENTINEL: f64 = 999.0;

/// Highest probability the model reports (keeps q = 1 - p strictly positive)
pub const MAX_PROBABILITY: f64 = 1.0 - f64::EPSILON;

/// Classification breakpoints on the theta axis
pub const BASIC_THRESHOLD: f64 = -1.0;
pub const PROFICIENT_THRESHOLD: f64 = 0.5;
pub const ADVANCED_THRESHOLD: f64 = 1.5;

// ==================== Item Types ====================

/// 3PL item parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemParameters {
    /// Discrimination a (> 0)
    pub discrimination: f64,
    /// Difficulty b
    pub difficulty: f64,
    /// Guessing c in [0, 1)
    pub guessing: f64,
}

impl ItemParameters {
    /// Build validated parameters.
    pub fn new(discrimination: f64, difficulty: f64, guessing: f64) -> Result<Self> {
        let item = Self {
            discrimination,
            difficulty,
            guessing,
        };
        item.validate()?;
        Ok(item)
    }

    /// Re-check parameters that arrived without going through `new`
    /// (e.g. deserialized from a catalog).
    pub fn validate(&self) -> Result<()> {
        let finite = self.discrimination.is_finite()
            && self.difficulty.is_finite()
            && self.guessing.is_finite();

        if !finite || self.discrimination <= 0.0 || !(0.0..1.0).contains(&self.guessing) {
            return Err(IrtError::InvalidParameters {
                discrimination: self.discrimination,
                difficulty: self.difficulty,
                guessing: self.guessing,
            });
        }
        Ok(())
    }
}

// Precision and selection functions are generic over AsRef<ItemParameters>.
impl AsRef<ItemParameters> for ItemParameters {
    fn as_ref(&self) -> &ItemParameters {
        self
    }
}

impl AsRef<ItemParameters> for Response {
    fn as_ref(&self) -> &ItemParameters {
        &self.item
    }
}

impl AsRef<ItemParameters> for PoolItem {
    fn as_ref(&self) -> &ItemParameters {
        &self.params
    }
}

/// One answered item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub item: ItemParameters,
    pub correct: bool,
}

impl Response {
    pub fn new(item: ItemParameters, correct: bool) -> Self {
        Self { item, correct }
    }

    /// Scored outcome u (1 correct, 0 incorrect)
    pub fn score(&self) -> f64 {
        if self.correct {
            1.0
        } else {
            0.0
        }
    }
}

/// Catalog entry offered to the session controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolItem {
    pub item_id: String,
    pub params: ItemParameters,
}

impl PoolItem {
    pub fn new(item_id: impl Into<String>, params: ItemParameters) -> Self {
        Self {
            item_id: item_id.into(),
            params,
        }
    }
}

// ==================== Ability Types ====================

/// Closed theta interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThetaBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ThetaBounds {
    fn default() -> Self {
        Self {
            min: THETA_MIN,
            max: THETA_MAX,
        }
    }
}

impl ThetaBounds {
    pub fn clamp(&self, theta: f64) -> f64 {
        theta.max(self.min).min(self.max)
    }

    pub fn contains(&self, theta: f64) -> bool {
        theta >= self.min && theta <= self.max
    }
}

/// Ordered ability categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityClassification {
    BelowBasic,
    Basic,
    Proficient,
    Advanced,
}

impl AbilityClassification {
    /// Map theta onto the fixed breakpoints.
    pub fn from_theta(theta: f64) -> Self {
        if theta < BASIC_THRESHOLD {
            AbilityClassification::BelowBasic
        } else if theta < PROFICIENT_THRESHOLD {
            AbilityClassification::Basic
        } else if theta < ADVANCED_THRESHOLD {
            AbilityClassification::Proficient
        } else {
            AbilityClassification::Advanced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AbilityClassification::BelowBasic => "Below Basic",
            AbilityClassification::Basic => "Basic",
            AbilityClassification::Proficient => "Proficient",
            AbilityClassification::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for AbilityClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ability estimate with its precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityEstimate {
    /// Theta, within the configured bounds
    pub theta: f64,
    /// Standard error of measurement (SEM_SENTINEL when unmeasurable)
    pub standard_error: f64,
    /// Reliability coefficient [0, 1]
    pub reliability: f64,
    pub classification: AbilityClassification,
}
