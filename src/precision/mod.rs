//! Measurement Precision and Ability Classification
//!
//! All quantities derive from the total test information I(θ) = Σ I_j(θ):
//! - SEM = 1 / sqrt(I), or SEM_SENTINEL when I = 0
//! - reliability = I / (1 + I)
//!
//! Classification is a lookup on fixed theta breakpoints.

use serde::{Deserialize, Serialize};

use crate::model::information;
use crate::types::{AbilityClassification, AbilityEstimate, ItemParameters, SEM_SENTINEL};

/// Growth bands on the theta difference
const NO_CHANGE_BAND: f64 = 0.1;
const SIGNIFICANT_GAIN: f64 = 0.5;
const GOOD_GAIN: f64 = 0.2;
const SLIGHT_DECLINE: f64 = -0.2;

/// Total information of the administered items at theta.
pub fn test_information<T: AsRef<ItemParameters>>(theta: f64, items: &[T]) -> f64 {
    items.iter().map(|item| information(theta, item.as_ref())).sum()
}

/// Standard error of measurement.
pub fn standard_error<T: AsRef<ItemParameters>>(theta: f64, items: &[T]) -> f64 {
    let total = test_information(theta, items);
    if total <= 0.0 {
        return SEM_SENTINEL;
    }
    1.0 / total.sqrt()
}

/// Reliability coefficient in [0, 1].
pub fn reliability<T: AsRef<ItemParameters>>(theta: f64, items: &[T]) -> f64 {
    let total = test_information(theta, items);
    (total / (1.0 + total)).clamp(0.0, 1.0)
}

pub fn classify(theta: f64) -> AbilityClassification {
    AbilityClassification::from_theta(theta)
}

/// Bundle theta with its precision metrics.
pub fn summarize<T: AsRef<ItemParameters>>(theta: f64, items: &[T]) -> AbilityEstimate {
    AbilityEstimate {
        theta,
        standard_error: standard_error(theta, items),
        reliability: reliability(theta, items),
        classification: classify(theta),
    }
}

/// Change between two ability estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityGrowth {
    SignificantImprovement,
    GoodProgress,
    SlightImprovement,
    NoSignificantChange,
    SlightDecline,
    NeedsPractice,
}

impl AbilityGrowth {
    pub fn between(initial_theta: f64, final_theta: f64) -> Self {
        let change = final_theta - initial_theta;
        if change.abs() < NO_CHANGE_BAND {
            AbilityGrowth::NoSignificantChange
        } else if change > SIGNIFICANT_GAIN {
            AbilityGrowth::SignificantImprovement
        } else if change > GOOD_GAIN {
            AbilityGrowth::GoodProgress
        } else if change > 0.0 {
            AbilityGrowth::SlightImprovement
        } else if change > SLIGHT_DECLINE {
            AbilityGrowth::SlightDecline
        } else {
            AbilityGrowth::NeedsPractice
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AbilityGrowth::SignificantImprovement => "Significant improvement",
            AbilityGrowth::GoodProgress => "Good progress",
            AbilityGrowth::SlightImprovement => "Slight improvement",
            AbilityGrowth::NoSignificantChange => "No significant change",
            AbilityGrowth::SlightDecline => "Slight decline",
            AbilityGrowth::NeedsPractice => "Needs more practice",
        }
    }
}
