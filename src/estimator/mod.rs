//! Maximum Likelihood Ability Estimation
//!
//! Newton-Raphson over the 3PL log-likelihood, in Fisher-scoring form:
//! - L'(θ)  = Σ a(u - P)(P - c) / (P(1 - c))
//! - L''(θ) ≈ -Σ I_j(θ)   (expected curvature, never positive)
//! - θ ← θ - L'/L'', step capped at ±max_step, θ clamped to the bounds
//!   after every iteration
//!
//! Degenerate cases are absorbed rather than reported:
//! - zero curvature: stop, keep the last theta (FlatLikelihood)
//! - theta pinned at a bound with the step still pushing outward (Bounded)
//!
//! Starting thetas near the bounds are moved inward so the first step is not
//! swallowed by the clamp.

use serde::{Deserialize, Serialize};

use crate::config::EstimatorConfig;
use crate::error::{IrtError, Result};
use crate::model::score_terms;
use crate::sanitize::{has_invalid_values, sanitize_theta};
use crate::types::{Response, ThetaBounds};

/// Proportion clip for the raw-score logit
const MIN_PROPORTION: f64 = 0.01;
const MAX_PROPORTION: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimationStatus {
    /// |step| fell below the tolerance
    Converged,
    /// Iteration budget exhausted
    MaxIterations,
    /// Curvature was zero; theta is the last valid iterate
    FlatLikelihood,
    /// Theta sits on a bound and the likelihood still increases past it
    Bounded,
}

/// Result of one MLE run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimation {
    pub theta: f64,
    /// Starting point actually used (after the near-bound substitution)
    pub start_theta: f64,
    /// Number of theta updates applied
    pub iterations: usize,
    pub status: EstimationStatus,
}

/// Starting point for the iteration.
///
/// The guard is capped at the bounds, so with bounds narrower than
/// ±start_guard a start on a bound is still moved inward.
pub fn starting_theta(initial_theta: f64, config: &EstimatorConfig) -> f64 {
    let bounds = &config.theta_bounds;
    let initial = sanitize_theta(initial_theta, bounds);
    let upper_guard = config.start_guard.min(bounds.max);
    let lower_guard = (-config.start_guard).max(bounds.min);
    let start = if initial >= upper_guard {
        config.start_fallback
    } else if initial <= lower_guard {
        -config.start_fallback
    } else {
        initial
    };
    bounds.clamp(start)
}

/// Estimate theta from a response history.
pub fn estimate(
    responses: &[Response],
    initial_theta: f64,
    config: &EstimatorConfig,
) -> Result<Estimation> {
    if responses.is_empty() {
        return Err(IrtError::InsufficientData);
    }
    for response in responses {
        response.item.validate()?;
    }

    let bounds = config.theta_bounds;
    let start_theta = starting_theta(initial_theta, config);
    if start_theta != initial_theta {
        tracing::debug!(
            initial_theta,
            start_theta,
            "moved starting theta away from the bound"
        );
    }

    let mut theta = start_theta;
    let mut iterations = 0;
    let mut status = EstimationStatus::MaxIterations;

    while iterations < config.max_iterations {
        let (first, information) = responses.iter().fold((0.0, 0.0), |acc, r| {
            let (gradient, info) = score_terms(theta, r);
            (acc.0 + gradient, acc.1 + info)
        });
        let second = -information;

        if second == 0.0 || has_invalid_values(&[first, second]) {
            tracing::debug!(theta, iterations, "flat likelihood, keeping last theta");
            status = EstimationStatus::FlatLikelihood;
            break;
        }

        let step = (-first / second).clamp(-config.max_step, config.max_step);
        let next = bounds.clamp(theta + step);
        let pinned = next == theta;
        theta = next;
        iterations += 1;

        if step.abs() < config.tolerance {
            status = EstimationStatus::Converged;
            break;
        }
        if pinned {
            status = EstimationStatus::Bounded;
            break;
        }
    }

    Ok(Estimation {
        theta,
        start_theta,
        iterations,
        status,
    })
}

/// Theta only.
pub fn estimate_theta(
    responses: &[Response],
    initial_theta: f64,
    config: &EstimatorConfig,
) -> Result<f64> {
    estimate(responses, initial_theta, config).map(|e| e.theta)
}

/// Progressive estimates: entry i is the estimate after responses[..=i].
/// Every prefix starts from `initial_theta`, so each entry equals a fresh
/// `estimate_theta` call on that prefix.
pub fn theta_trajectory(
    responses: &[Response],
    initial_theta: f64,
    config: &EstimatorConfig,
) -> Result<Vec<f64>> {
    if responses.is_empty() {
        return Err(IrtError::InsufficientData);
    }

    (1..=responses.len())
        .map(|end| estimate_theta(&responses[..end], initial_theta, config))
        .collect()
}

/// Cold-start theta from a raw score: logit of the clipped proportion correct.
pub fn raw_score_to_theta(correct: usize, total: usize, bounds: &ThetaBounds) -> f64 {
    if total == 0 {
        return bounds.clamp(0.0);
    }
    let proportion =
        (correct.min(total) as f64 / total as f64).clamp(MIN_PROPORTION, MAX_PROPORTION);
    bounds.clamp((proportion / (1.0 - proportion)).ln())
}
